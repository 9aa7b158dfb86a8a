//! Data models for the clinic desk.
//!
//! - SlotState: whether a schedule cell is open or taken
//! - DoctorId: the "D<n>" identifier handed out by the doctor registry
//! - Doctor: doctor details plus a weekly schedule grid
//! - Patient: patient details, bill and appointment history
//! - Appointment: a confirmed booking, snapshotted into the patient
//! - EmergencyEntry: a triage queue entry

use crate::calendar::ScheduleGrid;
use crate::error::ClinicError;
use std::fmt;
use std::str::FromStr;

/// Number of consecutive days offered for booking, starting today.
pub const WINDOW_DAYS: usize = 7;

/// Bookable time slots, in the order they are offered.
pub const TIME_SLOTS: [&str; 9] = [
    "10:00 AM", "11:30 AM", "1:00 PM", "2:30 PM", "4:00 PM", "5:30 PM", "6:00 PM", "7:15 PM",
    "8:30 PM",
];

pub const SLOTS_PER_DAY: usize = TIME_SLOTS.len();

/// State of one cell in a doctor's schedule.
///
/// Cells only ever move from `Available` to `Booked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SlotState {
    #[default]
    Available,
    Booked,
}

impl SlotState {
    /// Single-letter code used in the schedule view.
    pub fn code(&self) -> &'static str {
        match self {
            SlotState::Available => "A",
            SlotState::Booked => "B",
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, SlotState::Available)
    }
}

/// Doctor identifier, rendered as `D<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DoctorId(pub u32);

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.0)
    }
}

impl FromStr for DoctorId {
    type Err = ClinicError;

    /// Parse an ID exactly as it is displayed, so "D0100" or "d100" do
    /// not match "D100".
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let not_found = || ClinicError::DoctorNotFound(value.to_string());
        let digits = value.strip_prefix('D').ok_or_else(not_found)?;
        let number: u32 = digits.parse().map_err(|_| not_found())?;
        let id = DoctorId(number);
        if id.to_string() != value {
            return Err(not_found());
        }
        Ok(id)
    }
}

/// A doctor and their weekly availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    pub specialty: String,
    pub hospital: String,
    pub schedule: ScheduleGrid,
}

impl Doctor {
    /// Create a doctor with every slot open.
    pub fn new(id: DoctorId, name: String, specialty: String, hospital: String) -> Self {
        Doctor {
            id,
            name,
            specialty,
            hospital,
            schedule: ScheduleGrid::new(),
        }
    }
}

/// A confirmed appointment.
///
/// Doctor name and hospital are copied at booking time and stay as they
/// were even if the doctor is later deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub date: String,
    pub time: &'static str,
    pub doctor_name: String,
    pub hospital: String,
}

/// Represents a registered patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub id: u32,
    pub name: String,
    pub age: u32,
    pub disease: String,
    pub bill: u64,
    history: Vec<Appointment>,
}

impl Patient {
    pub fn new(id: u32, name: String, age: u32, disease: String) -> Self {
        Patient {
            id,
            name,
            age,
            disease,
            bill: 0,
            history: Vec::new(),
        }
    }

    /// Appointment history, newest first.
    pub fn history(&self) -> &[Appointment] {
        &self.history
    }

    /// Record a booking and charge for it.
    pub(crate) fn record_appointment(&mut self, appointment: Appointment, fee: u64) {
        self.history.insert(0, appointment);
        self.bill += fee;
    }
}

/// A snapshot of a patient taken when they were flagged as an emergency.
///
/// Not linked to the patient record: deleting or changing the patient
/// leaves the entry as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyEntry {
    pub patient_name: String,
    pub patient_id: u32,
}

impl EmergencyEntry {
    pub fn new(patient_name: String, patient_id: u32) -> Self {
        EmergencyEntry {
            patient_name,
            patient_id,
        }
    }
}

impl fmt::Display for EmergencyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ID: {})", self.patient_name, self.patient_id)
    }
}
