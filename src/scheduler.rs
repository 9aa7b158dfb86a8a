//! Appointment booking workflow.
//!
//! A booking walks through four selections, each validated before the
//! next is offered:
//!
//! 1. patient, by ID ([`Clinic::start_booking`])
//! 2. date, 1-based within the freshly computed window
//! 3. doctor, 1-based in registry listing order
//! 4. slot, 1-based among the slots still open for that doctor and date
//!
//! [`Clinic::confirm_booking`] then books the doctor's cell and records
//! the appointment on the patient in one call, after every check has
//! passed. A refused step leaves the clinic untouched.

use crate::calendar::DateWindow;
use crate::clinic::Clinic;
use crate::error::{ClinicError, Result};
use crate::models::{Appointment, Doctor, DoctorId, TIME_SLOTS, WINDOW_DAYS};
use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

/// An in-progress booking for one patient.
#[derive(Debug, Clone)]
pub struct BookingSession {
    patient_id: u32,
    window: DateWindow,
    day: Option<usize>,
    doctor: Option<DoctorId>,
    offered: Vec<usize>,
}

/// What the operator is shown once a booking goes through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingReceipt {
    pub patient_name: String,
    pub doctor_id: DoctorId,
    pub specialty: String,
    pub appointment: Appointment,
    pub bill: u64,
}

/// Turn a 1-based menu choice into a zero-based index.
fn menu_index(what: &'static str, choice: i64, max: usize) -> Result<usize> {
    if choice >= 1 && (choice as u64) <= max as u64 {
        Ok(choice as usize - 1)
    } else {
        warn!(what, choice, max, "menu choice out of range");
        Err(ClinicError::OutOfRange { what, choice, max })
    }
}

impl BookingSession {
    pub fn patient_id(&self) -> u32 {
        self.patient_id
    }

    /// Dates offered for this booking.
    pub fn window(&self) -> &DateWindow {
        &self.window
    }

    /// Pick a date by its 1-based position in the window.
    pub fn select_date(&mut self, choice: i64) -> Result<String> {
        let day = menu_index("date", choice, WINDOW_DAYS)?;
        self.day = Some(day);
        self.doctor = None;
        self.offered.clear();
        Ok(self.date_label(day))
    }

    /// Pick a doctor by its 1-based position in the registry listing.
    pub fn select_doctor<'c>(&mut self, clinic: &'c Clinic, choice: i64) -> Result<&'c Doctor> {
        if self.day.is_none() {
            return Err(ClinicError::BookingIncomplete("choose a date first"));
        }
        let doctors = clinic.doctors();
        if doctors.is_empty() {
            warn!("booking attempted with no doctors registered");
            return Err(ClinicError::NoDoctors);
        }
        let index = menu_index("doctor", choice, doctors.len())?;
        let doctor = doctors
            .nth_listed(index + 1)
            .ok_or(ClinicError::NoDoctors)?;
        self.doctor = Some(doctor.id);
        self.offered.clear();
        Ok(doctor)
    }

    /// Slots still open for the chosen doctor and date, in declared order.
    ///
    /// The list is remembered; [`Clinic::confirm_booking`] resolves the
    /// slot choice against it.
    pub fn open_slots(&mut self, clinic: &Clinic) -> Result<Vec<&'static str>> {
        let (day, doctor) = self.selected_doctor(clinic)?;
        let offered = doctor.schedule.open_slots(day);
        debug!(doctor_id = %doctor.id, day, open = offered.len(), "enumerated open slots");

        if offered.is_empty() {
            return Err(ClinicError::NoAvailableSlots {
                doctor: doctor.name.clone(),
                date: self.date_label(day),
            });
        }
        let labels = offered.iter().map(|&slot| TIME_SLOTS[slot]).collect();
        self.offered = offered;
        Ok(labels)
    }

    fn selected_doctor<'c>(&self, clinic: &'c Clinic) -> Result<(usize, &'c Doctor)> {
        let day = self
            .day
            .ok_or(ClinicError::BookingIncomplete("choose a date first"))?;
        let id = self
            .doctor
            .ok_or(ClinicError::BookingIncomplete("choose a doctor first"))?;
        let doctor = clinic
            .doctors()
            .get(id)
            .ok_or_else(|| ClinicError::DoctorNotFound(id.to_string()))?;
        Ok((day, doctor))
    }

    fn date_label(&self, day: usize) -> String {
        self.window.label(day).unwrap_or_default()
    }
}

impl Clinic {
    /// Begin a booking for a registered patient, using the local clock.
    pub fn start_booking(&mut self, patient_id: u32) -> Result<BookingSession> {
        self.start_booking_on(patient_id, Local::now().date_naive())
    }

    /// Begin a booking as if today were `today`.
    ///
    /// The window offered is also cached for the schedule view.
    pub fn start_booking_on(&mut self, patient_id: u32, today: NaiveDate) -> Result<BookingSession> {
        self.patients.find_by_id(patient_id)?;
        let window = self.refresh_window(today);
        Ok(BookingSession {
            patient_id,
            window,
            day: None,
            doctor: None,
            offered: Vec::new(),
        })
    }

    /// Book the chosen slot: mark the doctor's cell booked, add the
    /// appointment to the patient's history and charge the fee.
    ///
    /// All checks run before either record is touched, so a refusal
    /// leaves both the doctor and the patient unchanged.
    pub fn confirm_booking(
        &mut self,
        session: &BookingSession,
        slot_choice: i64,
    ) -> Result<BookingReceipt> {
        if session.offered.is_empty() {
            return Err(ClinicError::BookingIncomplete("list open slots first"));
        }
        let (day, doctor_id) = {
            let (day, doctor) = session.selected_doctor(self)?;
            (day, doctor.id)
        };
        let pick = menu_index("slot", slot_choice, session.offered.len())?;
        let slot = session.offered[pick];
        let date = session.date_label(day);
        let time = TIME_SLOTS[slot];

        self.patients.find_by_id(session.patient_id)?;

        let fee = self.config.consultation_fee;
        let doctor = self
            .doctors
            .get_mut(doctor_id)
            .ok_or_else(|| ClinicError::DoctorNotFound(doctor_id.to_string()))?;
        if !doctor.schedule.book(day, slot) {
            return Err(ClinicError::SlotAlreadyBooked {
                date,
                time: time.to_string(),
            });
        }

        let appointment = Appointment {
            date,
            time,
            doctor_name: doctor.name.clone(),
            hospital: doctor.hospital.clone(),
        };
        let specialty = doctor.specialty.clone();

        let patient = self.patients.find_by_id_mut(session.patient_id)?;
        patient.record_appointment(appointment.clone(), fee);

        info!(
            patient_id = patient.id,
            doctor_id = %doctor_id,
            date = %appointment.date,
            time = appointment.time,
            bill = patient.bill,
            "appointment confirmed"
        );

        Ok(BookingReceipt {
            patient_name: patient.name.clone(),
            doctor_id,
            specialty,
            appointment,
            bill: patient.bill,
        })
    }

    /// Run a whole booking from 1-based choices, as the console would.
    pub fn book_on(
        &mut self,
        patient_id: u32,
        today: NaiveDate,
        date_choice: i64,
        doctor_choice: i64,
        slot_choice: i64,
    ) -> Result<BookingReceipt> {
        let mut session = self.start_booking_on(patient_id, today)?;
        session.select_date(date_choice)?;
        session.select_doctor(self, doctor_choice)?;
        session.open_slots(self)?;
        self.confirm_booking(&session, slot_choice)
    }
}
