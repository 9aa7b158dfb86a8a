//! The clinic desk's application state.
//!
//! One [`Clinic`] owns every registry, the emergency queue and the date
//! window last shown to the operator. It is built once at startup and
//! handed by reference to each menu operation.

use crate::calendar::DateWindow;
use crate::config::ClinicConfig;
use crate::emergency::EmergencyQueue;
use crate::error::Result;
use crate::models::{Doctor, DoctorId, EmergencyEntry, Patient};
use crate::registry::{DoctorRegistry, PatientRegistry};
use chrono::{Local, NaiveDate};
use tracing::{debug, info};

/// Doctors registered at startup: (name, specialty, hospital).
pub const HOUSE_DOCTORS: [(&str, &str, &str); 3] = [
    ("Dr. Seema Deshmukh", "Cardiologist", "HeartCare Hospital"),
    ("Dr. Amit Rathi", "General Physician", "HealthPlus Pune"),
    ("Dr. Meenal Joshi", "Dermatologist", "SkinCare Clinic"),
];

#[derive(Debug, Clone)]
pub struct Clinic {
    pub(crate) config: ClinicConfig,
    pub(crate) doctors: DoctorRegistry,
    pub(crate) patients: PatientRegistry,
    pub(crate) emergencies: EmergencyQueue,
    pub(crate) window: DateWindow,
}

impl Clinic {
    /// Build the clinic using the local wall clock for "today".
    pub fn new(config: ClinicConfig) -> Self {
        Self::starting_on(config, Local::now().date_naive())
    }

    /// Build the clinic as if today were `today`.
    pub fn starting_on(config: ClinicConfig, today: NaiveDate) -> Self {
        let mut clinic = Clinic {
            doctors: DoctorRegistry::new(config.first_doctor_id),
            patients: PatientRegistry::new(config.first_patient_id),
            emergencies: EmergencyQueue::new(),
            window: DateWindow::starting(today),
            config,
        };
        if clinic.config.preload_doctors {
            clinic.preload_doctors(today);
        }
        clinic
    }

    /// Refresh the cached window and register the house doctors.
    pub fn preload_doctors(&mut self, today: NaiveDate) {
        self.refresh_window(today);
        for (name, specialty, hospital) in HOUSE_DOCTORS {
            self.doctors.add(name, specialty, hospital);
        }
        info!(count = HOUSE_DOCTORS.len(), "house doctors preloaded");
    }

    /// Recompute the window from `today` and remember it for the
    /// schedule view.
    pub(crate) fn refresh_window(&mut self, today: NaiveDate) -> DateWindow {
        self.window = DateWindow::starting(today);
        debug!(window = %self.window, "date window cached");
        self.window
    }

    pub fn config(&self) -> &ClinicConfig {
        &self.config
    }

    pub fn doctors(&self) -> &DoctorRegistry {
        &self.doctors
    }

    pub fn patients(&self) -> &PatientRegistry {
        &self.patients
    }

    pub fn emergencies(&self) -> &EmergencyQueue {
        &self.emergencies
    }

    /// The window most recently computed by preload or booking.
    pub fn cached_window(&self) -> &DateWindow {
        &self.window
    }

    pub fn add_doctor(&mut self, name: &str, specialty: &str, hospital: &str) -> DoctorId {
        self.doctors.add(name, specialty, hospital)
    }

    pub fn delete_doctor(&mut self, id: &str) -> Result<Doctor> {
        self.doctors.delete(id)
    }

    pub fn add_patient(&mut self, name: &str, age: u32, disease: &str) -> u32 {
        self.patients.add(name, age, disease)
    }

    pub fn delete_patient(&mut self, id: u32) -> Result<Patient> {
        self.patients.delete(id)
    }

    /// Queue a registered patient for emergency handling.
    ///
    /// The queue keeps a copy of the patient's name and ID as they are now.
    pub fn flag_emergency(&mut self, patient_id: u32) -> Result<EmergencyEntry> {
        let patient = self.patients.find_by_id(patient_id)?;
        let entry = EmergencyEntry::new(patient.name.clone(), patient.id);
        self.emergencies.enqueue(entry.clone());
        Ok(entry)
    }

    /// Take the next emergency off the queue.
    pub fn process_emergency(&mut self) -> Result<EmergencyEntry> {
        self.emergencies.dequeue()
    }

    /// A doctor together with the cached window, for the schedule view.
    pub fn schedule(&self, doctor_id: &str) -> Result<(&Doctor, &DateWindow)> {
        let doctor = self.doctors.find_by_id(doctor_id)?;
        Ok((doctor, &self.window))
    }
}
