//! Clinic desk: an in-memory console for a small clinic.
//!
//! Tracks doctors and their weekly slot schedules, patients with their
//! appointment history and bills, and a first-come, first-served
//! emergency queue.
//!
//! # Modules
//!
//! - [`models`]: Doctor, Patient, Appointment and friends
//! - [`calendar`]: the rolling date window and per-doctor schedule grid
//! - [`registry`]: doctor and patient registries
//! - [`emergency`]: the emergency queue
//! - [`scheduler`]: the appointment booking workflow
//! - [`clinic`]: application state tying the above together
//! - [`cli`]: the interactive menu

pub mod calendar;
pub mod cli;
pub mod clinic;
pub mod config;
pub mod emergency;
pub mod error;
pub mod models;
pub mod registry;
pub mod scheduler;

pub use calendar::{DateWindow, ScheduleGrid};
pub use cli::ClinicCli;
pub use clinic::Clinic;
pub use config::ClinicConfig;
pub use emergency::EmergencyQueue;
pub use error::{ClinicError, Result};
pub use models::{Appointment, Doctor, DoctorId, EmergencyEntry, Patient, SlotState, TIME_SLOTS};
pub use registry::{DoctorRegistry, PatientRegistry};
pub use scheduler::{BookingReceipt, BookingSession};
