//! Error types for the clinic desk.

use thiserror::Error;

/// Every way a desk operation can be refused.
///
/// None of these are fatal: the console prints the message and returns
/// to the menu. A failed operation leaves all state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClinicError {
    #[error("Patient not found! (ID: {0})")]
    PatientNotFound(u32),

    #[error("Doctor with ID {0} not found.")]
    DoctorNotFound(String),

    #[error("Doctor named '{0}' not found.")]
    DoctorNameNotFound(String),

    #[error("Invalid {what} choice: {choice} (expected 1-{max})")]
    OutOfRange {
        what: &'static str,
        choice: i64,
        max: usize,
    },

    #[error("No available slots for {doctor} on {date}.")]
    NoAvailableSlots { doctor: String, date: String },

    #[error("No emergency patients in queue.")]
    EmptyQueue,

    #[error("No doctors registered.")]
    NoDoctors,

    #[error("Slot {time} on {date} is already booked.")]
    SlotAlreadyBooked { date: String, time: String },

    #[error("Booking step out of order: {0}")]
    BookingIncomplete(&'static str),

    #[error("Not a number: '{0}'")]
    InvalidNumber(String),
}

pub type Result<T> = std::result::Result<T, ClinicError>;
