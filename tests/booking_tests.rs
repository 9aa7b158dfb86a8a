//! Booking workflow integration tests.

use chrono::NaiveDate;
use clinicdesk::{Clinic, ClinicConfig, ClinicError, DoctorId, SlotState, TIME_SLOTS};
use proptest::prelude::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 28).unwrap()
}

fn bare_clinic() -> Clinic {
    let config = ClinicConfig {
        preload_doctors: false,
        color: false,
        ..ClinicConfig::default()
    };
    Clinic::starting_on(config, today())
}

#[test]
fn test_first_doctors_get_sequential_ids() {
    let mut clinic = bare_clinic();
    assert_eq!(clinic.add_doctor("Dr. A", "Cardio", "H1").to_string(), "D100");
    assert_eq!(clinic.add_doctor("Dr. B", "Derm", "H2").to_string(), "D101");
}

#[test]
fn test_booking_first_slot_of_first_day() {
    let mut clinic = bare_clinic();
    clinic.add_doctor("Dr. A", "Cardio", "H1");
    let bob = clinic.add_patient("Bob", 30, "Flu");
    assert_eq!(bob, 100);
    assert_eq!(clinic.patients().find_by_id(bob).unwrap().bill, 0);

    let receipt = clinic.book_on(bob, today(), 1, 1, 1).unwrap();

    let patient = clinic.patients().find_by_id(bob).unwrap();
    assert_eq!(patient.bill, 500);
    assert_eq!(patient.history().len(), 1);
    assert_eq!(patient.history()[0], receipt.appointment);
    assert_eq!(receipt.appointment.date, "2024-12-28");
    assert_eq!(receipt.appointment.time, "10:00 AM");
    assert_eq!(receipt.appointment.doctor_name, "Dr. A");
    assert_eq!(receipt.appointment.hospital, "H1");

    let doctor = clinic.doctors().find_by_id("D100").unwrap();
    assert_eq!(doctor.schedule.state(0, 0), Some(SlotState::Booked));
    assert_eq!(doctor.schedule.booked_count(), 1);
}

#[test]
fn test_booked_slot_is_not_offered_again() {
    let mut clinic = bare_clinic();
    clinic.add_doctor("Dr. A", "Cardio", "H1");
    let bob = clinic.add_patient("Bob", 30, "Flu");
    clinic.book_on(bob, today(), 3, 1, 2).unwrap();

    let mut session = clinic.start_booking_on(bob, today()).unwrap();
    session.select_date(3).unwrap();
    session.select_doctor(&clinic, 1).unwrap();
    let offered = session.open_slots(&clinic).unwrap();

    assert_eq!(offered.len(), TIME_SLOTS.len() - 1);
    assert!(!offered.contains(&"11:30 AM"));
    assert_eq!(offered[0], "10:00 AM");
    assert_eq!(offered[1], "1:00 PM");
}

#[test]
fn test_slot_choice_out_of_range_changes_nothing() {
    let mut clinic = bare_clinic();
    clinic.add_doctor("Dr. A", "Cardio", "H1");
    let bob = clinic.add_patient("Bob", 30, "Flu");
    // Leave three open slots on the first day.
    for _ in 0..TIME_SLOTS.len() - 3 {
        clinic.book_on(bob, today(), 1, 1, 1).unwrap();
    }
    let before = clinic.clone();

    let mut session = clinic.start_booking_on(bob, today()).unwrap();
    session.select_date(1).unwrap();
    session.select_doctor(&clinic, 1).unwrap();
    assert_eq!(session.open_slots(&clinic).unwrap().len(), 3);

    let err = clinic.confirm_booking(&session, 99).unwrap_err();
    assert_eq!(
        err,
        ClinicError::OutOfRange {
            what: "slot",
            choice: 99,
            max: 3,
        }
    );
    assert_eq!(
        clinic.patients().find_by_id(bob).unwrap(),
        before.patients().find_by_id(bob).unwrap()
    );
    assert_eq!(
        clinic.doctors().get(DoctorId(100)).unwrap(),
        before.doctors().get(DoctorId(100)).unwrap()
    );
}

#[test]
fn test_date_and_doctor_choices_are_bounded() {
    let mut clinic = bare_clinic();
    clinic.add_doctor("Dr. A", "Cardio", "H1");
    let bob = clinic.add_patient("Bob", 30, "Flu");

    assert!(matches!(
        clinic.book_on(bob, today(), 0, 1, 1),
        Err(ClinicError::OutOfRange { what: "date", .. })
    ));
    assert!(matches!(
        clinic.book_on(bob, today(), 8, 1, 1),
        Err(ClinicError::OutOfRange { what: "date", .. })
    ));
    assert!(matches!(
        clinic.book_on(bob, today(), 1, 2, 1),
        Err(ClinicError::OutOfRange { what: "doctor", max: 1, .. })
    ));
    assert_eq!(clinic.patients().find_by_id(bob).unwrap().bill, 0);
}

#[test]
fn test_window_dates_cross_year_end() {
    let mut clinic = bare_clinic();
    clinic.add_doctor("Dr. A", "Cardio", "H1");
    let bob = clinic.add_patient("Bob", 30, "Flu");

    let receipt = clinic.book_on(bob, today(), 5, 1, 1).unwrap();
    assert_eq!(receipt.appointment.date, "2025-01-01");
}

#[test]
fn test_doctor_choice_follows_listing_order() {
    let mut clinic = bare_clinic();
    clinic.add_doctor("Dr. A", "Cardio", "H1");
    clinic.add_doctor("Dr. B", "Derm", "H2");
    let bob = clinic.add_patient("Bob", 30, "Flu");

    // Most recently added doctor is listed first.
    let receipt = clinic.book_on(bob, today(), 1, 1, 1).unwrap();
    assert_eq!(receipt.doctor_id, DoctorId(101));
    assert_eq!(receipt.appointment.doctor_name, "Dr. B");
}

#[test]
fn test_history_survives_doctor_deletion() {
    let mut clinic = bare_clinic();
    clinic.add_doctor("Dr. A", "Cardio", "H1");
    let bob = clinic.add_patient("Bob", 30, "Flu");
    clinic.book_on(bob, today(), 1, 1, 1).unwrap();
    clinic.book_on(bob, today(), 2, 1, 4).unwrap();

    clinic.delete_doctor("D100").unwrap();

    let history = clinic.patients().find_by_id(bob).unwrap().history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].date, "2024-12-29");
    assert_eq!(history[0].time, "2:30 PM");
    assert_eq!(history[1].doctor_name, "Dr. A");
    assert!(clinic.doctors().find_by_name("Dr. A").is_err());
}

#[test]
fn test_deleted_patient_stays_in_emergency_queue() {
    let mut clinic = bare_clinic();
    let bob = clinic.add_patient("Bob", 30, "Flu");
    clinic.flag_emergency(bob).unwrap();

    clinic.delete_patient(bob).unwrap();
    assert_eq!(
        clinic.patients().find_by_id(bob).unwrap_err(),
        ClinicError::PatientNotFound(bob)
    );
    assert_eq!(clinic.emergencies().len(), 1);
    assert_eq!(clinic.emergencies().peek().unwrap().patient_name, "Bob");
    assert!(clinic.start_booking_on(bob, today()).is_err());
}

#[test]
fn test_process_empty_emergency_queue() {
    let mut clinic = bare_clinic();
    assert_eq!(clinic.process_emergency().unwrap_err(), ClinicError::EmptyQueue);
    assert!(clinic.emergencies().is_empty());
}

proptest! {
    // Every booking takes exactly one open cell, charges once and adds one
    // history entry; a refused booking changes nothing.
    #[test]
    fn prop_bookings_are_exclusive(
        picks in proptest::collection::vec((1i64..=7, 1i64..=2, 1i64..=10), 1..60)
    ) {
        let mut clinic = bare_clinic();
        clinic.add_doctor("Dr. A", "Cardio", "H1");
        clinic.add_doctor("Dr. B", "Derm", "H2");
        let bob = clinic.add_patient("Bob", 30, "Flu");

        let mut confirmed = 0usize;
        for (date, doctor, slot) in picks {
            let booked_before: usize = clinic.doctors().list().map(|d| d.schedule.booked_count()).sum();
            let result = clinic.book_on(bob, today(), date, doctor, slot);
            let booked_after: usize = clinic.doctors().list().map(|d| d.schedule.booked_count()).sum();

            match result {
                Ok(_) => {
                    confirmed += 1;
                    prop_assert_eq!(booked_after, booked_before + 1);
                }
                Err(_) => prop_assert_eq!(booked_after, booked_before),
            }
        }

        let patient = clinic.patients().find_by_id(bob).unwrap();
        prop_assert_eq!(patient.history().len(), confirmed);
        prop_assert_eq!(patient.bill, 500 * confirmed as u64);

        let mut seen = std::collections::HashSet::new();
        for apt in patient.history() {
            prop_assert!(seen.insert((apt.date.clone(), apt.time, apt.doctor_name.clone())));
        }
    }
}
