//! Interactive console for the clinic desk.
//!
//! Provides the 12-item menu loop. Input and output are generic so a
//! whole session can be scripted from a byte buffer.

use crate::clinic::Clinic;
use crate::error::ClinicError;
use crate::models::{EmergencyEntry, TIME_SLOTS};
use crate::scheduler::BookingSession;
use chrono::NaiveDate;
use std::io::{self, BufRead, Write};
use tracing::warn;

const RESET: &str = "\x1b[0m";
const MAGENTA: &str = "\x1b[1;35m";
const RED: &str = "\x1b[1;31m";
const GREEN: &str = "\x1b[1;32m";
const YELLOW: &str = "\x1b[1;33m";
const BLUE: &str = "\x1b[1;34m";
const CYAN: &str = "\x1b[1;36m";
const BLINK_RED: &str = "\x1b[5;31m";
const BLACK_ON_YELLOW: &str = "\x1b[1;30;43m";

pub const MENU_EXIT: i64 = 12;

pub struct ClinicCli<R, W> {
    clinic: Clinic,
    input: R,
    output: W,
    today: Option<NaiveDate>,
    running: bool,
}

impl<R: BufRead, W: Write> ClinicCli<R, W> {
    pub fn new(clinic: Clinic, input: R, output: W) -> Self {
        ClinicCli {
            clinic,
            input,
            output,
            today: None,
            running: true,
        }
    }

    /// Use a fixed date instead of the wall clock when booking.
    pub fn pinned_to(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn clinic(&self) -> &Clinic {
        &self.clinic
    }

    /// Give back the clinic and the output stream.
    pub fn into_parts(self) -> (Clinic, W) {
        (self.clinic, self.output)
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.clinic.config().color {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        let title = self.paint(MAGENTA, "SMART PATIENT MANAGEMENT SYSTEM");
        writeln!(self.output, "{}", title)?;
        writeln!(self.output, "1. Add Doctor\n2. Add Patient\n3. Book Appointment\n4. View History")?;
        writeln!(
            self.output,
            "5. Handle Emergency\n6. Process Emergency\n7. View Doctors\n8. View Patients"
        )?;
        writeln!(
            self.output,
            "9. Delete Doctor\n10. Delete Patient\n11. View Doctor Schedule\n12. Exit"
        )?;
        Ok(())
    }

    /// Prompt and read one trimmed line. End of input is reported as
    /// `UnexpectedEof` so the menu loop can stop.
    fn get_input(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "console closed"));
        }
        Ok(line.trim().to_string())
    }

    fn get_number(&mut self, prompt: &str) -> io::Result<Result<i64, ClinicError>> {
        let raw = self.get_input(prompt)?;
        Ok(raw
            .parse::<i64>()
            .map_err(|_| ClinicError::InvalidNumber(raw)))
    }

    /// Keep asking until a non-negative whole number is entered.
    fn get_count(&mut self, prompt: &str) -> io::Result<u32> {
        loop {
            let raw = self.get_input(prompt)?;
            if let Ok(value) = raw.parse::<u32>() {
                return Ok(value);
            }
            writeln!(self.output, "Please enter a valid number")?;
        }
    }

    fn get_patient_id(&mut self, prompt: &str) -> io::Result<Result<u32, ClinicError>> {
        let raw = self.get_input(prompt)?;
        Ok(raw.parse::<u32>().map_err(|_| ClinicError::InvalidNumber(raw)))
    }

    fn report(&mut self, err: &ClinicError) -> io::Result<()> {
        warn!(error = %err, "operation refused");
        let message = match err {
            ClinicError::OutOfRange { what: "doctor", .. } => {
                self.paint(BLACK_ON_YELLOW, "Invalid Doctor Choice!")
            }
            _ => err.to_string(),
        };
        writeln!(self.output, "{}", message)
    }

    fn add_doctor(&mut self) -> io::Result<()> {
        let name = self.get_input("Enter doctor name: ")?;
        let specialty = self.get_input(
            "Enter specialty (Options: MBBS, BHMS, CARDIOLOGIST, DERMATOLOGIST, GENERAL): ",
        )?;
        let hospital = self.get_input("Enter hospital: ")?;

        let id = self.clinic.add_doctor(&name, &specialty, &hospital);
        writeln!(self.output, "Doctor added with ID: {}", id)
    }

    fn add_patient(&mut self) -> io::Result<()> {
        let name = self.get_input("Enter patient name: ")?;
        let age = self.get_count("Enter age: ")?;
        let disease = self.get_input("Enter disease: ")?;

        let id = self.clinic.add_patient(&name, age, &disease);
        writeln!(self.output, "Patient ID: {}", id)
    }

    fn book_appointment(&mut self) -> io::Result<()> {
        let patient_id = match self.get_patient_id("Enter patient ID: ")? {
            Ok(id) => id,
            Err(e) => return self.report(&e),
        };
        let started = match self.today {
            Some(today) => self.clinic.start_booking_on(patient_id, today),
            None => self.clinic.start_booking(patient_id),
        };
        let mut session = match started {
            Ok(session) => session,
            Err(e) => return self.report(&e),
        };

        let date = match self.choose_date(&mut session)? {
            Ok(date) => date,
            Err(e) => return self.report(&e),
        };
        let doctor_name = match self.choose_doctor(&mut session)? {
            Ok(name) => name,
            Err(e) => return self.report(&e),
        };
        let slots = match session.open_slots(&self.clinic) {
            Ok(slots) => slots,
            Err(e) => return self.report(&e),
        };
        writeln!(
            self.output,
            "\nAvailable Time Slots for {} on {}:",
            doctor_name, date
        )?;
        for (i, slot) in slots.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, slot)?;
        }

        let receipt = match self
            .get_number("Choose slot number: ")?
            .and_then(|choice| self.clinic.confirm_booking(&session, choice))
        {
            Ok(receipt) => receipt,
            Err(e) => return self.report(&e),
        };

        let banner = self.paint(GREEN, "Appointment Confirmed!");
        writeln!(self.output, "{}", banner)?;
        let apt = &receipt.appointment;
        writeln!(
            self.output,
            "Patient: {}\nDoctor: {} ({})\nHospital: {}\nDate: {}\nTime: {}",
            receipt.patient_name, apt.doctor_name, receipt.specialty, apt.hospital, apt.date, apt.time
        )
    }

    fn choose_date(
        &mut self,
        session: &mut BookingSession,
    ) -> io::Result<Result<String, ClinicError>> {
        writeln!(self.output, "\nAvailable Dates:")?;
        for (i, date) in session.window().labels().iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, date)?;
        }
        Ok(self
            .get_number("Choose a date (1-7): ")?
            .and_then(|choice| session.select_date(choice)))
    }

    fn choose_doctor(
        &mut self,
        session: &mut BookingSession,
    ) -> io::Result<Result<String, ClinicError>> {
        if self.clinic.doctors().is_empty() {
            return Ok(Err(ClinicError::NoDoctors));
        }
        let heading = self.paint(CYAN, "Please select a doctor from the list below:");
        writeln!(self.output, "{}", heading)?;
        let lines: Vec<String> = self
            .clinic
            .doctors()
            .list()
            .enumerate()
            .map(|(i, d)| format!("{}.  {} ({}) - {}", i + 1, d.name, d.specialty, d.hospital))
            .collect();
        for line in lines {
            writeln!(self.output, "{}", line)?;
        }

        let choice = self.get_number("Choose doctor number: ")?;
        Ok(choice
            .and_then(|choice| session.select_doctor(&self.clinic, choice))
            .map(|doctor| doctor.name.clone()))
    }

    fn view_history(&mut self) -> io::Result<()> {
        let patient = match self
            .get_patient_id("Enter patient ID to view history: ")?
            .and_then(|id| self.clinic.patients().find_by_id(id).cloned())
        {
            Ok(patient) => patient,
            Err(e) => return self.report(&e),
        };

        writeln!(self.output, "\nHistory for {}:", patient.name)?;
        if patient.history().is_empty() {
            return writeln!(self.output, "No appointments found.");
        }
        for apt in patient.history() {
            writeln!(
                self.output,
                "Date: {} | Time: {} | Doctor: {} | Hospital: {}",
                apt.date, apt.time, apt.doctor_name, apt.hospital
            )?;
        }
        writeln!(self.output, "Total Bill: Rs {}.00", patient.bill)
    }

    fn write_pending(&mut self, entries: &[EmergencyEntry]) -> io::Result<()> {
        for (i, entry) in entries.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, entry)?;
        }
        Ok(())
    }

    fn handle_emergency(&mut self) -> io::Result<()> {
        let flagged = self
            .get_patient_id("Enter patient ID for emergency: ")?
            .and_then(|id| self.clinic.flag_emergency(id));
        let entry = match flagged {
            Ok(entry) => entry,
            Err(ClinicError::PatientNotFound(_)) => {
                return writeln!(
                    self.output,
                    "Patient not found! Please register the patient first."
                )
            }
            Err(e) => return self.report(&e),
        };

        let label = self.paint(BLINK_RED, "Emergency case added:");
        writeln!(self.output, "{} {}", label, entry)?;

        let heading = self.paint(RED, "Pending Emergency Cases:");
        writeln!(self.output, "\n{}", heading)?;
        let pending: Vec<_> = self.clinic.emergencies().iter().cloned().collect();
        self.write_pending(&pending)
    }

    fn process_emergency(&mut self) -> io::Result<()> {
        let entry = match self.clinic.process_emergency() {
            Ok(entry) => entry,
            Err(e) => return self.report(&e),
        };

        let alert = self.paint(BLINK_RED, "EMERGENCY ALERT!");
        writeln!(self.output, "{}", alert)?;
        let who = self.paint(RED, &entry.to_string());
        writeln!(self.output, "Processing emergency patient: {}", who)?;

        if self.clinic.emergencies().is_empty() {
            return writeln!(self.output, "No other pending emergency cases.");
        }
        let heading = self.paint(YELLOW, "Pending Emergency Cases:");
        writeln!(self.output, "\n{}", heading)?;
        let pending: Vec<_> = self.clinic.emergencies().iter().cloned().collect();
        self.write_pending(&pending)
    }

    fn view_doctors(&mut self) -> io::Result<()> {
        writeln!(self.output, "\nList of Doctors:")?;
        let lines: Vec<String> = self
            .clinic
            .doctors()
            .list()
            .map(|d| format!("ID: {} |  {} ({}) - {}", d.id, d.name, d.specialty, d.hospital))
            .collect();
        for line in lines {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    fn view_patients(&mut self) -> io::Result<()> {
        writeln!(self.output, "\nList of Patients:")?;
        let lines: Vec<String> = self
            .clinic
            .patients()
            .list()
            .map(|p| format!("ID: {} | Name: {} | Age: {} | Disease: {}", p.id, p.name, p.age, p.disease))
            .collect();
        for line in lines {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    fn delete_doctor(&mut self) -> io::Result<()> {
        let id = self.get_input("Enter doctor's ID to delete (e.g., D100): ")?;
        match self.clinic.delete_doctor(&id) {
            Ok(_) => writeln!(self.output, "Doctor with ID {} deleted successfully.", id),
            Err(e) => self.report(&e),
        }
    }

    fn delete_patient(&mut self) -> io::Result<()> {
        let deleted = self
            .get_patient_id("Enter patient ID to delete: ")?
            .and_then(|id| self.clinic.delete_patient(id));
        match deleted {
            Ok(_) => writeln!(self.output, "Patient deleted successfully."),
            Err(e) => self.report(&e),
        }
    }

    fn view_schedule(&mut self) -> io::Result<()> {
        let id = self.get_input("Enter Doctor ID to view schedule (e.g., D100): ")?;
        let (doctor, window) = match self.clinic.schedule(&id) {
            Ok((doctor, window)) => (doctor.clone(), *window),
            Err(e) => return self.report(&e),
        };

        let title = self.paint(BLUE, &format!("Schedule for  {} ({})", doctor.name, doctor.id));
        writeln!(self.output, "\n{}", title)?;

        let mut header = format!("{:<12}", "Date\\Time");
        for slot in TIME_SLOTS {
            header.push_str(&format!("{:<12}", slot));
        }
        writeln!(self.output, "{}", header)?;

        for (date, row) in window.labels().iter().zip(doctor.schedule.rows()) {
            let mut line = format!("{:<12}", date);
            for state in row {
                let cell = format!("{:<12}", state.code());
                let color = if state.is_available() { GREEN } else { RED };
                line.push_str(&self.paint(color, &cell));
            }
            writeln!(self.output, "{}", line.trim_end())?;
        }
        Ok(())
    }

    fn dispatch(&mut self, choice: i64) -> io::Result<()> {
        match choice {
            1 => self.add_doctor(),
            2 => self.add_patient(),
            3 => self.book_appointment(),
            4 => self.view_history(),
            5 => self.handle_emergency(),
            6 => self.process_emergency(),
            7 => self.view_doctors(),
            8 => self.view_patients(),
            9 => self.delete_doctor(),
            10 => self.delete_patient(),
            11 => self.view_schedule(),
            MENU_EXIT => {
                self.running = false;
                writeln!(self.output, "Exiting...")
            }
            _ => writeln!(self.output, "Invalid choice!"),
        }
    }

    /// Run the menu loop until "Exit" is chosen or input runs out.
    pub fn run(&mut self) -> io::Result<()> {
        while self.running {
            self.print_menu()?;
            let step = self
                .get_number("Enter your choice: ")
                .and_then(|choice| self.dispatch(choice.unwrap_or(0)));

            match step {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    self.running = false;
                    writeln!(self.output, "\nExiting...")?;
                }
                Err(e) => return Err(e),
            }
        }
        self.output.flush()
    }
}
