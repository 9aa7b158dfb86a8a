//! Doctor and patient registries.
//!
//! Both registries hand out strictly increasing IDs that are never
//! reused, and both list their records most recently added first.
//! Records are kept in ID order internally, so listing is just a
//! reverse walk.

use crate::error::{ClinicError, Result};
use crate::models::{Doctor, DoctorId, Patient};
use std::collections::BTreeMap;
use tracing::info;

/// Registry of doctors keyed by [`DoctorId`].
#[derive(Debug, Clone)]
pub struct DoctorRegistry {
    doctors: BTreeMap<DoctorId, Doctor>,
    next_id: u32,
}

impl DoctorRegistry {
    pub fn new(first_id: u32) -> Self {
        DoctorRegistry {
            doctors: BTreeMap::new(),
            next_id: first_id,
        }
    }

    /// Register a doctor with a fully open schedule. No uniqueness check
    /// is made on any of the fields.
    pub fn add(&mut self, name: &str, specialty: &str, hospital: &str) -> DoctorId {
        let id = DoctorId(self.next_id);
        self.next_id += 1;

        let doctor = Doctor::new(
            id,
            name.to_string(),
            specialty.to_string(),
            hospital.to_string(),
        );
        self.doctors.insert(id, doctor);
        info!(doctor_id = %id, name, specialty, hospital, "doctor added");
        id
    }

    /// Remove a doctor by its exact displayed ID.
    ///
    /// Appointments already booked with this doctor keep their copies of
    /// the doctor's name and hospital.
    pub fn delete(&mut self, id: &str) -> Result<Doctor> {
        let key: DoctorId = id.parse()?;
        let doctor = self
            .doctors
            .remove(&key)
            .ok_or_else(|| ClinicError::DoctorNotFound(id.to_string()))?;
        info!(doctor_id = %key, "doctor deleted");
        Ok(doctor)
    }

    /// First doctor with this exact name, in listing order.
    pub fn find_by_name(&self, name: &str) -> Result<&Doctor> {
        self.list()
            .find(|doctor| doctor.name == name)
            .ok_or_else(|| ClinicError::DoctorNameNotFound(name.to_string()))
    }

    pub fn find_by_id(&self, id: &str) -> Result<&Doctor> {
        let key: DoctorId = id.parse()?;
        self.get(key)
            .ok_or_else(|| ClinicError::DoctorNotFound(id.to_string()))
    }

    pub fn get(&self, id: DoctorId) -> Option<&Doctor> {
        self.doctors.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: DoctorId) -> Option<&mut Doctor> {
        self.doctors.get_mut(&id)
    }

    /// Doctors, most recently added first.
    pub fn list(&self) -> impl Iterator<Item = &Doctor> {
        self.doctors.values().rev()
    }

    /// The doctor at a 1-based position in [`list`](Self::list) order.
    pub fn nth_listed(&self, position: usize) -> Option<&Doctor> {
        position.checked_sub(1).and_then(|index| self.list().nth(index))
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }
}

/// Registry of patients keyed by numeric ID.
#[derive(Debug, Clone)]
pub struct PatientRegistry {
    patients: BTreeMap<u32, Patient>,
    next_id: u32,
}

impl PatientRegistry {
    pub fn new(first_id: u32) -> Self {
        PatientRegistry {
            patients: BTreeMap::new(),
            next_id: first_id,
        }
    }

    /// Register a patient with an empty bill and history.
    pub fn add(&mut self, name: &str, age: u32, disease: &str) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        self.patients.insert(
            id,
            Patient::new(id, name.to_string(), age, disease.to_string()),
        );
        info!(patient_id = id, name, age, "patient added");
        id
    }

    /// Remove a patient along with their history.
    pub fn delete(&mut self, id: u32) -> Result<Patient> {
        let patient = self
            .patients
            .remove(&id)
            .ok_or(ClinicError::PatientNotFound(id))?;
        info!(patient_id = id, "patient deleted");
        Ok(patient)
    }

    pub fn find_by_id(&self, id: u32) -> Result<&Patient> {
        self.patients.get(&id).ok_or(ClinicError::PatientNotFound(id))
    }

    pub(crate) fn find_by_id_mut(&mut self, id: u32) -> Result<&mut Patient> {
        self.patients
            .get_mut(&id)
            .ok_or(ClinicError::PatientNotFound(id))
    }

    /// Patients, most recently added first.
    pub fn list(&self) -> impl Iterator<Item = &Patient> {
        self.patients.values().rev()
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_doctor_ids_start_at_first_id() {
        let mut doctors = DoctorRegistry::new(100);
        assert_eq!(doctors.add("Dr. A", "Cardio", "H1").to_string(), "D100");
        assert_eq!(doctors.add("Dr. B", "Derm", "H2").to_string(), "D101");
    }

    #[test]
    fn test_doctor_ids_not_reused_after_delete() {
        let mut doctors = DoctorRegistry::new(100);
        doctors.add("Dr. A", "Cardio", "H1");
        let second = doctors.add("Dr. B", "Derm", "H2");
        doctors.delete(&second.to_string()).unwrap();
        assert_eq!(doctors.add("Dr. C", "GP", "H3").to_string(), "D102");
    }

    #[test]
    fn test_doctor_list_is_most_recent_first() {
        let mut doctors = DoctorRegistry::new(100);
        doctors.add("Dr. A", "Cardio", "H1");
        doctors.add("Dr. B", "Derm", "H2");
        doctors.add("Dr. C", "GP", "H3");
        let names: Vec<_> = doctors.list().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Dr. C", "Dr. B", "Dr. A"]);
        assert_eq!(doctors.nth_listed(1).unwrap().name, "Dr. C");
        assert_eq!(doctors.nth_listed(3).unwrap().name, "Dr. A");
        assert!(doctors.nth_listed(0).is_none());
        assert!(doctors.nth_listed(4).is_none());
    }

    #[test]
    fn test_doctor_delete_unknown_is_not_found() {
        let mut doctors = DoctorRegistry::new(100);
        doctors.add("Dr. A", "Cardio", "H1");
        assert_eq!(
            doctors.delete("D999").unwrap_err(),
            ClinicError::DoctorNotFound("D999".into())
        );
        assert_eq!(
            doctors.delete("nonsense").unwrap_err(),
            ClinicError::DoctorNotFound("nonsense".into())
        );
        assert_eq!(doctors.len(), 1);
    }

    #[test]
    fn test_find_doctor_by_name_and_id() {
        let mut doctors = DoctorRegistry::new(100);
        doctors.add("Dr. A", "Cardio", "H1");
        let twin = doctors.add("Dr. A", "Derm", "H2");

        // Same name twice: the most recently added one is found first.
        assert_eq!(doctors.find_by_name("Dr. A").unwrap().id, twin);
        assert!(matches!(
            doctors.find_by_name("Dr. Z"),
            Err(ClinicError::DoctorNameNotFound(_))
        ));
        assert_eq!(doctors.find_by_id("D100").unwrap().specialty, "Cardio");
        assert!(doctors.find_by_id("D100x").is_err());
    }

    #[test]
    fn test_patient_ids_and_lookup() {
        let mut patients = PatientRegistry::new(100);
        let bob = patients.add("Bob", 30, "Flu");
        let amy = patients.add("Amy", 41, "Asthma");
        assert_eq!(bob, 100);
        assert_eq!(amy, 101);

        let found = patients.find_by_id(100).unwrap();
        assert_eq!(found.name, "Bob");
        assert_eq!(found.bill, 0);

        let names: Vec<_> = patients.list().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Amy", "Bob"]);
    }

    #[test]
    fn test_patient_delete_then_lookup_fails() {
        let mut patients = PatientRegistry::new(100);
        patients.add("Bob", 30, "Flu");
        patients.delete(100).unwrap();
        assert_eq!(
            patients.find_by_id(100).unwrap_err(),
            ClinicError::PatientNotFound(100)
        );
        assert!(patients.delete(100).is_err());
        assert_eq!(patients.add("Cal", 22, "Cold"), 101);
    }

    proptest! {
        #[test]
        fn prop_doctor_ids_strictly_increase(deletes in proptest::collection::vec(any::<bool>(), 1..40)) {
            let mut doctors = DoctorRegistry::new(100);
            let mut issued = Vec::new();
            for delete in deletes {
                let id = doctors.add("Dr. X", "GP", "H");
                if delete {
                    doctors.delete(&id.to_string()).unwrap();
                }
                issued.push(id.0);
            }
            prop_assert!(issued.windows(2).all(|pair| pair[0] < pair[1]));
            prop_assert_eq!(issued[0], 100);
        }

        #[test]
        fn prop_patient_ids_strictly_increase(deletes in proptest::collection::vec(any::<bool>(), 1..40)) {
            let mut patients = PatientRegistry::new(100);
            let mut issued = Vec::new();
            for delete in deletes {
                let id = patients.add("P", 1, "D");
                if delete {
                    patients.delete(id).unwrap();
                }
                issued.push(id);
            }
            prop_assert!(issued.windows(2).all(|pair| pair[0] < pair[1]));
            prop_assert_eq!(issued[0], 100);
        }
    }
}
