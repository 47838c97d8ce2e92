//! Patient service: list, detail, create, edit, delete and survey submission.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{generate_dna_id, temporary_id, ContactUpdate, NewPatient, Patient, TwinPanels};
use crate::ports::{AnalysisSource, CredentialStore, PatientApi};
use crate::Result;

use super::session::SessionService;

/// Use cases over the patient API.
pub struct PatientService<A, N>
where
    A: PatientApi,
    N: AnalysisSource,
{
    api: Arc<A>,
    analysis: Arc<N>,
}

impl<A, N> Clone for PatientService<A, N>
where
    A: PatientApi,
    N: AnalysisSource,
{
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            analysis: Arc::clone(&self.analysis),
        }
    }
}

impl<A, N> PatientService<A, N>
where
    A: PatientApi,
    N: AnalysisSource,
{
    pub fn new(api: Arc<A>, analysis: Arc<N>) -> Self {
        Self { api, analysis }
    }

    /// # Errors
    /// Returns error if the API call fails.
    pub fn fetch_all(&self) -> Result<Vec<Patient>> {
        let patients = self.api.list_patients()?;
        tracing::info!(count = patients.len(), "Fetched patient list");
        Ok(patients)
    }

    /// # Errors
    /// Returns error if the API call fails or the id is unknown.
    pub fn fetch_one(&self, id: &str) -> Result<Patient> {
        Ok(self.api.get_patient(id)?)
    }

    /// Validate the form, assign a temporary id and a fresh DNA kit id, then create.
    ///
    /// Returns the record as stored by the server.
    ///
    /// # Errors
    /// Validation errors block the request; API errors are passed through.
    pub fn add(&self, form: NewPatient) -> Result<Patient> {
        form.validate()?;

        let dna_id = generate_dna_id(&mut rand::thread_rng());
        let draft = form.into_patient(temporary_id(Utc::now()), dna_id);
        let created = self.api.create_patient(&draft)?;
        tracing::info!(id = %created.id, "Created patient");
        Ok(created)
    }

    /// Apply edited contact fields and PATCH the record.
    ///
    /// # Errors
    /// Validation errors block the request; API errors are passed through.
    pub fn update_contact(&self, patient: &Patient, update: &ContactUpdate) -> Result<Patient> {
        update.validate(patient.dob.as_deref())?;

        let draft = update.apply_to(patient);
        let mut updated = self.api.update_patient(&patient.id, &draft)?;
        updated.sync_name();
        tracing::info!(id = %updated.id, "Updated patient contact details");
        Ok(updated)
    }

    /// Confirm with the account password, then delete.
    ///
    /// Nothing is sent to the API unless the password matches.
    ///
    /// # Errors
    /// Auth errors for an empty or wrong password; API errors are passed through.
    pub fn delete_confirmed<C>(&self, session: &SessionService<C>, id: &str, password: &str) -> Result<()>
    where
        C: CredentialStore,
    {
        session.verify_password(password)?;
        self.api.delete_patient(id)?;
        tracing::info!(id = %id, "Deleted patient");
        Ok(())
    }

    /// PATCH the whole survey draft.
    ///
    /// # Errors
    /// Returns error if the API call fails.
    pub fn submit_survey(&self, draft: &Patient) -> Result<Patient> {
        let mut updated = self.api.update_patient(&draft.id, draft)?;
        updated.sync_name();
        tracing::info!(id = %updated.id, "Submitted survey");
        Ok(updated)
    }

    /// What the analysis panels should show for a patient.
    #[must_use]
    pub fn twin_panels(&self, patient: &Patient) -> TwinPanels {
        TwinPanels::for_patient(patient, self.analysis.twin_summary(patient))
    }
}

/// The roster shown on the patient list screen.
#[derive(Debug, Clone, Default)]
pub struct PatientList {
    patients: Vec<Patient>,
}

impl PatientList {
    #[must_use]
    pub fn new(patients: Vec<Patient>) -> Self {
        Self { patients }
    }

    #[must_use]
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patients.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    pub fn append(&mut self, patient: Patient) {
        self.patients.push(patient);
    }

    /// Replace the record with the same id. Returns false if absent.
    pub fn replace(&mut self, patient: Patient) -> bool {
        match self.patients.iter_mut().find(|p| p.id == patient.id) {
            Some(slot) => {
                *slot = patient;
                true
            }
            None => false,
        }
    }

    /// Remove exactly the record with this id.
    pub fn remove(&mut self, id: &str) -> Option<Patient> {
        let idx = self.patients.iter().position(|p| p.id == id)?;
        Some(self.patients.remove(idx))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fixture::FixtureAnalysis;
    use crate::adapters::memory::InMemoryPatientApi;
    use crate::adapters::sqlite::SqliteCredentialStore;
    use crate::application::AuthError;
    use crate::domain::{is_valid_dna_id, DnaStatus, ValidationError};
    use crate::ports::DEFAULT_PASSWORD;
    use crate::CareError;

    fn service() -> PatientService<InMemoryPatientApi, FixtureAnalysis> {
        PatientService::new(Arc::new(InMemoryPatientApi::with_fixtures()), Arc::new(FixtureAnalysis))
    }

    fn new_patient() -> NewPatient {
        NewPatient {
            first_name: "하나".to_string(),
            last_name: "한".to_string(),
            biological_sex: "Female".to_string(),
            dob: "02/28/1990".to_string(),
            phone_number: "010-2222-3333".to_string(),
            address: "인천시 연수구".to_string(),
            address2: String::new(),
            city: "인천".to_string(),
            state: "인천".to_string(),
            zipcode: "21000".to_string(),
            country: "South Korea".to_string(),
        }
    }

    #[test]
    fn test_add_patient() {
        let service = service();
        let created = service.add(new_patient()).expect("Should create");
        assert_eq!(created.id, "patient-6");
        assert_eq!(created.name, "한하나");
        assert_eq!(created.dna_status, DnaStatus::AwaitingSample);
        assert!(is_valid_dna_id(&created.dna_id));
        assert_eq!(service.fetch_all().expect("Should list").len(), 6);
    }

    #[test]
    fn test_invalid_form_sends_nothing() {
        let service = service();
        let mut form = new_patient();
        form.dob = "13/40/2020".to_string();
        assert!(matches!(
            service.add(form),
            Err(CareError::Validation(ValidationError::InvalidDob))
        ));
        assert_eq!(service.fetch_all().expect("Should list").len(), 5);
    }

    #[test]
    fn test_update_contact() {
        let service = service();
        let patient = service.fetch_one("patient-3").expect("Should exist");
        let mut update = ContactUpdate::from_patient(&patient);
        update.city = "포항".to_string();

        let updated = service.update_contact(&patient, &update).expect("Should update");
        assert_eq!(updated.city.as_deref(), Some("포항"));
        assert_eq!(updated.name, "박민준");
    }

    #[test]
    fn test_delete_requires_password() {
        let service = service();
        let session = SessionService::new(Arc::new(
            SqliteCredentialStore::in_memory().expect("Should create db"),
        ));

        assert!(matches!(
            service.delete_confirmed(&session, "patient-2", "wrong"),
            Err(CareError::Auth(AuthError::PasswordRejected))
        ));
        assert_eq!(service.fetch_all().expect("Should list").len(), 5);

        service
            .delete_confirmed(&session, "patient-2", DEFAULT_PASSWORD)
            .expect("Should delete");
        let remaining = service.fetch_all().expect("Should list");
        assert_eq!(remaining.len(), 4);
        assert!(remaining.iter().all(|p| p.id != "patient-2"));
    }

    #[test]
    fn test_twin_panels() {
        let service = service();
        let waiting = Patient::new("p", "하나", "한", DnaStatus::AwaitingSample, "PRDV-AAAA-BBBB-CCCC");
        assert_eq!(service.twin_panels(&waiting), TwinPanels::Pending);

        let done = service.fetch_one("patient-1").expect("Should exist");
        assert!(matches!(service.twin_panels(&done), TwinPanels::Ready(_)));
    }

    #[test]
    fn test_roster_edits() {
        let mut list = PatientList::new(crate::adapters::memory::sample_patients());
        let mut changed = list.get("patient-4").expect("Should exist").clone();
        changed.city = Some("목포".to_string());
        assert!(list.replace(changed));
        assert_eq!(list.get("patient-4").and_then(|p| p.city.as_deref()), Some("목포"));

        let removed = list.remove("patient-1").expect("Should remove");
        assert_eq!(removed.name, "김철수");
        assert_eq!(list.len(), 4);
        assert!(list.remove("patient-1").is_none());
        assert_eq!(list.len(), 4);
    }
}
