//! Background request worker.
//!
//! Every API call runs on a short-lived thread so the TUI loop keeps drawing.
//! Results come back over one mpsc channel that the loop drains each tick.
//! Each outcome carries the route that issued it so the app can drop results
//! for screens the user already left.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use zeroize::Zeroize;

use crate::application::{PatientService, Route, SessionService};
use crate::domain::{ContactUpdate, NewPatient, Patient};
use crate::ports::{AnalysisSource, CredentialStore, PatientApi};

/// A request issued by a screen.
#[derive(Debug, Clone)]
pub enum ApiRequest {
    LoadList,
    LoadPatient(String),
    AddPatient(NewPatient),
    UpdateContact { patient: Patient, update: ContactUpdate },
    Delete { id: String, password: String },
    SubmitSurvey(Patient),
}

impl ApiRequest {
    fn name(&self) -> &'static str {
        match self {
            Self::LoadList => "load_list",
            Self::LoadPatient(_) => "load_patient",
            Self::AddPatient(_) => "add_patient",
            Self::UpdateContact { .. } => "update_contact",
            Self::Delete { .. } => "delete_patient",
            Self::SubmitSurvey(_) => "submit_survey",
        }
    }
}

/// What a successful request produced.
#[derive(Debug, Clone)]
pub enum ApiResponse {
    List(Vec<Patient>),
    Patient(Patient),
    Added(Patient),
    Updated(Patient),
    Deleted(String),
    SurveySubmitted(Patient),
}

/// Which request failed, so the screen knows where to show the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Load,
    Add,
    Update,
    Delete,
    Survey,
}

/// A finished request.
#[derive(Debug, Clone)]
pub struct ApiOutcome {
    /// Route that was current when the request was issued
    pub route: Route,
    pub kind: RequestKind,
    /// Localized error text on failure
    pub result: Result<ApiResponse, String>,
}

/// Spawns request threads and collects their outcomes.
pub struct ApiWorker<A, N, C>
where
    A: PatientApi + 'static,
    N: AnalysisSource + 'static,
    C: CredentialStore + 'static,
{
    patients: PatientService<A, N>,
    session: SessionService<C>,
    tx: Sender<ApiOutcome>,
    rx: Receiver<ApiOutcome>,
    in_flight: usize,
}

impl<A, N, C> ApiWorker<A, N, C>
where
    A: PatientApi + 'static,
    N: AnalysisSource + 'static,
    C: CredentialStore + 'static,
{
    pub fn new(patients: PatientService<A, N>, session: SessionService<C>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            patients,
            session,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Run a request on its own thread, tagged with the issuing route.
    pub fn spawn(&mut self, route: Route, request: ApiRequest) -> JoinHandle<()> {
        let patients = self.patients.clone();
        let session = self.session.clone();
        let tx = self.tx.clone();
        self.in_flight += 1;

        tracing::debug!(request = request.name(), route = %route, "Dispatching request");
        thread::spawn(move || {
            let kind = kind_of(&request);
            let result = execute(&patients, &session, request);
            // The receiver is gone only when the app has shut down.
            let _ = tx.send(ApiOutcome { route, kind, result });
        })
    }

    /// Try to receive the next finished request (non-blocking).
    #[must_use]
    pub fn try_recv(&mut self) -> Option<ApiOutcome> {
        let outcome = self.rx.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(outcome)
    }

    /// Requests spawned but not yet received.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

fn kind_of(request: &ApiRequest) -> RequestKind {
    match request {
        ApiRequest::LoadList | ApiRequest::LoadPatient(_) => RequestKind::Load,
        ApiRequest::AddPatient(_) => RequestKind::Add,
        ApiRequest::UpdateContact { .. } => RequestKind::Update,
        ApiRequest::Delete { .. } => RequestKind::Delete,
        ApiRequest::SubmitSurvey(_) => RequestKind::Survey,
    }
}

fn execute<A, N, C>(
    patients: &PatientService<A, N>,
    session: &SessionService<C>,
    request: ApiRequest,
) -> Result<ApiResponse, String>
where
    A: PatientApi,
    N: AnalysisSource,
    C: CredentialStore,
{
    let name = request.name();
    let result = match request {
        ApiRequest::LoadList => patients.fetch_all().map(ApiResponse::List),
        ApiRequest::LoadPatient(id) => patients.fetch_one(&id).map(ApiResponse::Patient),
        ApiRequest::AddPatient(form) => patients.add(form).map(ApiResponse::Added),
        ApiRequest::UpdateContact { patient, update } => patients
            .update_contact(&patient, &update)
            .map(ApiResponse::Updated),
        ApiRequest::Delete { id, mut password } => {
            let result = patients.delete_confirmed(session, &id, &password);
            password.zeroize();
            result.map(|()| ApiResponse::Deleted(id))
        }
        ApiRequest::SubmitSurvey(draft) => patients.submit_survey(&draft).map(ApiResponse::SurveySubmitted),
    };

    result.map_err(|e| {
        tracing::warn!(request = name, "Request failed: {e}");
        e.user_message()
    })
}
