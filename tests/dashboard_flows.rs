//! End-to-end flows through the application services, against the in-memory
//! patient API and an in-memory credential store.

use std::sync::Arc;

use predictivcare::adapters::fixture::FixtureAnalysis;
use predictivcare::adapters::memory::InMemoryPatientApi;
use predictivcare::adapters::sqlite::SqliteCredentialStore;
use predictivcare::application::{
    resolve, sidebar_links, AuthError, HistorySection, PatientFilter, PatientList, PatientService, Route,
    SessionService, StatusFilter, SurveyWizard, DEMO_EMAIL,
};
use predictivcare::domain::{Condition, ContactUpdate, NewPatient, SurveyField, SurveyToggle, TwinPanels};
use predictivcare::ports::DEFAULT_PASSWORD;
use predictivcare::{CareError, DnaStatus};

type Service = PatientService<InMemoryPatientApi, FixtureAnalysis>;

fn services() -> (Service, SessionService<SqliteCredentialStore>) {
    let patients = PatientService::new(Arc::new(InMemoryPatientApi::with_fixtures()), Arc::new(FixtureAnalysis));
    let session = SessionService::new(Arc::new(
        SqliteCredentialStore::in_memory().expect("Should create db"),
    ));
    (patients, session)
}

fn new_patient() -> NewPatient {
    NewPatient {
        first_name: "하나".to_string(),
        last_name: "한".to_string(),
        biological_sex: "Female".to_string(),
        dob: "02/14/1990".to_string(),
        phone_number: "010-1111-2222".to_string(),
        address: "서울시 마포구".to_string(),
        address2: String::new(),
        city: "서울".to_string(),
        state: "서울".to_string(),
        zipcode: "04000".to_string(),
        country: "South Korea".to_string(),
    }
}

#[test]
fn test_login_gates_protected_routes() {
    let (_, session) = services();
    assert!(!session.is_authenticated());
    assert_eq!(resolve(Route::PatientList, false), Route::Login);
    assert!(sidebar_links(&Route::PatientList, false).is_none());

    assert_eq!(
        session.login(DEMO_EMAIL, "wrong"),
        Err(AuthError::InvalidCredentials)
    );
    session.login(DEMO_EMAIL, DEFAULT_PASSWORD).expect("Should log in");
    assert!(session.is_authenticated());
    assert_eq!(resolve(Route::Root, true), Route::PatientList);

    session.logout().expect("Should log out");
    assert_eq!(resolve(Route::Profile, session.is_authenticated()), Route::Login);
}

#[test]
fn test_invalid_dob_leaves_list_unchanged() {
    let (patients, _) = services();
    let mut form = new_patient();
    form.dob = "13/40/2020".to_string();

    let err = patients.add(form).expect_err("Should reject");
    assert!(matches!(err, CareError::Validation(_)));
    assert_eq!(patients.fetch_all().expect("Should list").len(), 5);
}

#[test]
fn test_added_patient_is_awaiting_sample() {
    let (patients, _) = services();
    let created = patients.add(new_patient()).expect("Should create");
    assert_eq!(created.name, "한하나");
    assert_eq!(created.dna_status, DnaStatus::AwaitingSample);
    assert_eq!(patients.twin_panels(&created), TwinPanels::Pending);

    let mut list = PatientList::new(patients.fetch_all().expect("Should list"));
    assert!(list.get(&created.id).is_some());
    list.remove(&created.id);
    assert_eq!(list.len(), 5);
}

#[test]
fn test_delete_requires_matching_password() {
    let (patients, session) = services();

    let err = patients
        .delete_confirmed(&session, "patient-2", "nope")
        .expect_err("Should reject");
    assert_eq!(err.user_message(), "비밀번호가 일치하지 않습니다. 환자를 삭제할 수 없습니다.");
    assert_eq!(patients.fetch_all().expect("Should list").len(), 5);

    patients
        .delete_confirmed(&session, "patient-2", DEFAULT_PASSWORD)
        .expect("Should delete");
    let remaining = patients.fetch_all().expect("Should list");
    assert_eq!(remaining.len(), 4);
    assert!(remaining.iter().all(|p| p.id != "patient-2"));
}

#[test]
fn test_name_and_status_filters() {
    let (patients, _) = services();
    let roster = patients.fetch_all().expect("Should list");

    let by_name = PatientFilter {
        term: "철수".to_string(),
        ..PatientFilter::default()
    };
    let names: Vec<&str> = by_name.apply(&roster).map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["김철수"]);

    let by_status = PatientFilter {
        status: StatusFilter::Only(DnaStatus::Completed),
        ..PatientFilter::default()
    };
    assert!(by_status.apply(&roster).all(|p| p.dna_status == DnaStatus::Completed));
    assert!(by_status.apply(&roster).count() >= 1);
}

#[test]
fn test_unchecked_condition_is_submitted_without_detail() {
    let (patients, _) = services();
    let mut wizard = SurveyWizard::new(patients.fetch_one("patient-3").expect("Should exist"));

    wizard.set_condition(HistorySection::Diagnosed, Condition::Diabetes, true);
    assert!(wizard.set_condition_detail(HistorySection::Diagnosed, Condition::Diabetes, "45"));
    wizard.set_condition(HistorySection::Diagnosed, Condition::Diabetes, false);

    let submitted = patients.submit_survey(wizard.draft()).expect("Should submit");
    let diagnosed = submitted.survey.diagnosed_diseases.expect("Section should exist");
    assert!(!diagnosed.is_checked(Condition::Diabetes));
    assert_eq!(diagnosed.detail(Condition::Diabetes), None);

    let stored = patients.fetch_one("patient-3").expect("Should exist");
    assert_eq!(stored.survey.diagnosed_diseases, Some(diagnosed));
}

#[test]
fn test_erased_answers_and_address_line_persist() {
    let (patients, _) = services();
    let mut wizard = SurveyWizard::new(patients.fetch_one("patient-2").expect("Should exist"));
    wizard.set_field(SurveyField::CurrentMedications, "aspirin");
    wizard.set_toggle(SurveyToggle::BirthDefects, true);
    wizard.set_field(SurveyField::BirthDefectsDetails, "구순열");
    patients.submit_survey(wizard.draft()).expect("Should submit");

    let mut wizard = SurveyWizard::new(patients.fetch_one("patient-2").expect("Should exist"));
    assert_eq!(wizard.draft().survey.current_medications.as_deref(), Some("aspirin"));
    wizard.set_field(SurveyField::CurrentMedications, "");
    wizard.set_toggle(SurveyToggle::BirthDefects, false);
    patients.submit_survey(wizard.draft()).expect("Should submit");

    let stored = patients.fetch_one("patient-2").expect("Should exist");
    assert_eq!(stored.survey.current_medications, None);
    assert_eq!(stored.survey.birth_defects_details, None);

    assert!(stored.address2.is_some());
    let mut update = ContactUpdate::from_patient(&stored);
    update.address2.clear();
    patients.update_contact(&stored, &update).expect("Should update");
    assert_eq!(patients.fetch_one("patient-2").expect("Should exist").address2, None);
}

#[test]
fn test_sidebar_link_sets() {
    let detail = sidebar_links(&Route::Survey("patient-1".to_string()), true).expect("Visible");
    assert_eq!(detail.len(), 6);
    assert_eq!(detail[1].target, None);

    let general = sidebar_links(&Route::About, true).expect("Visible");
    let targets: Vec<Option<Route>> = general.into_iter().map(|l| l.target).collect();
    assert_eq!(
        targets,
        vec![
            Some(Route::PatientList),
            Some(Route::Profile),
            Some(Route::About),
            Some(Route::Logout),
        ]
    );
}
