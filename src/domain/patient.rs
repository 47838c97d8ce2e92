//! Patient records as exchanged with the collaborator API.
//!
//! Keys are camelCase on the wire. Survey answers are stored as top-level
//! keys of the same record (see [`Survey`]).

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::survey::Survey;

/// Prefix of every generated DNA kit identifier.
pub const DNA_ID_PREFIX: &str = "PRDV";

const DNA_ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const DNA_ID_GROUPS: usize = 3;
const DNA_ID_GROUP_LEN: usize = 4;

/// Biological sex choices offered by the add-patient form (wire value, label).
pub const BIOLOGICAL_SEX_CHOICES: [(&str, &str); 3] =
    [("Male", "남성"), ("Female", "여성"), ("Other", "기타")];

/// Country choices offered by the patient forms (wire value, label).
pub const COUNTRY_CHOICES: [(&str, &str); 3] = [
    ("South Korea", "대한민국"),
    ("USA", "미국"),
    ("Canada", "캐나다"),
];

static DOB_PATTERN: OnceLock<Regex> = OnceLock::new();
static DNA_ID_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Errors raised by client-side validation of patient input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Date of birth is not MM/DD/YYYY")]
    InvalidDob,

    #[error("Unknown DNA status: {0}")]
    UnknownStatus(String),

    #[error("First and last name are required")]
    EmptyName,
}

impl ValidationError {
    /// Localized text shown inline in the form.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "모든 필수 정보를 입력해주세요.",
            Self::InvalidDob => "생년월일 형식이 올바르지 않습니다 (MM/DD/YYYY).",
            Self::UnknownStatus(_) => "알 수 없는 DNA 분석 상태입니다.",
            Self::EmptyName => "이름과 성을 모두 입력해주세요.",
        }
    }
}

/// Lifecycle stage of a patient's sample and analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DnaStatus {
    #[serde(rename = "Awaiting Sample")]
    AwaitingSample,
    #[serde(rename = "Sample Received")]
    SampleReceived,
    #[serde(rename = "Sample Extracted")]
    SampleExtracted,
    #[serde(rename = "DNA Sequenced")]
    DnaSequenced,
    #[serde(rename = "DNA Analyzed")]
    DnaAnalyzed,
    #[serde(rename = "Building Digital Twin")]
    BuildingDigitalTwin,
    #[serde(rename = "Awaiting Genetic Counseling")]
    AwaitingGeneticCounseling,
    #[serde(rename = "Not reachable")]
    NotReachable,
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "Analyzing")]
    Analyzing,
}

impl DnaStatus {
    /// Every status in display order.
    pub const ALL: [DnaStatus; 10] = [
        DnaStatus::AwaitingSample,
        DnaStatus::SampleReceived,
        DnaStatus::SampleExtracted,
        DnaStatus::DnaSequenced,
        DnaStatus::DnaAnalyzed,
        DnaStatus::BuildingDigitalTwin,
        DnaStatus::AwaitingGeneticCounseling,
        DnaStatus::NotReachable,
        DnaStatus::Completed,
        DnaStatus::Analyzing,
    ];

    /// Value used by the collaborator API.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingSample => "Awaiting Sample",
            Self::SampleReceived => "Sample Received",
            Self::SampleExtracted => "Sample Extracted",
            Self::DnaSequenced => "DNA Sequenced",
            Self::DnaAnalyzed => "DNA Analyzed",
            Self::BuildingDigitalTwin => "Building Digital Twin",
            Self::AwaitingGeneticCounseling => "Awaiting Genetic Counseling",
            Self::NotReachable => "Not reachable",
            Self::Completed => "Completed",
            Self::Analyzing => "Analyzing",
        }
    }

    /// Localized label shown in lists, filters and the detail header.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::AwaitingSample => "샘플 대기 중",
            Self::SampleReceived => "샘플 수령 완료",
            Self::SampleExtracted => "샘플 추출 완료",
            Self::DnaSequenced => "DNA 서열 분석 완료",
            Self::DnaAnalyzed => "DNA 데이터 분석 완료",
            Self::BuildingDigitalTwin => "디지털 트윈 생성 중",
            Self::AwaitingGeneticCounseling => "유전자 상담 대기 중",
            Self::NotReachable => "연락 불가",
            Self::Completed => "모든 과정 완료",
            Self::Analyzing => "데이터 분석 중",
        }
    }

    /// No sample has arrived yet, so no analysis exists.
    #[must_use]
    pub fn is_awaiting_sample(&self) -> bool {
        matches!(self, Self::AwaitingSample)
    }
}

impl fmt::Display for DnaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DnaStatus {
    type Err = ValidationError;

    /// Exact, case-sensitive match on the wire value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownStatus(s.to_string()))
    }
}

/// A patient record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,

    /// `last_name` + `first_name`, no separator
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    pub dna_status: DnaStatus,

    #[serde(default)]
    pub dna_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_summary: Option<String>,

    /// MM/DD/YYYY
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biological_sex: Option<String>,

    /// Editable contact fields always serialize; `null` clears them on PATCH.
    #[serde(default)]
    pub phone_number: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub address2: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub zipcode: Option<String>,

    #[serde(default)]
    pub country: Option<String>,

    /// Set by the API when a record is soft-deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub survey: Survey,
}

impl Patient {
    /// Create a bare record with the given names; `name` is derived.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        dna_status: DnaStatus,
        dna_id: impl Into<String>,
    ) -> Self {
        let mut patient = Self {
            id: id.into(),
            name: String::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            dna_status,
            dna_id: dna_id.into(),
            age: None,
            height: None,
            weight: None,
            ethnicity: None,
            occupation: None,
            health_summary: None,
            dob: None,
            biological_sex: None,
            phone_number: None,
            address: None,
            address2: None,
            city: None,
            state: None,
            zipcode: None,
            country: None,
            deleted_at: None,
            survey: Survey::default(),
        };
        patient.sync_name();
        patient
    }

    /// Recompute `name` from the name parts.
    ///
    /// Legacy records that carry only `name` keep it untouched.
    pub fn sync_name(&mut self) {
        if self.first_name.is_empty() && self.last_name.is_empty() {
            return;
        }
        self.name = full_name(&self.last_name, &self.first_name);
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.first_name = first_name.into();
        self.sync_name();
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.last_name = last_name.into();
        self.sync_name();
    }

    /// Name used in headings and lists.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.first_name.is_empty() && self.last_name.is_empty() {
            self.name.clone()
        } else {
            full_name(&self.last_name, &self.first_name)
        }
    }

    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Korean-order full name: family name first, no separator.
#[must_use]
pub fn full_name(last_name: &str, first_name: &str) -> String {
    format!("{last_name}{first_name}")
}

/// Check a date of birth against the strict `MM/DD/YYYY` pattern (years 1900-2099).
#[must_use]
pub fn is_valid_dob(dob: &str) -> bool {
    DOB_PATTERN
        .get_or_init(|| {
            Regex::new(r"^(0[1-9]|1[0-2])/(0[1-9]|[12]\d|3[01])/(19|20)\d{2}$")
                .expect("Valid regex")
        })
        .is_match(dob)
}

/// Generate a DNA kit identifier: `PRDV-XXXX-XXXX-XXXX`.
pub fn generate_dna_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut id = String::with_capacity(DNA_ID_PREFIX.len() + DNA_ID_GROUPS * (DNA_ID_GROUP_LEN + 1));
    id.push_str(DNA_ID_PREFIX);
    for _ in 0..DNA_ID_GROUPS {
        id.push('-');
        for _ in 0..DNA_ID_GROUP_LEN {
            let idx = rng.gen_range(0..DNA_ID_ALPHABET.len());
            id.push(DNA_ID_ALPHABET[idx] as char);
        }
    }
    id
}

#[must_use]
pub fn is_valid_dna_id(id: &str) -> bool {
    DNA_ID_PATTERN
        .get_or_init(|| Regex::new(r"^PRDV(-[A-Z0-9]{4}){3}$").expect("Valid regex"))
        .is_match(id)
}

/// Client-side placeholder id used until the API assigns one.
#[must_use]
pub fn temporary_id(now: DateTime<Utc>) -> String {
    format!("temp-{}", now.timestamp_millis())
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Input collected by the add-patient form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub biological_sex: String,
    pub dob: String,
    pub phone_number: String,
    pub address: String,
    /// Optional second address line
    pub address2: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub country: String,
}

impl NewPatient {
    /// Check required fields, then the date of birth format.
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.first_name, "firstName")?;
        require(&self.last_name, "lastName")?;
        require(&self.biological_sex, "biologicalSex")?;
        require(&self.dob, "dob")?;
        require(&self.phone_number, "phoneNumber")?;
        require(&self.address, "address")?;
        require(&self.city, "city")?;
        require(&self.state, "state")?;
        require(&self.zipcode, "zipcode")?;
        require(&self.country, "country")?;

        if !is_valid_dob(self.dob.trim()) {
            return Err(ValidationError::InvalidDob);
        }
        Ok(())
    }

    /// Build the record submitted to the API. New patients await their sample.
    #[must_use]
    pub fn into_patient(self, temp_id: String, dna_id: String) -> Patient {
        let mut patient = Patient::new(
            temp_id,
            self.first_name.trim(),
            self.last_name.trim(),
            DnaStatus::AwaitingSample,
            dna_id,
        );
        patient.biological_sex = optional(&self.biological_sex);
        patient.dob = optional(&self.dob);
        patient.phone_number = optional(&self.phone_number);
        patient.address = optional(&self.address);
        patient.address2 = optional(&self.address2);
        patient.city = optional(&self.city);
        patient.state = optional(&self.state);
        patient.zipcode = optional(&self.zipcode);
        patient.country = optional(&self.country);
        patient
    }
}

/// Contact fields editable from the edit-patient form.
///
/// Name, date of birth and sex are read-only there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub phone_number: String,
    pub address: String,
    pub address2: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub country: String,
}

impl ContactUpdate {
    /// Prefill from an existing record.
    #[must_use]
    pub fn from_patient(patient: &Patient) -> Self {
        let get = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            phone_number: get(&patient.phone_number),
            address: get(&patient.address),
            address2: get(&patient.address2),
            city: get(&patient.city),
            state: get(&patient.state),
            zipcode: get(&patient.zipcode),
            country: get(&patient.country),
        }
    }

    /// Check required contact fields and the stored date of birth.
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn validate(&self, existing_dob: Option<&str>) -> Result<(), ValidationError> {
        require(&self.phone_number, "phoneNumber")?;
        require(&self.address, "address")?;
        require(&self.city, "city")?;
        require(&self.state, "state")?;
        require(&self.zipcode, "zipcode")?;
        require(&self.country, "country")?;

        if let Some(dob) = existing_dob {
            if !is_valid_dob(dob) {
                return Err(ValidationError::InvalidDob);
            }
        }
        Ok(())
    }

    /// Produce the updated record. The derived name is refreshed.
    #[must_use]
    pub fn apply_to(&self, patient: &Patient) -> Patient {
        let mut updated = patient.clone();
        updated.phone_number = optional(&self.phone_number);
        updated.address = optional(&self.address);
        updated.address2 = optional(&self.address2);
        updated.city = optional(&self.city);
        updated.state = optional(&self.state);
        updated.zipcode = optional(&self.zipcode);
        updated.country = optional(&self.country);
        updated.sync_name();
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn valid_new_patient() -> NewPatient {
        NewPatient {
            first_name: "철수".to_string(),
            last_name: "김".to_string(),
            biological_sex: "Male".to_string(),
            dob: "07/01/1980".to_string(),
            phone_number: "010-1234-5678".to_string(),
            address: "서울시 강남구".to_string(),
            address2: String::new(),
            city: "서울".to_string(),
            state: "서울".to_string(),
            zipcode: "12345".to_string(),
            country: "South Korea".to_string(),
        }
    }

    #[test]
    fn test_every_status_has_label() {
        for status in DnaStatus::ALL {
            assert!(!status.label().is_empty(), "{status} has no label");
        }
        assert_eq!(DnaStatus::Completed.label(), "모든 과정 완료");
    }

    #[test]
    fn test_status_parse_is_exact() {
        assert_eq!("Completed".parse::<DnaStatus>(), Ok(DnaStatus::Completed));
        assert_eq!("Not reachable".parse::<DnaStatus>(), Ok(DnaStatus::NotReachable));
        assert!("completed".parse::<DnaStatus>().is_err());
        assert!("Not Reachable".parse::<DnaStatus>().is_err());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&DnaStatus::AwaitingGeneticCounseling).expect("Should serialize");
        assert_eq!(json, "\"Awaiting Genetic Counseling\"");
    }

    #[test]
    fn test_name_tracks_parts() {
        let mut patient = Patient::new("p1", "철수", "김", DnaStatus::Completed, "PRDV-AAAA-BBBB-CCCC");
        assert_eq!(patient.name, "김철수");

        patient.set_first_name("영수");
        assert_eq!(patient.name, "김영수");

        patient.set_last_name("박");
        assert_eq!(patient.name, "박영수");
        assert_eq!(patient.name, format!("{}{}", patient.last_name, patient.first_name));
    }

    #[test]
    fn test_legacy_name_preserved() {
        let json = r#"{"id":"patient-1","name":"김철수","dnaStatus":"Completed","dnaId":"PRDV-2210-8015-1797"}"#;
        let mut patient: Patient = serde_json::from_str(json).expect("Should parse");
        patient.sync_name();
        assert_eq!(patient.display_name(), "김철수");
    }

    #[test]
    fn test_patient_wire_keys() {
        let mut patient = Patient::new("p1", "영희", "이", DnaStatus::DnaAnalyzed, "PRDV-B9K0-3F7S-H2QL");
        patient.phone_number = Some("010-9876-5432".to_string());
        patient.survey.blood_type = Some("A+".to_string());

        let value = serde_json::to_value(&patient).expect("Should serialize");
        assert_eq!(value["firstName"], "영희");
        assert_eq!(value["dnaStatus"], "DNA Analyzed");
        assert_eq!(value["phoneNumber"], "010-9876-5432");
        assert_eq!(value["bloodType"], "A+");
        assert!(value.get("deletedAt").is_none());
        assert!(value.get("age").is_none());
    }

    #[test]
    fn test_dob_pattern() {
        assert!(is_valid_dob("07/01/1980"));
        assert!(is_valid_dob("12/31/2099"));
        assert!(!is_valid_dob("13/40/2020"));
        assert!(!is_valid_dob("7/1/1980"));
        assert!(!is_valid_dob("07/01/1880"));
        assert!(!is_valid_dob("1980-07-01"));
    }

    #[test]
    fn test_dna_id_shape() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let id = generate_dna_id(&mut rng);
            assert!(is_valid_dna_id(&id), "bad id {id}");
            assert_eq!(id.len(), 19);
        }

        let mut fixed = StepRng::new(0, 0);
        assert_eq!(generate_dna_id(&mut fixed), "PRDV-AAAA-AAAA-AAAA");
        assert!(!is_valid_dna_id("PRDV-abcd-1234-5678"));
    }

    #[test]
    fn test_new_patient_validation() {
        assert!(valid_new_patient().validate().is_ok());

        let mut missing = valid_new_patient();
        missing.city = "  ".to_string();
        assert_eq!(missing.validate(), Err(ValidationError::MissingField("city")));

        let mut bad_dob = valid_new_patient();
        bad_dob.dob = "13/40/2020".to_string();
        assert_eq!(bad_dob.validate(), Err(ValidationError::InvalidDob));

        let mut no_address2 = valid_new_patient();
        no_address2.address2.clear();
        assert!(no_address2.validate().is_ok());
    }

    #[test]
    fn test_new_patient_into_record() {
        let patient = valid_new_patient().into_patient(
            temporary_id(Utc::now()),
            "PRDV-C4M6-2E1N-G8FM".to_string(),
        );
        assert!(patient.id.starts_with("temp-"));
        assert_eq!(patient.name, "김철수");
        assert_eq!(patient.dna_status, DnaStatus::AwaitingSample);
        assert_eq!(patient.address2, None);
        assert_eq!(patient.country.as_deref(), Some("South Korea"));
    }

    #[test]
    fn test_contact_update() {
        let mut patient = Patient::new("p1", "지아", "최", DnaStatus::Completed, "PRDV-X7Y8-Z9A1-B2C3");
        patient.dob = Some("09/01/2000".to_string());

        let mut update = ContactUpdate::from_patient(&patient);
        assert_eq!(update.validate(patient.dob.as_deref()), Err(ValidationError::MissingField("phoneNumber")));

        update.phone_number = "010-5566-7788".to_string();
        update.address = "광주시 동구".to_string();
        update.city = "광주".to_string();
        update.state = "광주".to_string();
        update.zipcode = "50000".to_string();
        update.country = "South Korea".to_string();
        assert!(update.validate(patient.dob.as_deref()).is_ok());
        assert_eq!(update.validate(Some("2000-09-01")), Err(ValidationError::InvalidDob));

        let updated = update.apply_to(&patient);
        assert_eq!(updated.city.as_deref(), Some("광주"));
        assert_eq!(updated.name, "최지아");
        assert_eq!(updated.dob, patient.dob);
    }
}
