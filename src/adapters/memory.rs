//! In-memory adapter: PatientApi without a server.
//!
//! Used for offline mode and tests. Mimics the collaborator API: the server
//! assigns `patient-<n>` ids on create, PATCH shallow-merges the body's
//! top-level keys into the stored record (keys absent from the body keep their
//! stored value, `null` clears), and unknown ids are `NotFound`.

use std::sync::Mutex;

use crate::domain::{DnaStatus, Patient};
use crate::ports::{ApiError, PatientApi};

/// Patient API backed by a vector.
pub struct InMemoryPatientApi {
    state: Mutex<State>,
}

struct State {
    patients: Vec<Patient>,
    next_id: u64,
}

impl InMemoryPatientApi {
    /// Start with no patients.
    #[must_use]
    pub fn new() -> Self {
        Self::with_patients(Vec::new())
    }

    /// Start with the given records.
    #[must_use]
    pub fn with_patients(patients: Vec<Patient>) -> Self {
        let next_id = patients.len() as u64 + 1;
        Self {
            state: Mutex::new(State { patients, next_id }),
        }
    }

    /// Start with five sample patients, one per representative status.
    #[must_use]
    pub fn with_fixtures() -> Self {
        Self::with_patients(sample_patients())
    }
}

impl Default for InMemoryPatientApi {
    fn default() -> Self {
        Self::new()
    }
}

impl PatientApi for InMemoryPatientApi {
    fn list_patients(&self) -> Result<Vec<Patient>, ApiError> {
        let state = self.state.lock().expect("Lock failed");
        Ok(state.patients.clone())
    }

    fn get_patient(&self, id: &str) -> Result<Patient, ApiError> {
        let state = self.state.lock().expect("Lock failed");
        state
            .patients
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    fn create_patient(&self, patient: &Patient) -> Result<Patient, ApiError> {
        let mut state = self.state.lock().expect("Lock failed");
        let mut created = patient.clone();
        created.id = format!("patient-{}", state.next_id);
        state.next_id += 1;
        state.patients.push(created.clone());
        Ok(created)
    }

    fn update_patient(&self, id: &str, patient: &Patient) -> Result<Patient, ApiError> {
        let mut state = self.state.lock().expect("Lock failed");
        let slot = state
            .patients
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
        let updated = merge_patch(slot, patient)?;
        *slot = updated.clone();
        Ok(updated)
    }

    fn delete_patient(&self, id: &str) -> Result<(), ApiError> {
        let mut state = self.state.lock().expect("Lock failed");
        let before = state.patients.len();
        state.patients.retain(|p| p.id != id);
        if state.patients.len() == before {
            return Err(ApiError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Apply `patch`'s top-level JSON keys over `stored`. The id is never changed.
fn merge_patch(stored: &Patient, patch: &Patient) -> Result<Patient, ApiError> {
    let decode = |e: serde_json::Error| ApiError::Decode(e.to_string());
    let mut merged = serde_json::to_value(stored).map_err(decode)?;
    let body = serde_json::to_value(patch).map_err(decode)?;

    if let (Some(target), serde_json::Value::Object(fields)) = (merged.as_object_mut(), body) {
        for (key, value) in fields {
            if key != "id" {
                target.insert(key, value);
            }
        }
    }
    serde_json::from_value(merged).map_err(decode)
}

struct Fixture {
    first_name: &'static str,
    last_name: &'static str,
    status: DnaStatus,
    dna_id: &'static str,
    age: u32,
    height: &'static str,
    weight: &'static str,
    occupation: &'static str,
    summary: &'static str,
    dob: &'static str,
    sex: &'static str,
    phone: &'static str,
    address: &'static str,
    address2: &'static str,
    city: &'static str,
    zipcode: &'static str,
}

const FIXTURES: [Fixture; 5] = [
    Fixture {
        first_name: "철수",
        last_name: "김",
        status: DnaStatus::Completed,
        dna_id: "PRDV-C4M6-2E1N-G8FM",
        age: 45,
        height: "175cm",
        weight: "70kg",
        occupation: "연구원",
        summary: "유전적으로 심혈관 질환 위험이 약간 높지만, 현재까지는 양호한 건강 상태를 유지하고 있습니다. 규칙적인 운동과 건강한 식단으로 예방적 관리가 중요합니다.",
        dob: "07/01/1980",
        sex: "Male",
        phone: "010-1234-5678",
        address: "서울시 강남구",
        address2: "테헤란로 123",
        city: "서울",
        zipcode: "12345",
    },
    Fixture {
        first_name: "영희",
        last_name: "이",
        status: DnaStatus::DnaAnalyzed,
        dna_id: "PRDV-B9K0-3F7S-H2QL",
        age: 30,
        height: "160cm",
        weight: "55kg",
        occupation: "디자이너",
        summary: "특정 약물에 대한 반응성이 낮을 수 있는 유전적 특성이 발견되었습니다. 약물 복용 시 전문가와 상담하여 용량을 조절하는 것이 좋습니다.",
        dob: "05/15/1995",
        sex: "Female",
        phone: "010-9876-5432",
        address: "부산시 해운대구",
        address2: "센텀남대로 45",
        city: "부산",
        zipcode: "60000",
    },
    Fixture {
        first_name: "민준",
        last_name: "박",
        status: DnaStatus::BuildingDigitalTwin,
        dna_id: "PRDV-A1C2-D3E4-F5G6",
        age: 60,
        height: "170cm",
        weight: "80kg",
        occupation: "교수",
        summary: "나이에 비해 활력이 좋은 유전적 특성을 가지고 있습니다. 특정 암 질환에 대한 가족력이 있어 정기적인 검진이 필요합니다.",
        dob: "03/20/1965",
        sex: "Male",
        phone: "010-1122-3344",
        address: "대구시 중구",
        address2: "동성로 10",
        city: "대구",
        zipcode: "70000",
    },
    Fixture {
        first_name: "지아",
        last_name: "최",
        status: DnaStatus::AwaitingGeneticCounseling,
        dna_id: "PRDV-X7Y8-Z9A1-B2C3",
        age: 25,
        height: "165cm",
        weight: "50kg",
        occupation: "학생",
        summary: "드문 유전 질환 보인자 가능성이 있어 추가 상담이 필요한 상태입니다. 유전 상담을 받는 것이 권장됩니다.",
        dob: "09/01/2000",
        sex: "Female",
        phone: "010-5566-7788",
        address: "광주시 동구",
        address2: "충장로 50",
        city: "광주",
        zipcode: "50000",
    },
    Fixture {
        first_name: "우진",
        last_name: "정",
        status: DnaStatus::SampleReceived,
        dna_id: "PRDV-P5Q6-R7S8-T9U0",
        age: 50,
        height: "180cm",
        weight: "75kg",
        occupation: "엔지니어",
        summary: "영양소 흡수 및 대사에 관련된 유전적 특성이 발견되었습니다. 맞춤형 영양 보충제 섭취를 고려해볼 수 있습니다.",
        dob: "11/10/1975",
        sex: "Male",
        phone: "010-9988-7766",
        address: "대전시 서구",
        address2: "둔산대로 100",
        city: "대전",
        zipcode: "30000",
    },
];

/// Sample roster for offline mode.
#[must_use]
pub fn sample_patients() -> Vec<Patient> {
    FIXTURES
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let mut patient = Patient::new(
                format!("patient-{}", i + 1),
                f.first_name,
                f.last_name,
                f.status,
                f.dna_id,
            );
            patient.age = Some(f.age);
            patient.height = Some(f.height.to_string());
            patient.weight = Some(f.weight.to_string());
            patient.ethnicity = Some("아시아인".to_string());
            patient.occupation = Some(f.occupation.to_string());
            patient.health_summary = Some(f.summary.to_string());
            patient.dob = Some(f.dob.to_string());
            patient.biological_sex = Some(f.sex.to_string());
            patient.phone_number = Some(f.phone.to_string());
            patient.address = Some(f.address.to_string());
            patient.address2 = Some(f.address2.to_string());
            patient.city = Some(f.city.to_string());
            patient.state = Some(f.city.to_string());
            patient.zipcode = Some(f.zipcode.to_string());
            patient.country = Some("South Korea".to_string());
            patient
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{is_valid_dna_id, SurveyField, SurveyToggle};

    #[test]
    fn test_fixtures_are_consistent() {
        let patients = sample_patients();
        assert_eq!(patients.len(), 5);
        for p in &patients {
            assert_eq!(p.name, format!("{}{}", p.last_name, p.first_name));
            assert!(is_valid_dna_id(&p.dna_id), "{}", p.dna_id);
        }
        assert_eq!(patients[0].name, "김철수");
    }

    #[test]
    fn test_create_assigns_server_id() {
        let api = InMemoryPatientApi::with_fixtures();
        let draft = Patient::new("temp-1", "하나", "한", DnaStatus::AwaitingSample, "PRDV-AAAA-BBBB-CCCC");

        let created = api.create_patient(&draft).expect("Should create");
        assert_eq!(created.id, "patient-6");
        assert_eq!(api.list_patients().expect("Should list").len(), 6);
    }

    #[test]
    fn test_update_and_delete_unknown() {
        let api = InMemoryPatientApi::new();
        let draft = Patient::new("x", "하나", "한", DnaStatus::AwaitingSample, "PRDV-AAAA-BBBB-CCCC");
        assert!(matches!(api.update_patient("x", &draft), Err(ApiError::NotFound(_))));
        assert!(matches!(api.delete_patient("x"), Err(ApiError::NotFound(_))));
        assert!(matches!(api.get_patient("x"), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_patch_clears_null_fields_and_keeps_absent_ones() {
        let api = InMemoryPatientApi::with_fixtures();
        let mut stored = api.get_patient("patient-1").expect("Should exist");
        stored.survey.set_text(SurveyField::CurrentMedications, "aspirin");
        stored.survey.set_toggle(SurveyToggle::BirthDefects, true);
        stored.survey.set_text(SurveyField::BirthDefectsDetails, "구순열");
        api.update_patient("patient-1", &stored).expect("Should update");

        let mut draft = api.get_patient("patient-1").expect("Should exist");
        draft.survey.set_text(SurveyField::CurrentMedications, "  ");
        draft.survey.set_toggle(SurveyToggle::BirthDefects, false);
        draft.address2 = None;
        draft.age = None;
        api.update_patient("patient-1", &draft).expect("Should update");

        let after = api.get_patient("patient-1").expect("Should exist");
        assert_eq!(after.survey.current_medications, None);
        assert_eq!(after.survey.birth_defects, Some(false));
        assert_eq!(after.survey.birth_defects_details, None);
        assert_eq!(after.address2, None);
        // `age` is omitted from the body when unset, so the stored value stays
        assert_eq!(after.age, stored.age);
        assert_eq!(after.id, "patient-1");
    }

    #[test]
    fn test_update_changes_record() {
        let api = InMemoryPatientApi::with_fixtures();
        let mut patient = api.get_patient("patient-2").expect("Should exist");
        patient.city = Some("울산".to_string());

        let updated = api.update_patient("patient-2", &patient).expect("Should update");
        assert_eq!(updated.city.as_deref(), Some("울산"));
        assert_eq!(
            api.get_patient("patient-2").expect("Should exist").city.as_deref(),
            Some("울산")
        );
    }
}
