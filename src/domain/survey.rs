//! Intake survey answers.
//!
//! The API stores every answer as a top-level key of the patient record, with
//! three nested history maps. Absent flags read as "no".

use serde::{Deserialize, Serialize};

/// Conditions asked about in the personal and family history sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Cancer,
    Diabetes,
    HeartDisease,
    Stroke,
    Hypertension,
    KidneyDisease,
    LiverDisease,
    ThyroidDisease,
    AutoimmuneDisease,
    NeurologicalDisorder,
}

impl Condition {
    pub const ALL: [Condition; 10] = [
        Condition::Cancer,
        Condition::Diabetes,
        Condition::HeartDisease,
        Condition::Stroke,
        Condition::Hypertension,
        Condition::KidneyDisease,
        Condition::LiverDisease,
        Condition::ThyroidDisease,
        Condition::AutoimmuneDisease,
        Condition::NeurologicalDisorder,
    ];

    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Cancer => "cancer",
            Self::Diabetes => "diabetes",
            Self::HeartDisease => "heartDisease",
            Self::Stroke => "stroke",
            Self::Hypertension => "hypertension",
            Self::KidneyDisease => "kidneyDisease",
            Self::LiverDisease => "liverDisease",
            Self::ThyroidDisease => "thyroidDisease",
            Self::AutoimmuneDisease => "autoimmuneDisease",
            Self::NeurologicalDisorder => "neurologicalDisorder",
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cancer => "암",
            Self::Diabetes => "당뇨병",
            Self::HeartDisease => "심장 질환",
            Self::Stroke => "뇌졸중",
            Self::Hypertension => "고혈압",
            Self::KidneyDisease => "신장 질환",
            Self::LiverDisease => "간 질환",
            Self::ThyroidDisease => "갑상선 질환",
            Self::AutoimmuneDisease => "자가면역 질환",
            Self::NeurologicalDisorder => "신경학적 질환",
        }
    }
}

/// Inherited disorders asked about in the hereditary history section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HereditaryCondition {
    CysticFibrosis,
    SickleCellAnemia,
    TaySachsDisease,
}

impl HereditaryCondition {
    pub const ALL: [HereditaryCondition; 3] = [
        HereditaryCondition::CysticFibrosis,
        HereditaryCondition::SickleCellAnemia,
        HereditaryCondition::TaySachsDisease,
    ];

    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::CysticFibrosis => "cysticFibrosis",
            Self::SickleCellAnemia => "sickleCellAnemia",
            Self::TaySachsDisease => "taySachsDisease",
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::CysticFibrosis => "낭포성 섬유증 (Cystic Fibrosis)",
            Self::SickleCellAnemia => "겸상 적혈구 빈혈증 (Sickle Cell Anemia)",
            Self::TaySachsDisease => "테이-삭스병 (Tay-Sachs Disease)",
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// A flag/companion pair per condition, plus an optional free-text entry.
macro_rules! history_section {
    (
        $(#[$meta:meta])*
        pub struct $name:ident for $kind:ident {
            $($variant:ident => $flag:ident $flag_key:literal, $companion:ident $companion_key:literal;)+
        }
        other: $other:ident $other_key:literal
    ) => {
        history_section!(@define $(#[$meta])* $name, $kind, [$($variant $flag $flag_key $companion $companion_key)+], [$other $other_key]);

        impl $name {
            /// Free-text entry for anything not listed.
            #[must_use]
            pub fn other(&self) -> Option<&str> {
                self.$other.as_deref()
            }

            pub fn set_other(&mut self, value: &str) {
                self.$other = non_empty(value);
            }
        }
    };
    (
        $(#[$meta:meta])*
        pub struct $name:ident for $kind:ident {
            $($variant:ident => $flag:ident $flag_key:literal, $companion:ident $companion_key:literal;)+
        }
    ) => {
        history_section!(@define $(#[$meta])* $name, $kind, [$($variant $flag $flag_key $companion $companion_key)+], []);
    };
    (
        @define $(#[$meta:meta])* $name:ident, $kind:ident,
        [$($variant:ident $flag:ident $flag_key:literal $companion:ident $companion_key:literal)+],
        [$($other:ident $other_key:literal)?]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            $(
                #[serde(rename = $flag_key, default, skip_serializing_if = "Option::is_none")]
                pub $flag: Option<bool>,
                #[serde(rename = $companion_key, default, skip_serializing_if = "Option::is_none")]
                pub $companion: Option<String>,
            )+
            $(
                #[serde(rename = $other_key, default, skip_serializing_if = "Option::is_none")]
                pub $other: Option<String>,
            )?
        }

        impl $name {
            fn slots(&self, condition: $kind) -> (&Option<bool>, &Option<String>) {
                match condition {
                    $($kind::$variant => (&self.$flag, &self.$companion),)+
                }
            }

            fn slots_mut(&mut self, condition: $kind) -> (&mut Option<bool>, &mut Option<String>) {
                match condition {
                    $($kind::$variant => (&mut self.$flag, &mut self.$companion),)+
                }
            }

            #[must_use]
            pub fn is_checked(&self, condition: $kind) -> bool {
                self.slots(condition).0.unwrap_or(false)
            }

            /// Companion text for a condition, if any.
            #[must_use]
            pub fn detail(&self, condition: $kind) -> Option<&str> {
                self.slots(condition).1.as_deref()
            }

            /// Set a flag. Unchecking clears the companion text.
            pub fn set_checked(&mut self, condition: $kind, checked: bool) {
                let (flag, companion) = self.slots_mut(condition);
                *flag = Some(checked);
                if !checked {
                    *companion = None;
                }
            }

            /// Set the companion text. Ignored (returns false) while the flag is off.
            pub fn set_detail(&mut self, condition: $kind, detail: &str) -> bool {
                let (flag, companion) = self.slots_mut(condition);
                if !flag.unwrap_or(false) {
                    return false;
                }
                *companion = non_empty(detail);
                true
            }

            /// Conditions currently checked, in display order.
            pub fn checked(&self) -> impl Iterator<Item = $kind> + '_ {
                $kind::ALL.into_iter().filter(move |c| self.is_checked(*c))
            }
        }
    };
}

history_section! {
    /// Conditions the patient has been diagnosed with, and the age at diagnosis.
    pub struct DiagnosedDiseases for Condition {
        Cancer => cancer "cancer", cancer_age "cancerAge";
        Diabetes => diabetes "diabetes", diabetes_age "diabetesAge";
        HeartDisease => heart_disease "heartDisease", heart_disease_age "heartDiseaseAge";
        Stroke => stroke "stroke", stroke_age "strokeAge";
        Hypertension => hypertension "hypertension", hypertension_age "hypertensionAge";
        KidneyDisease => kidney_disease "kidneyDisease", kidney_disease_age "kidneyDiseaseAge";
        LiverDisease => liver_disease "liverDisease", liver_disease_age "liverDiseaseAge";
        ThyroidDisease => thyroid_disease "thyroidDisease", thyroid_disease_age "thyroidDiseaseAge";
        AutoimmuneDisease => autoimmune_disease "autoimmuneDisease", autoimmune_disease_age "autoimmuneDiseaseAge";
        NeurologicalDisorder => neurological_disorder "neurologicalDisorder", neurological_disorder_age "neurologicalDisorderAge";
    }
    other: other_diseases "otherDiseases"
}

history_section! {
    /// Conditions diagnosed in biological relatives, and which relative.
    pub struct FamilyHistory for Condition {
        Cancer => cancer "cancer", cancer_relation "cancerRelation";
        Diabetes => diabetes "diabetes", diabetes_relation "diabetesRelation";
        HeartDisease => heart_disease "heartDisease", heart_disease_relation "heartDiseaseRelation";
        Stroke => stroke "stroke", stroke_relation "strokeRelation";
        Hypertension => hypertension "hypertension", hypertension_relation "hypertensionRelation";
        KidneyDisease => kidney_disease "kidneyDisease", kidney_disease_relation "kidneyDiseaseRelation";
        LiverDisease => liver_disease "liverDisease", liver_disease_relation "liverDiseaseRelation";
        ThyroidDisease => thyroid_disease "thyroidDisease", thyroid_disease_relation "thyroidDiseaseRelation";
        AutoimmuneDisease => autoimmune_disease "autoimmuneDisease", autoimmune_disease_relation "autoimmuneDiseaseRelation";
        NeurologicalDisorder => neurological_disorder "neurologicalDisorder", neurological_disorder_relation "neurologicalDisorderRelation";
    }
}

history_section! {
    pub struct HereditaryDiseases for HereditaryCondition {
        CysticFibrosis => cystic_fibrosis "cysticFibrosis", cystic_fibrosis_details "cysticFibrosisDetails";
        SickleCellAnemia => sickle_cell_anemia "sickleCellAnemia", sickle_cell_anemia_details "sickleCellAnemiaDetails";
        TaySachsDisease => tay_sachs_disease "taySachsDisease", tay_sachs_disease_details "taySachsDiseaseDetails";
    }
    other: other_hereditary_diseases "otherHereditaryDiseases"
}

/// Survey answers, flattened into the patient record on the wire.
///
/// Cleared answers serialize as `null` so a PATCH clears them server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    #[serde(default)]
    pub reason_for_genetic_test: Option<String>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub birth_defects: Option<bool>,
    #[serde(default)]
    pub birth_defects_details: Option<String>,

    #[serde(default)]
    pub exercise_frequency: Option<String>,
    #[serde(default)]
    pub smoking_status: Option<String>,
    #[serde(default)]
    pub alcohol_consumption: Option<String>,
    #[serde(default)]
    pub salt_intake: Option<String>,
    #[serde(default)]
    pub fat_intake: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosed_diseases: Option<DiagnosedDiseases>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_history: Option<FamilyHistory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hereditary_diseases: Option<HereditaryDiseases>,

    #[serde(default)]
    pub current_medications: Option<String>,
    #[serde(default)]
    pub past_treatments: Option<String>,
    #[serde(default)]
    pub allergies_to_medication: Option<String>,

    #[serde(default)]
    pub consent_to_genetic_counseling: Option<bool>,
    #[serde(default)]
    pub consent_to_data_use: Option<bool>,
}

const REASON_CHOICES: &[(&str, &str)] = &[
    ("Family History", "가족력"),
    ("Proactive Health & Wellness", "사전 예방적 건강 & 웰니스"),
    ("Unexplained Persistent Physical Symptoms", "원인 불명의 지속적인 신체 증상"),
    ("Other", "기타"),
];

const EXERCISE_CHOICES: &[(&str, &str)] = &[
    ("Daily", "매일"),
    ("3-4 Times/Week", "주 3-4회"),
    ("1-2 Times/Week", "주 1-2회"),
    ("Rarely", "거의 안함"),
];

const SMOKING_CHOICES: &[(&str, &str)] = &[
    ("Non-smoker", "비흡연"),
    ("Former Smoker", "과거 흡연"),
    ("Current Smoker", "현재 흡연"),
];

const INTAKE_CHOICES: &[(&str, &str)] = &[("Low", "낮음"), ("Medium", "보통"), ("High", "높음")];

/// Top-level text answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurveyField {
    ReasonForGeneticTest,
    BloodType,
    BirthDefectsDetails,
    ExerciseFrequency,
    SmokingStatus,
    AlcoholConsumption,
    SaltIntake,
    FatIntake,
    CurrentMedications,
    PastTreatments,
    AllergiesToMedication,
}

impl SurveyField {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::ReasonForGeneticTest => "유전자 검사 주된 이유",
            Self::BloodType => "혈액형",
            Self::BirthDefectsDetails => "상세 내용",
            Self::ExerciseFrequency => "운동 빈도",
            Self::SmokingStatus => "흡연 여부",
            Self::AlcoholConsumption => "음주량",
            Self::SaltIntake => "소금 섭취",
            Self::FatIntake => "지방 섭취",
            Self::CurrentMedications => "현재 복용 중인 약물",
            Self::PastTreatments => "과거 치료 이력",
            Self::AllergiesToMedication => "약물 알레르기",
        }
    }

    /// Fixed (wire value, label) options, or `None` for free text.
    #[must_use]
    pub fn choices(&self) -> Option<&'static [(&'static str, &'static str)]> {
        match self {
            Self::ReasonForGeneticTest => Some(REASON_CHOICES),
            Self::ExerciseFrequency => Some(EXERCISE_CHOICES),
            Self::SmokingStatus => Some(SMOKING_CHOICES),
            Self::SaltIntake | Self::FatIntake => Some(INTAKE_CHOICES),
            _ => None,
        }
    }

    /// Label for a stored value; free text and unknown values pass through.
    #[must_use]
    pub fn display<'a>(&self, value: &'a str) -> &'a str {
        self.choices()
            .and_then(|choices| choices.iter().find(|(wire, _)| *wire == value))
            .map_or(value, |(_, label)| label)
    }
}

/// Boolean answers outside the history maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurveyToggle {
    BirthDefects,
    ConsentToGeneticCounseling,
    ConsentToDataUse,
}

impl SurveyToggle {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::BirthDefects => "선천적 결함이 있습니까?",
            Self::ConsentToGeneticCounseling => "유전자 상담 동의",
            Self::ConsentToDataUse => "데이터 활용 동의",
        }
    }
}

impl Survey {
    fn text_slot(&mut self, field: SurveyField) -> &mut Option<String> {
        match field {
            SurveyField::ReasonForGeneticTest => &mut self.reason_for_genetic_test,
            SurveyField::BloodType => &mut self.blood_type,
            SurveyField::BirthDefectsDetails => &mut self.birth_defects_details,
            SurveyField::ExerciseFrequency => &mut self.exercise_frequency,
            SurveyField::SmokingStatus => &mut self.smoking_status,
            SurveyField::AlcoholConsumption => &mut self.alcohol_consumption,
            SurveyField::SaltIntake => &mut self.salt_intake,
            SurveyField::FatIntake => &mut self.fat_intake,
            SurveyField::CurrentMedications => &mut self.current_medications,
            SurveyField::PastTreatments => &mut self.past_treatments,
            SurveyField::AllergiesToMedication => &mut self.allergies_to_medication,
        }
    }

    #[must_use]
    pub fn text(&self, field: SurveyField) -> Option<&str> {
        let value = match field {
            SurveyField::ReasonForGeneticTest => &self.reason_for_genetic_test,
            SurveyField::BloodType => &self.blood_type,
            SurveyField::BirthDefectsDetails => &self.birth_defects_details,
            SurveyField::ExerciseFrequency => &self.exercise_frequency,
            SurveyField::SmokingStatus => &self.smoking_status,
            SurveyField::AlcoholConsumption => &self.alcohol_consumption,
            SurveyField::SaltIntake => &self.salt_intake,
            SurveyField::FatIntake => &self.fat_intake,
            SurveyField::CurrentMedications => &self.current_medications,
            SurveyField::PastTreatments => &self.past_treatments,
            SurveyField::AllergiesToMedication => &self.allergies_to_medication,
        };
        value.as_deref()
    }

    /// Set a text answer; blank input clears it.
    pub fn set_text(&mut self, field: SurveyField, value: &str) {
        *self.text_slot(field) = non_empty(value);
    }

    #[must_use]
    pub fn is_on(&self, toggle: SurveyToggle) -> bool {
        match toggle {
            SurveyToggle::BirthDefects => self.birth_defects,
            SurveyToggle::ConsentToGeneticCounseling => self.consent_to_genetic_counseling,
            SurveyToggle::ConsentToDataUse => self.consent_to_data_use,
        }
        .unwrap_or(false)
    }

    /// Set a toggle. Turning off birth defects clears its details.
    pub fn set_toggle(&mut self, toggle: SurveyToggle, on: bool) {
        match toggle {
            SurveyToggle::BirthDefects => {
                self.birth_defects = Some(on);
                if !on {
                    self.birth_defects_details = None;
                }
            }
            SurveyToggle::ConsentToGeneticCounseling => self.consent_to_genetic_counseling = Some(on),
            SurveyToggle::ConsentToDataUse => self.consent_to_data_use = Some(on),
        }
    }

    /// Diagnosed diseases, created empty on first edit.
    pub fn diagnosed_mut(&mut self) -> &mut DiagnosedDiseases {
        self.diagnosed_diseases.get_or_insert_with(DiagnosedDiseases::default)
    }

    pub fn family_mut(&mut self) -> &mut FamilyHistory {
        self.family_history.get_or_insert_with(FamilyHistory::default)
    }

    pub fn hereditary_mut(&mut self) -> &mut HereditaryDiseases {
        self.hereditary_diseases.get_or_insert_with(HereditaryDiseases::default)
    }
}
