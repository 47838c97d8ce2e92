//! Domain layer: Core business types and logic.
//!
//! Pure types with no I/O. Wire formats follow the patient API's camelCase
//! JSON, and all validation lives here.

mod digital_twin;
mod patient;
pub mod reference;
mod survey;

pub use digital_twin::{
    DrugResponseSummary, MeetingAction, RareDiseaseSummary, TwinPanels, TwinSummary, VariantTier,
    WellnessSummary,
};
pub use patient::{
    full_name, generate_dna_id, is_valid_dna_id, is_valid_dob, temporary_id, ContactUpdate, DnaStatus,
    NewPatient, Patient, ValidationError, BIOLOGICAL_SEX_CHOICES, COUNTRY_CHOICES, DNA_ID_PREFIX,
};
pub use survey::{
    Condition, DiagnosedDiseases, FamilyHistory, HereditaryCondition, HereditaryDiseases, Survey, SurveyField,
    SurveyToggle,
};
