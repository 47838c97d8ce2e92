//! Survey wizard: seven linear steps editing a draft copy of the patient.

use crate::domain::{Condition, HereditaryCondition, Patient, SurveyField, SurveyToggle};

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 7;

/// Wizard step titles, indexed by `step - 1`.
pub const STEP_TITLES: [&str; 7] = [
    "1. 기본 정보",
    "2. 생활 습관",
    "3. 개인 병력",
    "4. 가족 병력",
    "5. 유전 질환 병력",
    "6. 치료 및 약물",
    "7. 동의서",
];

/// Which history map a nested edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistorySection {
    Diagnosed,
    Family,
}

/// Wizard state: current step and the draft being edited.
#[derive(Debug, Clone)]
pub struct SurveyWizard {
    step: u8,
    draft: Patient,
}

impl SurveyWizard {
    /// Start on step 1 with a copy of the fetched record.
    #[must_use]
    pub fn new(patient: Patient) -> Self {
        Self {
            step: FIRST_STEP,
            draft: patient,
        }
    }

    #[must_use]
    pub fn step(&self) -> u8 {
        self.step
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        STEP_TITLES[usize::from(self.step - FIRST_STEP)]
    }

    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.step == LAST_STEP
    }

    #[must_use]
    pub fn is_first_step(&self) -> bool {
        self.step == FIRST_STEP
    }

    /// Advance one step; stays on the last step.
    pub fn next(&mut self) {
        if self.step < LAST_STEP {
            self.step += 1;
        }
    }

    /// Go back one step; stays on the first step.
    pub fn prev(&mut self) {
        if self.step > FIRST_STEP {
            self.step -= 1;
        }
    }

    #[must_use]
    pub fn draft(&self) -> &Patient {
        &self.draft
    }

    /// Consume the wizard, yielding the draft to submit.
    #[must_use]
    pub fn into_draft(self) -> Patient {
        self.draft
    }

    pub fn set_field(&mut self, field: SurveyField, value: &str) {
        self.draft.survey.set_text(field, value);
    }

    pub fn set_toggle(&mut self, toggle: SurveyToggle, on: bool) {
        self.draft.survey.set_toggle(toggle, on);
    }

    pub fn set_condition(&mut self, section: HistorySection, condition: Condition, checked: bool) {
        match section {
            HistorySection::Diagnosed => self.draft.survey.diagnosed_mut().set_checked(condition, checked),
            HistorySection::Family => self.draft.survey.family_mut().set_checked(condition, checked),
        }
    }

    /// Set an age (diagnosed) or relation (family). Ignored while unchecked.
    pub fn set_condition_detail(&mut self, section: HistorySection, condition: Condition, detail: &str) -> bool {
        match section {
            HistorySection::Diagnosed => self.draft.survey.diagnosed_mut().set_detail(condition, detail),
            HistorySection::Family => self.draft.survey.family_mut().set_detail(condition, detail),
        }
    }

    pub fn set_other_diseases(&mut self, value: &str) {
        self.draft.survey.diagnosed_mut().set_other(value);
    }

    pub fn set_hereditary(&mut self, condition: HereditaryCondition, checked: bool) {
        self.draft.survey.hereditary_mut().set_checked(condition, checked);
    }

    pub fn set_hereditary_detail(&mut self, condition: HereditaryCondition, detail: &str) -> bool {
        self.draft.survey.hereditary_mut().set_detail(condition, detail)
    }

    pub fn set_other_hereditary(&mut self, value: &str) {
        self.draft.survey.hereditary_mut().set_other(value);
    }
}
