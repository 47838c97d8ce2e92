//! Survey wizard screen.
//!
//! Each step is a list of items. Checkboxes and toggles flip with Space,
//! choice fields cycle with Left/Right, text items take typed input.
//! Companion fields (age, relation, details) appear only while their
//! checkbox is on.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::{HistorySection, SurveyWizard, LAST_STEP};
use crate::domain::{Condition, HereditaryCondition, Patient, SurveyField, SurveyToggle};
use crate::tui::styles::CareTheme;

use super::{key_hints, render_header};

/// One editable row on a wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyItem {
    Text(SurveyField),
    Toggle(SurveyToggle),
    Condition(HistorySection, Condition),
    ConditionDetail(HistorySection, Condition),
    OtherDiseases,
    Hereditary(HereditaryCondition),
    HereditaryDetail(HereditaryCondition),
    OtherHereditary,
}

/// Rows shown for a step given the current draft.
#[must_use]
pub fn step_items(step: u8, draft: &Patient) -> Vec<SurveyItem> {
    let survey = &draft.survey;
    match step {
        1 => {
            let mut items = vec![
                SurveyItem::Text(SurveyField::ReasonForGeneticTest),
                SurveyItem::Text(SurveyField::BloodType),
                SurveyItem::Toggle(SurveyToggle::BirthDefects),
            ];
            if survey.is_on(SurveyToggle::BirthDefects) {
                items.push(SurveyItem::Text(SurveyField::BirthDefectsDetails));
            }
            items
        }
        2 => vec![
            SurveyItem::Text(SurveyField::ExerciseFrequency),
            SurveyItem::Text(SurveyField::SmokingStatus),
            SurveyItem::Text(SurveyField::AlcoholConsumption),
            SurveyItem::Text(SurveyField::SaltIntake),
            SurveyItem::Text(SurveyField::FatIntake),
        ],
        3 | 4 => {
            let section = if step == 3 {
                HistorySection::Diagnosed
            } else {
                HistorySection::Family
            };
            let checked = |c: Condition| match section {
                HistorySection::Diagnosed => survey.diagnosed_diseases.as_ref().is_some_and(|d| d.is_checked(c)),
                HistorySection::Family => survey.family_history.as_ref().is_some_and(|d| d.is_checked(c)),
            };
            let mut items = Vec::new();
            for condition in Condition::ALL {
                items.push(SurveyItem::Condition(section, condition));
                if checked(condition) {
                    items.push(SurveyItem::ConditionDetail(section, condition));
                }
            }
            if section == HistorySection::Diagnosed {
                items.push(SurveyItem::OtherDiseases);
            }
            items
        }
        5 => {
            let mut items = Vec::new();
            for condition in HereditaryCondition::ALL {
                items.push(SurveyItem::Hereditary(condition));
                if survey.hereditary_diseases.as_ref().is_some_and(|h| h.is_checked(condition)) {
                    items.push(SurveyItem::HereditaryDetail(condition));
                }
            }
            items.push(SurveyItem::OtherHereditary);
            items
        }
        6 => vec![
            SurveyItem::Text(SurveyField::CurrentMedications),
            SurveyItem::Text(SurveyField::PastTreatments),
            SurveyItem::Text(SurveyField::AllergiesToMedication),
        ],
        _ => vec![
            SurveyItem::Toggle(SurveyToggle::ConsentToGeneticCounseling),
            SurveyItem::Toggle(SurveyToggle::ConsentToDataUse),
        ],
    }
}

fn detail_label(section: HistorySection) -> &'static str {
    match section {
        HistorySection::Diagnosed => "진단 나이",
        HistorySection::Family => "가족 관계",
    }
}

impl SurveyItem {
    fn is_checked(&self, draft: &Patient) -> Option<bool> {
        let survey = &draft.survey;
        match *self {
            Self::Toggle(toggle) => Some(survey.is_on(toggle)),
            Self::Condition(HistorySection::Diagnosed, c) => {
                Some(survey.diagnosed_diseases.as_ref().is_some_and(|d| d.is_checked(c)))
            }
            Self::Condition(HistorySection::Family, c) => {
                Some(survey.family_history.as_ref().is_some_and(|d| d.is_checked(c)))
            }
            Self::Hereditary(c) => Some(survey.hereditary_diseases.as_ref().is_some_and(|h| h.is_checked(c))),
            _ => None,
        }
    }

    /// Current text for text-like items.
    #[must_use]
    pub fn text(&self, draft: &Patient) -> Option<String> {
        let survey = &draft.survey;
        let value = match *self {
            Self::Text(field) => survey.text(field),
            Self::ConditionDetail(HistorySection::Diagnosed, c) => {
                survey.diagnosed_diseases.as_ref().and_then(|d| d.detail(c))
            }
            Self::ConditionDetail(HistorySection::Family, c) => survey.family_history.as_ref().and_then(|d| d.detail(c)),
            Self::OtherDiseases => survey.diagnosed_diseases.as_ref().and_then(|d| d.other()),
            Self::HereditaryDetail(c) => survey.hereditary_diseases.as_ref().and_then(|h| h.detail(c)),
            Self::OtherHereditary => survey.hereditary_diseases.as_ref().and_then(|h| h.other()),
            Self::Toggle(_) | Self::Condition(..) | Self::Hereditary(_) => return None,
        };
        Some(value.unwrap_or_default().to_string())
    }

    fn label(&self) -> String {
        match *self {
            Self::Text(field) => field.label().to_string(),
            Self::Toggle(toggle) => toggle.label().to_string(),
            Self::Condition(_, c) => c.label().to_string(),
            Self::ConditionDetail(section, c) => format!("  └ {} {}", c.label(), detail_label(section)),
            Self::OtherDiseases => "기타 질환".to_string(),
            Self::Hereditary(c) => c.label().to_string(),
            Self::HereditaryDetail(c) => format!("  └ {} 상세", c.label()),
            Self::OtherHereditary => "기타 유전 질환".to_string(),
        }
    }

    /// Flip a checkbox or toggle. Returns false for other items.
    pub fn toggle(&self, wizard: &mut SurveyWizard) -> bool {
        let Some(on) = self.is_checked(wizard.draft()) else {
            return false;
        };
        match *self {
            Self::Toggle(toggle) => wizard.set_toggle(toggle, !on),
            Self::Condition(section, c) => wizard.set_condition(section, c, !on),
            Self::Hereditary(c) => wizard.set_hereditary(c, !on),
            _ => return false,
        }
        true
    }

    /// Replace the text of a text-like item.
    pub fn set_text(&self, wizard: &mut SurveyWizard, value: &str) {
        match *self {
            Self::Text(field) => wizard.set_field(field, value),
            Self::ConditionDetail(section, c) => {
                wizard.set_condition_detail(section, c, value);
            }
            Self::OtherDiseases => wizard.set_other_diseases(value),
            Self::HereditaryDetail(c) => {
                wizard.set_hereditary_detail(c, value);
            }
            Self::OtherHereditary => wizard.set_other_hereditary(value),
            Self::Toggle(_) | Self::Condition(..) | Self::Hereditary(_) => {}
        }
    }

    /// Step a choice field through its options.
    pub fn cycle_choice(&self, wizard: &mut SurveyWizard, forward: bool) -> bool {
        let Self::Text(field) = *self else {
            return false;
        };
        let Some(choices) = field.choices() else {
            return false;
        };
        let current = wizard.draft().survey.text(field);
        let next = match choices.iter().position(|(wire, _)| Some(*wire) == current) {
            None => 0,
            Some(idx) if forward => (idx + 1) % choices.len(),
            Some(idx) => (idx + choices.len() - 1) % choices.len(),
        };
        wizard.set_field(field, choices[next].0);
        true
    }

    #[must_use]
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Text(field) if field.choices().is_some())
    }
}

/// Survey screen state.
#[derive(Debug, Clone, Default)]
pub struct SurveyState {
    pub wizard: Option<SurveyWizard>,
    /// Index into the current step's items
    pub selected: usize,
    pub loading: bool,
    pub error: Option<String>,
    pub submitting: bool,
}

impl SurveyState {
    #[must_use]
    pub fn items(&self) -> Vec<SurveyItem> {
        self.wizard
            .as_ref()
            .map(|w| step_items(w.step(), w.draft()))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn current_item(&self) -> Option<SurveyItem> {
        self.items().get(self.selected).copied()
    }

    pub fn clamp_selection(&mut self) {
        let len = self.items().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn select_next(&mut self) {
        let len = self.items().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Append a typed character to the selected text item.
    pub fn input_char(&mut self, c: char) {
        let Some(item) = self.current_item() else {
            return;
        };
        let Some(wizard) = self.wizard.as_mut() else {
            return;
        };
        if item.is_choice() {
            return;
        }
        if let Some(mut text) = item.text(wizard.draft()) {
            text.push(c);
            item.set_text(wizard, &text);
        }
    }

    pub fn delete_char(&mut self) {
        let Some(item) = self.current_item() else {
            return;
        };
        let Some(wizard) = self.wizard.as_mut() else {
            return;
        };
        if item.is_choice() {
            return;
        }
        if let Some(mut text) = item.text(wizard.draft()) {
            text.pop();
            item.set_text(wizard, &text);
        }
    }

    pub fn next_step(&mut self) {
        if let Some(wizard) = self.wizard.as_mut() {
            wizard.next();
            self.selected = 0;
        }
    }

    pub fn prev_step(&mut self) {
        if let Some(wizard) = self.wizard.as_mut() {
            wizard.prev();
            self.selected = 0;
        }
    }
}

pub fn render_survey(f: &mut Frame, area: Rect, state: &SurveyState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    let Some(wizard) = state.wizard.as_ref() else {
        render_header(f, chunks[0], "건강 설문", "");
        let message = match &state.error {
            Some(err) => Span::styled(err.clone(), CareTheme::danger()),
            None => Span::styled("환자 정보를 불러오는 중...", CareTheme::info()),
        };
        f.render_widget(Paragraph::new(message), chunks[2]);
        return;
    };

    let draft = wizard.draft();
    render_header(f, chunks[0], "건강 설문", &draft.display_name());

    let progress: Vec<Span> = (1..=LAST_STEP)
        .map(|step| {
            let style = if step == wizard.step() {
                CareTheme::selected()
            } else if step < wizard.step() {
                CareTheme::success()
            } else {
                CareTheme::text_muted()
            };
            Span::styled(format!(" {step} "), style)
        })
        .chain(std::iter::once(Span::styled(format!("  {}", wizard.title()), CareTheme::subtitle())))
        .collect();
    f.render_widget(Paragraph::new(Line::from(progress)), chunks[1]);

    let lines: Vec<Line> = step_items(wizard.step(), draft)
        .iter()
        .enumerate()
        .map(|(idx, item)| item_line(item, draft, idx == state.selected))
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(CareTheme::border_focused());
    f.render_widget(Paragraph::new(lines).block(block), chunks[2]);

    let footer = if state.submitting {
        Line::from(Span::styled("제출 중...", CareTheme::info()))
    } else if wizard.is_last_step() {
        key_hints(&[
            ("↑↓", "이동"),
            ("Space", "선택"),
            ("PgUp", "이전"),
            ("Enter", "제출"),
            ("Esc", "취소"),
        ])
    } else {
        key_hints(&[
            ("↑↓", "이동"),
            ("Space", "선택"),
            ("← →", "옵션"),
            ("PgUp", "이전"),
            ("PgDn", "다음"),
            ("Esc", "취소"),
        ])
    };
    f.render_widget(Paragraph::new(footer), chunks[3]);
}

fn item_line(item: &SurveyItem, draft: &Patient, selected: bool) -> Line<'static> {
    let label_style = if selected {
        CareTheme::focused()
    } else {
        CareTheme::text_secondary()
    };
    let marker = if selected { "▶ " } else { "  " };

    let value = if let Some(on) = item.is_checked(draft) {
        Span::styled(if on { "[x]" } else { "[ ]" }, CareTheme::text())
    } else {
        let text = item.text(draft).unwrap_or_default();
        let shown = match item {
            SurveyItem::Text(field) => field.display(&text).to_string(),
            _ => text,
        };
        if shown.is_empty() {
            Span::styled(if item.is_choice() { "← → 선택" } else { "입력" }, CareTheme::text_muted())
        } else {
            Span::styled(shown, CareTheme::text())
        }
    };

    Line::from(vec![
        Span::styled(marker, CareTheme::cursor()),
        Span::styled(format!("{}: ", item.label()), label_style),
        value,
    ])
}
