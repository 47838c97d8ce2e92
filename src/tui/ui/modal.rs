//! Overlays: patient forms, delete confirmation, informational text, alerts.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::domain::reference::{
    ABOUT_TEST, ABOUT_TEST_TITLE, DISCLAIMER, DISCLAIMER_TITLE, RARE_DISORDER, RARE_DISORDER_TITLE,
};
use crate::domain::{ContactUpdate, NewPatient, Patient, BIOLOGICAL_SEX_CHOICES, COUNTRY_CHOICES};
use crate::tui::styles::CareTheme;

use super::form::{render_fields, render_form_footer, FormField, FormState};
use super::{centered_rect, key_hints, section_lines};

/// Read-only informational overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoModal {
    Disclaimer,
    AboutTest,
    RareDisorder,
}

impl InfoModal {
    fn title(&self) -> &'static str {
        match self {
            Self::Disclaimer => DISCLAIMER_TITLE,
            Self::AboutTest => ABOUT_TEST_TITLE,
            Self::RareDisorder => RARE_DISORDER_TITLE,
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        match self {
            Self::Disclaimer => vec![Line::from(Span::styled(DISCLAIMER, CareTheme::text()))],
            Self::AboutTest => section_lines(ABOUT_TEST),
            Self::RareDisorder => section_lines(RARE_DISORDER),
        }
    }
}

/// The overlay currently on top of the screen.
#[derive(Debug, Clone)]
pub enum Modal {
    AddPatient(FormState),
    EditPatient { patient: Patient, form: FormState },
    DeletePatient { id: String, name: String, form: FormState },
    Info { kind: InfoModal, scroll: u16 },
    /// Blocking message; `then` is restored when dismissed.
    Alert { message: String, then: Option<Box<Modal>> },
}

impl Modal {
    #[must_use]
    pub fn info(kind: InfoModal) -> Self {
        Self::Info { kind, scroll: 0 }
    }

    #[must_use]
    pub fn alert(message: impl Into<String>) -> Self {
        Self::Alert {
            message: message.into(),
            then: None,
        }
    }

    /// The form inside a form modal.
    pub fn form_mut(&mut self) -> Option<&mut FormState> {
        match self {
            Self::AddPatient(form) | Self::EditPatient { form, .. } | Self::DeletePatient { form, .. } => Some(form),
            Self::Info { .. } | Self::Alert { .. } => None,
        }
    }
}

mod add {
    pub const FIRST_NAME: usize = 0;
    pub const LAST_NAME: usize = 1;
    pub const SEX: usize = 2;
    pub const DOB: usize = 3;
    pub const PHONE: usize = 4;
    pub const ADDRESS: usize = 5;
    pub const ADDRESS2: usize = 6;
    pub const CITY: usize = 7;
    pub const STATE: usize = 8;
    pub const ZIPCODE: usize = 9;
    pub const COUNTRY: usize = 10;
}

mod edit {
    pub const PHONE: usize = 2;
    pub const ADDRESS: usize = 3;
    pub const ADDRESS2: usize = 4;
    pub const CITY: usize = 5;
    pub const STATE: usize = 6;
    pub const ZIPCODE: usize = 7;
    pub const COUNTRY: usize = 8;
}

#[must_use]
pub fn add_patient_form() -> FormState {
    FormState::new(vec![
        FormField::text("이름", "예: 철수"),
        FormField::text("성", "예: 김"),
        FormField::choice("생물학적 성별", &BIOLOGICAL_SEX_CHOICES),
        FormField::text("생년월일", "MM/DD/YYYY"),
        FormField::text("전화번호", "010-0000-0000"),
        FormField::text("주소", ""),
        FormField::text("상세 주소", "선택 사항"),
        FormField::text("도시", ""),
        FormField::text("주/도", ""),
        FormField::text("우편번호", ""),
        FormField::choice("국가", &COUNTRY_CHOICES),
    ])
}

#[must_use]
pub fn new_patient_from(form: &FormState) -> NewPatient {
    let v = |idx| form.value(idx).to_string();
    NewPatient {
        first_name: v(add::FIRST_NAME),
        last_name: v(add::LAST_NAME),
        biological_sex: v(add::SEX),
        dob: v(add::DOB),
        phone_number: v(add::PHONE),
        address: v(add::ADDRESS),
        address2: v(add::ADDRESS2),
        city: v(add::CITY),
        state: v(add::STATE),
        zipcode: v(add::ZIPCODE),
        country: v(add::COUNTRY),
    }
}

/// Name and date of birth are shown but not editable.
#[must_use]
pub fn edit_patient_form(patient: &Patient) -> FormState {
    let update = ContactUpdate::from_patient(patient);
    FormState::new(vec![
        FormField::read_only("이름", patient.display_name()),
        FormField::read_only("생년월일", patient.dob.clone().unwrap_or_default()),
        FormField::text("전화번호", "").with_value(update.phone_number),
        FormField::text("주소", "").with_value(update.address),
        FormField::text("상세 주소", "선택 사항").with_value(update.address2),
        FormField::text("도시", "").with_value(update.city),
        FormField::text("주/도", "").with_value(update.state),
        FormField::text("우편번호", "").with_value(update.zipcode),
        FormField::choice("국가", &COUNTRY_CHOICES).with_value(update.country),
    ])
}

#[must_use]
pub fn contact_update_from(form: &FormState) -> ContactUpdate {
    let v = |idx| form.value(idx).to_string();
    ContactUpdate {
        phone_number: v(edit::PHONE),
        address: v(edit::ADDRESS),
        address2: v(edit::ADDRESS2),
        city: v(edit::CITY),
        state: v(edit::STATE),
        zipcode: v(edit::ZIPCODE),
        country: v(edit::COUNTRY),
    }
}

#[must_use]
pub fn delete_form() -> FormState {
    FormState::new(vec![FormField::masked("비밀번호")])
}

pub fn render_modal(f: &mut Frame, area: Rect, modal: &Modal) {
    match modal {
        Modal::AddPatient(form) => render_form_modal(f, area, "환자 추가", form),
        Modal::EditPatient { form, .. } => render_form_modal(f, area, "환자 정보 수정", form),
        Modal::DeletePatient { name, form, .. } => render_delete(f, area, name, form),
        Modal::Info { kind, scroll } => render_info(f, area, *kind, *scroll),
        Modal::Alert { message, .. } => render_alert(f, area, message),
    }
}

fn modal_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(CareTheme::border_focused())
        .style(ratatui::style::Style::default().bg(CareTheme::BG_SURFACE))
        .title(Span::styled(format!(" {title} "), CareTheme::title()))
}

fn render_form_modal(f: &mut Frame, area: Rect, title: &str, form: &FormState) {
    let rect = centered_rect(80, 85, area);
    f.render_widget(Clear, rect);
    let block = modal_block(title);
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(inner);

    render_fields(f, chunks[0], form, 2);
    render_form_footer(
        f,
        chunks[1],
        form,
        &[("Tab", "이동"), ("← →", "선택"), ("Enter", "저장"), ("Esc", "취소")],
    );
}

fn render_delete(f: &mut Frame, area: Rect, name: &str, form: &FormState) {
    let rect = centered_rect(50, 40, area);
    f.render_widget(Clear, rect);
    let block = modal_block("환자 삭제");
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(3), Constraint::Min(2)])
        .split(inner);

    let prompt = Paragraph::new(Line::from(vec![
        Span::styled(name.to_string(), CareTheme::warning()),
        Span::styled(" 환자를 삭제하려면 비밀번호를 입력하세요.", CareTheme::text()),
    ]))
    .wrap(Wrap { trim: true });
    f.render_widget(prompt, chunks[0]);
    render_fields(f, chunks[1], form, 1);
    render_form_footer(f, chunks[2], form, &[("Enter", "삭제"), ("Esc", "취소")]);
}

fn render_info(f: &mut Frame, area: Rect, kind: InfoModal, scroll: u16) {
    let rect = centered_rect(80, 80, area);
    f.render_widget(Clear, rect);
    let block = modal_block(kind.title());
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let body = Paragraph::new(kind.lines())
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0));
    f.render_widget(body, chunks[0]);
    f.render_widget(Paragraph::new(key_hints(&[("↑↓", "스크롤"), ("Esc", "닫기")])), chunks[1]);
}

fn render_alert(f: &mut Frame, area: Rect, message: &str) {
    let rect = centered_rect(50, 25, area);
    f.render_widget(Clear, rect);
    let block = modal_block("알림");
    let inner = block.inner(rect);
    f.render_widget(block, rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    f.render_widget(
        Paragraph::new(Span::styled(message.to_string(), CareTheme::text())).wrap(Wrap { trim: true }),
        chunks[0],
    );
    f.render_widget(Paragraph::new(key_hints(&[("Enter", "확인")])), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::sample_patients;

    #[test]
    fn test_add_form_builds_new_patient() {
        let mut form = add_patient_form();
        for c in "하나".chars() {
            form.input_char(c);
        }
        form.next_field();
        form.input_char('한');
        form.next_field();
        form.cycle_choice(true);

        let new = new_patient_from(&form);
        assert_eq!(new.first_name, "하나");
        assert_eq!(new.last_name, "한");
        assert_eq!(new.biological_sex, "Male");
        assert!(new.validate().is_err());
    }

    #[test]
    fn test_edit_form_round_trips_contact() {
        let patient = sample_patients().remove(0);
        let form = edit_patient_form(&patient);
        assert_eq!(form.selected, edit::PHONE);
        assert_eq!(form.value(0), patient.display_name());
        assert_eq!(contact_update_from(&form), ContactUpdate::from_patient(&patient));
    }

    #[test]
    fn test_form_mut_only_on_forms() {
        let mut modal = Modal::alert("오류");
        assert!(modal.form_mut().is_none());
        let mut modal = Modal::DeletePatient {
            id: "patient-1".to_string(),
            name: "김철수".to_string(),
            form: delete_form(),
        };
        assert!(modal.form_mut().is_some());
    }
}
