//! Profile screen: display name and password change.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::application::Profile;
use crate::tui::styles::CareTheme;

use super::form::{render_fields, render_form_footer, FormField, FormState};
use super::render_header;

pub const FIRST_NAME: usize = 0;
pub const LAST_NAME: usize = 1;
pub const CURRENT_PASSWORD: usize = 3;
pub const NEW_PASSWORD: usize = 4;
pub const CONFIRM_PASSWORD: usize = 5;

/// Profile screen state.
#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    pub form: FormState,
    pub notice: Option<String>,
}

impl ProfileState {
    #[must_use]
    pub fn new(profile: &Profile) -> Self {
        Self {
            form: FormState::new(vec![
                FormField::text("이름", "").with_value(profile.first_name.clone()),
                FormField::text("성", "").with_value(profile.last_name.clone()),
                FormField::read_only("이메일", profile.email()),
                FormField::masked("현재 비밀번호"),
                FormField::masked("새 비밀번호"),
                FormField::masked("새 비밀번호 확인"),
            ]),
            notice: None,
        }
    }

    /// Focus is on one of the password fields.
    #[must_use]
    pub fn editing_password(&self) -> bool {
        self.form.selected >= CURRENT_PASSWORD
    }
}

pub fn render_profile(f: &mut Frame, area: Rect, state: &ProfileState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(9),
            Constraint::Length(2),
        ])
        .split(area);

    render_header(f, chunks[0], "내 프로필", "계정 정보 및 비밀번호 변경");

    let notice = state
        .notice
        .as_ref()
        .map_or_else(|| Line::from(""), |n| Line::from(Span::styled(n.clone(), CareTheme::success())));
    f.render_widget(Paragraph::new(notice), chunks[1]);

    render_fields(f, chunks[2], &state.form, 2);

    let action = if state.editing_password() {
        "비밀번호 변경"
    } else {
        "이름 저장"
    };
    render_form_footer(f, chunks[3], &state.form, &[("↑↓", "이동"), ("Enter", action)]);
}
