//! Login screen.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::form::{render_fields, render_form_footer, FormField, FormState};
use super::{centered_rect, render_header};
use crate::tui::styles::CareTheme;

pub const EMAIL: usize = 0;
pub const PASSWORD: usize = 1;

#[must_use]
pub fn login_form() -> FormState {
    FormState::new(vec![
        FormField::text("이메일", "demo@predictivcare.com"),
        FormField::masked("비밀번호"),
    ])
}

pub fn render_login(f: &mut Frame, area: Rect, state: &FormState, notice: Option<&str>) {
    let panel = centered_rect(50, 60, area);
    f.render_widget(Clear, panel);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(CareTheme::border_focused());
    let inner = block.inner(panel);
    f.render_widget(block, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(6),
            Constraint::Length(2),
        ])
        .split(inner);

    render_header(f, chunks[0], "로그인", "PredictivCare 디지털 트윈");
    if let Some(notice) = notice {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(notice.to_string(), CareTheme::success())))
                .wrap(Wrap { trim: true }),
            chunks[1],
        );
    }
    render_fields(f, chunks[2], state, 1);
    render_form_footer(f, chunks[3], state, &[("Tab", "이동"), ("Enter", "로그인")]);
}
