//! About page.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::reference::{ABOUT, ABOUT_TAGLINE, ABOUT_TITLE};
use crate::tui::styles::CareTheme;

use super::{key_hints, render_header, section_lines};

pub fn render_about(f: &mut Frame, area: Rect, scroll: u16) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    render_header(f, chunks[0], ABOUT_TITLE, ABOUT_TAGLINE);

    let mut lines = vec![
        Line::from(Span::styled(ABOUT_TAGLINE, CareTheme::subtitle())),
        Line::from(""),
    ];
    lines.extend(section_lines(ABOUT));

    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).border_style(CareTheme::border()))
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0));
    f.render_widget(body, chunks[1]);

    f.render_widget(Paragraph::new(key_hints(&[("↑↓", "스크롤")])), chunks[2]);
}
