//! UI module: View components for the TUI.

pub mod about;
pub mod detail;
pub mod form;
pub mod login;
pub mod modal;
pub mod patients;
pub mod profile;
pub mod sidebar;
pub mod survey;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::reference::InfoSection;
use crate::tui::styles::CareTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![Span::styled(
            "본 화면의 정보는 진단 목적으로 사용되지 않으며 유전학 전문가의 검토를 대체하지 않습니다.",
            CareTheme::text_muted(),
        )]),
        Line::from(vec![
            Span::styled("[Ctrl+D] ", CareTheme::key_hint()),
            Span::styled("면책 조항 ", CareTheme::key_desc()),
            Span::styled("[Ctrl+Q] ", CareTheme::key_hint()),
            Span::styled("종료", CareTheme::key_desc()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(CareTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// Screen title bar with an optional subtitle.
pub fn render_header(f: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let mut spans = vec![Span::raw(" "), Span::styled(title.to_string(), CareTheme::title())];
    if !subtitle.is_empty() {
        spans.push(Span::styled(" │ ", CareTheme::text_muted()));
        spans.push(Span::styled(subtitle.to_string(), CareTheme::text_secondary()));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(CareTheme::border()),
    );

    f.render_widget(header, area);
}

/// `[key] description` pairs on one line.
#[must_use]
pub fn key_hints(hints: &[(&str, &str)]) -> Line<'static> {
    let spans: Vec<Span<'static>> = hints
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(format!("[{key}] "), CareTheme::key_hint()),
                Span::styled(format!("{desc} "), CareTheme::key_desc()),
            ]
        })
        .collect();
    Line::from(spans)
}

/// Titled sections as wrapped text lines.
#[must_use]
pub fn section_lines(sections: &[InfoSection]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for section in sections {
        lines.push(Line::from(Span::styled(section.title, CareTheme::subtitle())));
        lines.push(Line::from(Span::styled(section.body, CareTheme::text())));
        lines.push(Line::from(""));
    }
    lines
}

/// A rectangle of the given percentage size centered in `area`.
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(60, 50, area);
        assert_eq!(inner.width, 60);
        assert_eq!(inner.height, 20);
        assert_eq!(inner.x, 20);
        assert_eq!(inner.y, 10);
    }

    #[test]
    fn test_key_hints_layout() {
        let line = key_hints(&[("Enter", "열기"), ("Esc", "닫기")]);
        assert_eq!(line.spans.len(), 4);
        assert_eq!(line.spans[0].content, "[Enter] ");
    }
}
