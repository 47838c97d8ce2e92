//! Navigation sidebar.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::{NavLink, Route};
use crate::tui::styles::CareTheme;

/// Function key that activates the sidebar entry at `idx`.
#[must_use]
pub fn link_key(idx: usize) -> String {
    format!("F{}", idx + 1)
}

pub fn render_sidebar(f: &mut Frame, area: Rect, links: &[NavLink], current: &Route) {
    let mut lines = vec![
        Line::from(Span::styled(" PredictivCare", CareTheme::header())),
        Line::from(""),
    ];

    for (idx, link) in links.iter().enumerate() {
        let active = link.target.as_ref() == Some(current);
        let style = if active {
            CareTheme::sidebar_selected()
        } else if link.target.is_none() {
            CareTheme::sidebar().patch(CareTheme::text_secondary())
        } else {
            CareTheme::sidebar()
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<4}", link_key(idx)), CareTheme::sidebar()),
            Span::styled(link.label, style),
        ]));
    }

    let sidebar = Paragraph::new(lines)
        .style(CareTheme::sidebar())
        .block(Block::default().borders(Borders::RIGHT).border_style(CareTheme::border()));

    f.render_widget(sidebar, area);
}
