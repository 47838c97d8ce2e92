//! Patient list: filters, roster table and row actions.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::application::{PatientFilter, PatientList};
use crate::domain::Patient;
use crate::tui::styles::CareTheme;

use super::{key_hints, render_header};

/// List screen state.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    pub roster: PatientList,
    pub filter: PatientFilter,
    /// Index into the filtered rows
    pub selected: usize,
    pub loading: bool,
    pub error: Option<String>,
    /// Keystrokes go to the search term.
    pub editing_term: bool,
}

impl ListState {
    /// Rows passing the current filter.
    #[must_use]
    pub fn visible(&self) -> Vec<&Patient> {
        self.filter.apply(self.roster.patients()).collect()
    }

    #[must_use]
    pub fn selected_patient(&self) -> Option<&Patient> {
        self.visible().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep the selection inside the filtered rows.
    pub fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

pub fn render_patient_list(f: &mut Frame, area: Rect, state: &ListState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Filters
            Constraint::Min(0),    // Table
            Constraint::Length(2), // Hints
        ])
        .split(area);

    render_header(f, chunks[0], "환자 목록", "디지털 트윈 대시보드");
    render_filters(f, chunks[1], state);
    render_table(f, chunks[2], state);

    let hints = Paragraph::new(key_hints(&[
        ("↑↓", "선택"),
        ("Enter", "상세"),
        ("/", "검색"),
        ("f", "검색 항목"),
        ("s", "상태"),
        ("d", "삭제 포함"),
        ("a", "추가"),
        ("e", "수정"),
        ("x", "삭제"),
        ("r", "새로고침"),
    ]));
    f.render_widget(hints, chunks[3]);
}

fn render_filters(f: &mut Frame, area: Rect, state: &ListState) {
    let filter = &state.filter;
    let term_style = if state.editing_term {
        CareTheme::focused()
    } else {
        CareTheme::text()
    };
    let term = if filter.term.is_empty() && !state.editing_term {
        Span::styled("검색어 없음", CareTheme::text_muted())
    } else {
        Span::styled(filter.term.clone(), term_style)
    };

    let mut spans = vec![
        Span::styled(format!(" [{}] ", filter.field.label()), CareTheme::subtitle()),
        term,
    ];
    if state.editing_term {
        spans.push(Span::styled("▌", CareTheme::cursor()));
    }
    spans.push(Span::styled("  │  ", CareTheme::text_muted()));
    spans.push(Span::styled(filter.status.label(), CareTheme::text_secondary()));
    spans.push(Span::styled("  │  ", CareTheme::text_muted()));
    spans.push(Span::styled(
        if filter.show_deleted {
            "삭제된 환자 표시"
        } else {
            "삭제된 환자 숨김"
        },
        CareTheme::text_secondary(),
    ));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if state.editing_term {
            CareTheme::border_focused()
        } else {
            CareTheme::border()
        })
        .title(Span::styled(" 필터 ", CareTheme::text_secondary()));

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_table(f: &mut Frame, area: Rect, state: &ListState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(CareTheme::border());

    if state.loading {
        let p = Paragraph::new(Span::styled("환자 목록을 불러오는 중...", CareTheme::info())).block(block);
        f.render_widget(p, area);
        return;
    }
    if let Some(err) = &state.error {
        let p = Paragraph::new(Line::from(vec![
            Span::styled("! ", CareTheme::danger()),
            Span::styled(err.clone(), CareTheme::danger()),
        ]))
        .block(block);
        f.render_widget(p, area);
        return;
    }

    let visible = state.visible();
    if visible.is_empty() {
        let p = Paragraph::new(Span::styled("표시할 환자가 없습니다.", CareTheme::text_muted())).block(block);
        f.render_widget(p, area);
        return;
    }

    let header = Row::new(["이름", "DNA ID", "DNA 분석 상태", "생년월일", "연락처"])
        .style(CareTheme::subtitle());

    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .map(|(idx, patient)| {
            let row = Row::new(vec![
                Cell::from(patient.display_name()),
                Cell::from(patient.dna_id.clone()),
                Cell::from(Span::styled(
                    patient.dna_status.label(),
                    CareTheme::dna_status(patient.dna_status),
                )),
                Cell::from(patient.dob.clone().unwrap_or_default()),
                Cell::from(patient.phone_number.clone().unwrap_or_default()),
            ]);
            if idx == state.selected {
                row.style(CareTheme::selected())
            } else if patient.is_deleted() {
                row.style(CareTheme::text_muted())
            } else {
                row.style(CareTheme::text())
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(18),
            Constraint::Percentage(24),
            Constraint::Percentage(22),
            Constraint::Percentage(14),
            Constraint::Percentage(22),
        ],
    )
    .header(header)
    .block(block.title(Span::styled(
        format!(" {} / {}명 ", visible.len(), state.roster.len()),
        CareTheme::text_secondary(),
    )));

    f.render_widget(table, area);
}
