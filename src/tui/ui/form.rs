//! Text-input forms shared by login, profile and the patient modals.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::tui::styles::CareTheme;

/// How a field takes input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Rendered as bullets; wiped on clear and drop.
    Masked,
    /// Fixed (wire value, label) options cycled with Left/Right.
    Choice(&'static [(&'static str, &'static str)]),
    /// Shown but skipped by focus.
    ReadOnly,
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub value: String,
    pub kind: FieldKind,
}

impl FormField {
    #[must_use]
    pub fn text(label: &'static str, hint: &'static str) -> Self {
        Self {
            label,
            hint,
            value: String::new(),
            kind: FieldKind::Text,
        }
    }

    #[must_use]
    pub fn masked(label: &'static str) -> Self {
        Self {
            label,
            hint: "",
            value: String::new(),
            kind: FieldKind::Masked,
        }
    }

    #[must_use]
    pub fn choice(label: &'static str, choices: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            label,
            hint: "← → 선택",
            value: String::new(),
            kind: FieldKind::Choice(choices),
        }
    }

    #[must_use]
    pub fn read_only(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            hint: "",
            value: value.into(),
            kind: FieldKind::ReadOnly,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    fn display(&self) -> String {
        match self.kind {
            FieldKind::Masked => "•".repeat(self.value.chars().count()),
            FieldKind::Choice(choices) => choices
                .iter()
                .find(|(wire, _)| *wire == self.value)
                .map_or_else(|| self.value.clone(), |(_, label)| (*label).to_string()),
            FieldKind::Text | FieldKind::ReadOnly => self.value.clone(),
        }
    }
}

/// Form state: fields, focus and the inline message.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub fields: Vec<FormField>,
    pub selected: usize,
    pub error: Option<String>,
    /// Request in flight; input is ignored.
    pub submitting: bool,
}

impl FormState {
    #[must_use]
    pub fn new(fields: Vec<FormField>) -> Self {
        let mut state = Self {
            fields,
            selected: 0,
            error: None,
            submitting: false,
        };
        if state.fields.first().is_some_and(|f| f.kind == FieldKind::ReadOnly) {
            state.next_field();
        }
        state
    }

    #[must_use]
    pub fn value(&self, idx: usize) -> &str {
        self.fields.get(idx).map_or("", |f| f.value.as_str())
    }

    /// Move to the next editable field, wrapping.
    pub fn next_field(&mut self) {
        let len = self.fields.len();
        for step in 1..=len {
            let idx = (self.selected + step) % len;
            if self.fields[idx].kind != FieldKind::ReadOnly {
                self.selected = idx;
                return;
            }
        }
    }

    /// Move to the previous editable field, wrapping.
    pub fn prev_field(&mut self) {
        let len = self.fields.len();
        for step in 1..=len {
            let idx = (self.selected + len - step) % len;
            if self.fields[idx].kind != FieldKind::ReadOnly {
                self.selected = idx;
                return;
            }
        }
    }

    pub fn input_char(&mut self, c: char) {
        if self.submitting || c.is_control() {
            return;
        }
        if let Some(field) = self.fields.get_mut(self.selected) {
            if matches!(field.kind, FieldKind::Text | FieldKind::Masked) {
                field.value.push(c);
                self.error = None;
            }
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.selected) {
            if matches!(field.kind, FieldKind::Text | FieldKind::Masked) {
                field.value.pop();
            }
        }
    }

    /// Step through a choice field's options. Empty selects the first.
    pub fn cycle_choice(&mut self, forward: bool) {
        let Some(field) = self.fields.get_mut(self.selected) else {
            return;
        };
        let FieldKind::Choice(choices) = field.kind else {
            return;
        };
        if choices.is_empty() {
            return;
        }
        let next = match choices.iter().position(|(wire, _)| *wire == field.value) {
            None => 0,
            Some(idx) if forward => (idx + 1) % choices.len(),
            Some(idx) => (idx + choices.len() - 1) % choices.len(),
        };
        field.value = choices[next].0.to_string();
        self.error = None;
    }

    /// Wipe masked buffers.
    pub fn clear_sensitive(&mut self) {
        for field in self.fields.iter_mut().filter(|f| f.kind == FieldKind::Masked) {
            field.value.zeroize();
        }
    }
}

impl Drop for FormState {
    fn drop(&mut self) {
        self.clear_sensitive();
    }
}

/// Render fields in one or two columns.
pub fn render_fields(f: &mut Frame, area: Rect, state: &FormState, columns: usize) {
    if columns <= 1 || state.fields.len() < 4 {
        render_field_column(f, area, &state.fields, 0, state.selected);
        return;
    }

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mid = state.fields.len().div_ceil(2);
    render_field_column(f, halves[0], &state.fields[..mid], 0, state.selected);
    render_field_column(f, halves[1], &state.fields[mid..], mid, state.selected);
}

fn render_field_column(f: &mut Frame, area: Rect, fields: &[FormField], offset: usize, selected: usize) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let border_style = if is_selected {
            CareTheme::border_focused()
        } else {
            CareTheme::border()
        };
        let title_style = if is_selected {
            CareTheme::focused()
        } else {
            CareTheme::text_secondary()
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value = field.display();
        let value_span = if value.is_empty() {
            Span::styled(field.hint, CareTheme::text_muted())
        } else if field.kind == FieldKind::ReadOnly {
            Span::styled(value, CareTheme::text_secondary())
        } else {
            Span::styled(value, CareTheme::text())
        };

        let content = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            value_span,
            if is_selected {
                Span::styled("▌", CareTheme::cursor())
            } else {
                Span::raw("")
            },
        ]))
        .block(block);

        f.render_widget(content, chunks[i]);
    }
}

/// Inline error or key hints under a form.
pub fn render_form_footer(f: &mut Frame, area: Rect, state: &FormState, hints: &[(&str, &str)]) {
    let content = if state.submitting {
        Line::from(Span::styled("처리 중...", CareTheme::info()))
    } else if let Some(err) = &state.error {
        Line::from(vec![
            Span::styled("! ", CareTheme::danger()),
            Span::styled(err.clone(), CareTheme::danger()),
        ])
    } else {
        super::key_hints(hints)
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(CareTheme::border()),
    );

    f.render_widget(footer, area);
}
