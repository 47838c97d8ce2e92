//! Patient detail: profile panels and the digital-twin analysis panels.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::{MeetingAction, Patient, SurveyField, TwinPanels, TwinSummary, VariantTier};
use crate::tui::styles::CareTheme;

use super::{key_hints, render_header};

const NOT_AVAILABLE: &str = "N/A";
const PENDING: &str = "샘플 수령 후 분석 결과가 표시됩니다.";

/// Detail screen state.
#[derive(Debug, Clone, Default)]
pub struct DetailState {
    pub patient: Option<Patient>,
    pub panels: Option<TwinPanels>,
    pub loading: bool,
    pub error: Option<String>,
    /// Success or meeting notice shown under the header
    pub notice: Option<String>,
}

pub fn render_detail(f: &mut Frame, area: Rect, state: &DetailState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(2)])
        .split(area);

    let hints = Paragraph::new(key_hints(&[
        ("s", "설문 작성"),
        ("t", "검사 정보"),
        ("g", "희귀 질환 정보"),
        ("1-3", "상담 미팅"),
        ("Esc", "목록"),
    ]));
    f.render_widget(hints, chunks[2]);

    let Some(patient) = state.patient.as_ref().filter(|_| !state.loading) else {
        render_header(f, chunks[0], "디지털 트윈", "");
        let message = match &state.error {
            Some(err) => Span::styled(err.clone(), CareTheme::danger()),
            None => Span::styled("환자 정보를 불러오는 중...", CareTheme::info()),
        };
        f.render_widget(Paragraph::new(message), chunks[1]);
        return;
    };

    render_header(
        f,
        chunks[0],
        &format!("안녕하세요, {}님", patient.display_name()),
        patient.dna_status.label(),
    );

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    render_profile_column(f, body[0], patient, state.notice.as_deref());
    render_analysis_column(f, body[1], state.panels.as_ref().unwrap_or(&TwinPanels::Pending));
}

fn or_na(value: Option<&str>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), str::to_string)
}

fn field_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), CareTheme::text_secondary()),
        Span::styled(value, CareTheme::text()),
    ])
}

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(CareTheme::border())
        .title(Span::styled(format!(" {title} "), CareTheme::subtitle()))
}

fn render_profile_column(f: &mut Frame, area: Rect, patient: &Patient, notice: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Min(0),
        ])
        .split(area);

    let mut summary = Vec::new();
    if let Some(notice) = notice {
        summary.push(Line::from(Span::styled(notice.to_string(), CareTheme::success())));
    }
    summary.push(Line::from(Span::styled(
        patient
            .health_summary
            .clone()
            .unwrap_or_else(|| "요약 정보가 없습니다.".to_string()),
        CareTheme::text(),
    )));
    f.render_widget(
        Paragraph::new(summary).block(panel("건강 요약")).wrap(Wrap { trim: true }),
        chunks[0],
    );

    let basic = vec![
        field_line("나이", patient.age.map_or_else(|| NOT_AVAILABLE.to_string(), |a| a.to_string())),
        field_line("키", or_na(patient.height.as_deref())),
        field_line("몸무게", or_na(patient.weight.as_deref())),
        field_line("인종", or_na(patient.ethnicity.as_deref())),
        field_line("직업", or_na(patient.occupation.as_deref())),
    ];
    f.render_widget(Paragraph::new(basic).block(panel("기본 정보")), chunks[1]);

    let survey = &patient.survey;
    let lifestyle: Vec<Line> = [
        SurveyField::ExerciseFrequency,
        SurveyField::SmokingStatus,
        SurveyField::AlcoholConsumption,
        SurveyField::SaltIntake,
        SurveyField::FatIntake,
    ]
    .into_iter()
    .map(|field| field_line(field.label(), or_na(survey.text(field).map(|v| field.display(v)))))
    .collect();
    f.render_widget(Paragraph::new(lifestyle).block(panel("생활 습관")), chunks[2]);

    f.render_widget(
        Paragraph::new(history_lines(patient))
            .block(panel("건강 이력"))
            .wrap(Wrap { trim: true }),
        chunks[3],
    );
}

fn history_lines(patient: &Patient) -> Vec<Line<'static>> {
    let survey = &patient.survey;
    let mut lines = Vec::new();

    if let Some(diagnosed) = &survey.diagnosed_diseases {
        let items: Vec<String> = diagnosed
            .checked()
            .map(|c| match diagnosed.detail(c) {
                Some(age) => format!("{} ({age})", c.label()),
                None => c.label().to_string(),
            })
            .chain(diagnosed.other().map(str::to_string))
            .collect();
        if !items.is_empty() {
            lines.push(field_line("진단 질환", items.join(", ")));
        }
    }

    if let Some(family) = &survey.family_history {
        let items: Vec<String> = family
            .checked()
            .map(|c| match family.detail(c) {
                Some(relation) => format!("{} ({relation})", c.label()),
                None => c.label().to_string(),
            })
            .collect();
        if !items.is_empty() {
            lines.push(field_line("가족력", items.join(", ")));
        }
    }

    if let Some(hereditary) = &survey.hereditary_diseases {
        let items: Vec<String> = hereditary
            .checked()
            .map(|c| c.label().to_string())
            .chain(hereditary.other().map(str::to_string))
            .collect();
        if !items.is_empty() {
            lines.push(field_line("유전 질환", items.join(", ")));
        }
    }

    for field in [SurveyField::CurrentMedications, SurveyField::AllergiesToMedication] {
        if let Some(value) = survey.text(field) {
            lines.push(field_line(field.label(), value.to_string()));
        }
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "설문 응답이 없습니다.",
            CareTheme::text_muted(),
        )));
    }
    lines
}

fn render_analysis_column(f: &mut Frame, area: Rect, panels: &TwinPanels) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Length(4),
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let summary = match panels {
        TwinPanels::Ready(summary) => summary,
        TwinPanels::Pending | TwinPanels::Unavailable => {
            let text = if matches!(panels, TwinPanels::Pending) {
                PENDING
            } else {
                "분석 결과가 없습니다."
            };
            for (chunk, title) in chunks.iter().zip([
                "분석 개요",
                "희귀 질환",
                "약물 반응",
                "웰니스",
                "유전 상담",
                "보고서",
            ]) {
                f.render_widget(
                    Paragraph::new(Span::styled(text, CareTheme::text_muted()))
                        .block(panel(title))
                        .wrap(Wrap { trim: true }),
                    *chunk,
                );
            }
            return;
        }
    };

    let sample = if summary.sample_data { "분석 개요 (샘플 데이터)" } else { "분석 개요" };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("분석 질환 ", CareTheme::text_secondary()),
            Span::styled(summary.diseases_analyzed.to_string(), CareTheme::title()),
            Span::styled("   발견 변이 ", CareTheme::text_secondary()),
            Span::styled(summary.variants_found.to_string(), CareTheme::title()),
        ]))
        .block(panel(sample)),
        chunks[0],
    );

    f.render_widget(Paragraph::new(rare_disease_lines(summary)).block(panel("희귀 질환")), chunks[1]);

    let drug = summary.drug_response;
    f.render_widget(
        Paragraph::new(vec![
            Line::from(vec![
                Span::styled(format!("{}", drug.analyzed()), CareTheme::title()),
                Span::styled("개 약물 분석", CareTheme::text_secondary()),
            ]),
            Line::from(vec![
                Span::styled(
                    format!("{}: {}  ", VariantTier::Actionable.label(), drug.actionable),
                    CareTheme::tier(VariantTier::Actionable),
                ),
                Span::styled(
                    format!("{}: {}", VariantTier::Informative.label(), drug.informative),
                    CareTheme::tier(VariantTier::Informative),
                ),
            ]),
        ])
        .block(panel("약물 반응")),
        chunks[2],
    );

    let wellness = summary.wellness;
    f.render_widget(
        Paragraph::new(vec![
            Line::from(vec![
                Span::styled(format!("{}", wellness.genes_tested), CareTheme::title()),
                Span::styled("개 유전자 검사", CareTheme::text_secondary()),
            ]),
            field_line("영양", wellness.nutrition.to_string()),
            field_line("운동", wellness.fitness.to_string()),
            field_line("장수", wellness.longevity.to_string()),
        ])
        .block(panel("웰니스"))
        .wrap(Wrap { trim: true }),
        chunks[3],
    );
    let meeting: Vec<Span> = MeetingAction::ALL
        .iter()
        .enumerate()
        .flat_map(|(idx, action)| {
            [
                Span::styled(format!("[{}] ", idx + 1), CareTheme::key_hint()),
                Span::styled(format!("{}  ", action.label()), CareTheme::text()),
            ]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(meeting)).block(panel("유전 상담")), chunks[4]);

    let reports: Vec<Line> = if summary.reports.is_empty() {
        vec![Line::from(Span::styled("생성된 보고서가 없습니다.", CareTheme::text_muted()))]
    } else {
        summary
            .reports
            .iter()
            .map(|r| Line::from(Span::styled(r.clone(), CareTheme::text())))
            .collect()
    };
    f.render_widget(Paragraph::new(reports).block(panel("보고서")), chunks[5]);
}

fn rare_disease_lines(summary: &TwinSummary) -> Vec<Line<'static>> {
    let rare = summary.rare_disease;
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{}", rare.detected()), CareTheme::title()),
        Span::styled("개 변이 검출", CareTheme::text_secondary()),
    ])];
    for tier in VariantTier::RARE_DISEASE {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", tier.label()), CareTheme::text_secondary()),
            Span::styled(rare.count(tier).to_string(), CareTheme::tier(tier)),
        ]));
    }
    lines
}
