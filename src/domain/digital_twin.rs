//! Digital-twin analysis summaries shown on the patient detail screen.

use super::patient::Patient;

/// Reporting tier of a genetic variant finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantTier {
    Actionable,
    Significant,
    Notable,
    Exploratory,
    Informative,
}

impl VariantTier {
    /// Tiers used by the rare-disease breakdown.
    pub const RARE_DISEASE: [VariantTier; 4] = [
        VariantTier::Actionable,
        VariantTier::Significant,
        VariantTier::Notable,
        VariantTier::Exploratory,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Actionable => "의학적 조치 필요",
            Self::Significant => "주요 변이",
            Self::Notable => "주목할 만한 변이",
            Self::Exploratory => "탐색성 변이",
            Self::Informative => "정보성 변이",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RareDiseaseSummary {
    pub actionable: u32,
    pub significant: u32,
    pub notable: u32,
    pub exploratory: u32,
}

impl RareDiseaseSummary {
    #[must_use]
    pub fn detected(&self) -> u32 {
        self.actionable + self.significant + self.notable + self.exploratory
    }

    #[must_use]
    pub fn count(&self, tier: VariantTier) -> u32 {
        match tier {
            VariantTier::Actionable => self.actionable,
            VariantTier::Significant => self.significant,
            VariantTier::Notable => self.notable,
            VariantTier::Exploratory => self.exploratory,
            VariantTier::Informative => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrugResponseSummary {
    pub actionable: u32,
    pub informative: u32,
}

impl DrugResponseSummary {
    #[must_use]
    pub fn analyzed(&self) -> u32 {
        self.actionable + self.informative
    }
}

/// Wellness gene tallies. Category counts are findings, not a partition of
/// the tested genes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WellnessSummary {
    pub genes_tested: u32,
    pub nutrition: u32,
    pub fitness: u32,
    pub longevity: u32,
}

/// Everything the analysis panels display for one patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwinSummary {
    pub diseases_analyzed: u32,
    pub variants_found: u32,
    pub rare_disease: RareDiseaseSummary,
    pub drug_response: DrugResponseSummary,
    pub wellness: WellnessSummary,
    /// Titles of generated reports
    pub reports: Vec<String>,
    /// Numbers are placeholders rather than results for this patient.
    pub sample_data: bool,
}

impl TwinSummary {
    /// Placeholder figures used until per-patient results exist.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            diseases_analyzed: 28_594,
            variants_found: 17_950,
            rare_disease: RareDiseaseSummary {
                actionable: 0,
                significant: 0,
                notable: 0,
                exploratory: 1_666,
            },
            drug_response: DrugResponseSummary {
                actionable: 14,
                informative: 31,
            },
            wellness: WellnessSummary {
                genes_tested: 54,
                nutrition: 8,
                fitness: 9,
                longevity: 7,
            },
            reports: Vec::new(),
            sample_data: true,
        }
    }
}

/// What the analysis panels should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TwinPanels {
    /// Sample not yet received
    Pending,
    Ready(TwinSummary),
    /// No analysis source had results for this patient
    Unavailable,
}

impl TwinPanels {
    #[must_use]
    pub fn for_patient(patient: &Patient, summary: Option<TwinSummary>) -> Self {
        if patient.dna_status.is_awaiting_sample() {
            return Self::Pending;
        }
        summary.map_or(Self::Unavailable, Self::Ready)
    }
}

/// Genetic counseling meeting controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingAction {
    Start,
    Join,
    Restart,
}

impl MeetingAction {
    pub const ALL: [MeetingAction; 3] = [MeetingAction::Start, MeetingAction::Join, MeetingAction::Restart];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Start => "미팅 시작",
            Self::Join => "미팅 참여",
            Self::Restart => "미팅 재시작",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DnaStatus;

    #[test]
    fn test_sample_totals() {
        let sample = TwinSummary::sample();
        assert_eq!(sample.rare_disease.detected(), 1_666);
        assert_eq!(sample.drug_response.analyzed(), 45);
        assert_eq!(sample.wellness.genes_tested, 54);
        assert!(sample.sample_data);
        assert!(sample.reports.is_empty());
    }

    #[test]
    fn test_pending_until_sample_arrives() {
        let waiting = Patient::new("p1", "철수", "김", DnaStatus::AwaitingSample, "PRDV-AAAA-BBBB-CCCC");
        assert_eq!(
            TwinPanels::for_patient(&waiting, Some(TwinSummary::sample())),
            TwinPanels::Pending
        );

        let done = Patient::new("p2", "영희", "이", DnaStatus::Completed, "PRDV-AAAA-BBBB-DDDD");
        assert!(matches!(
            TwinPanels::for_patient(&done, Some(TwinSummary::sample())),
            TwinPanels::Ready(_)
        ));
        assert_eq!(TwinPanels::for_patient(&done, None), TwinPanels::Unavailable);
    }
}
