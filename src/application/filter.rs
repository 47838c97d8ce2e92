//! In-memory filtering of the patient list.

use crate::domain::{DnaStatus, Patient};

/// Field the search term applies to.
///
/// Only `Name` filters today. The others are offered in the selector but do
/// not restrict results until records carry the matching data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchField {
    #[default]
    Name,
    Diseases,
    Symptoms,
    Drugs,
    Genes,
}

impl SearchField {
    pub const ALL: [SearchField; 5] = [
        SearchField::Name,
        SearchField::Diseases,
        SearchField::Symptoms,
        SearchField::Drugs,
        SearchField::Genes,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "이름",
            Self::Diseases => "질병",
            Self::Symptoms => "증상",
            Self::Drugs => "약물",
            Self::Genes => "유전자",
        }
    }

    /// Next field in selector order, wrapping.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// DNA status filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(DnaStatus),
}

impl StatusFilter {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "전체 DNA 분석 상태",
            Self::Only(status) => status.label(),
        }
    }

    /// Cycle All -> each status in order -> All.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Only(DnaStatus::ALL[0]),
            Self::Only(status) => {
                let idx = DnaStatus::ALL.iter().position(|s| *s == status).unwrap_or(0);
                DnaStatus::ALL
                    .get(idx + 1)
                    .map_or(Self::All, |next| Self::Only(*next))
            }
        }
    }

    fn matches(&self, status: DnaStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

/// Current list filter state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientFilter {
    pub field: SearchField,
    pub term: String,
    pub status: StatusFilter,
    pub show_deleted: bool,
}

impl PatientFilter {
    #[must_use]
    pub fn matches(&self, patient: &Patient) -> bool {
        self.matches_term(patient)
            && self.status.matches(patient.dna_status)
            && (self.show_deleted || !patient.is_deleted())
    }

    fn matches_term(&self, patient: &Patient) -> bool {
        let term = self.term.trim();
        if term.is_empty() {
            return true;
        }
        match self.field {
            SearchField::Name => patient
                .display_name()
                .to_lowercase()
                .contains(&term.to_lowercase()),
            SearchField::Diseases | SearchField::Symptoms | SearchField::Drugs | SearchField::Genes => true,
        }
    }

    /// Patients passing the filter, in roster order.
    pub fn apply<'a>(&'a self, patients: &'a [Patient]) -> impl Iterator<Item = &'a Patient> + 'a {
        patients.iter().filter(move |p| self.matches(p))
    }
}
