//! Analysis port: per-patient digital-twin results.

use crate::domain::{Patient, TwinSummary};

/// Source of digital-twin analysis summaries.
pub trait AnalysisSource: Send + Sync {
    /// Summary for a patient, or `None` if no results exist.
    fn twin_summary(&self, patient: &Patient) -> Option<TwinSummary>;
}
