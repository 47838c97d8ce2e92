//! Fixture adapter: AnalysisSource returning the same sample figures for
//! every patient.
//!
//! No per-patient analysis backend exists yet. Results are flagged as sample
//! data so the detail screen can say so.

use crate::domain::{Patient, TwinSummary};
use crate::ports::AnalysisSource;

#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureAnalysis;

impl AnalysisSource for FixtureAnalysis {
    fn twin_summary(&self, _patient: &Patient) -> Option<TwinSummary> {
        Some(TwinSummary::sample())
    }
}
