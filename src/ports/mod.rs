//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and external systems (patient API, local
//! credential state, analysis results).

mod analysis;
mod credentials;
mod patient_api;

pub use analysis::AnalysisSource;
pub use credentials::{CredentialStore, DEFAULT_PASSWORD};
pub use patient_api::{ApiError, PatientApi};
