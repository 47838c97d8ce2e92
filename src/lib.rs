//! # PredictivCare
//!
//! Terminal console for the PredictivCare genetic digital-twin service.
//!
//! Practitioners log in, browse and filter patients, add, edit or delete
//! records, inspect each patient's digital twin and fill the intake survey.
//! Patient records live behind an external REST API; the only local state is
//! the demo session token and simulated password.
//!
//! ## Architecture
//!
//! - `domain`: Patient, DNA status, survey and digital-twin types
//! - `ports`: Trait seams for the patient API, credentials and analysis results
//! - `adapters`: HTTP, in-memory, SQLite and fixture implementations, log sanitizing
//! - `application`: Session gate, patient use cases, filtering, survey wizard, navigation
//! - `tui`: Terminal screens and the background request worker

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use config::Config;
pub use domain::{DnaStatus, Patient, Survey};

/// Result type for PredictivCare operations
pub type Result<T> = std::result::Result<T, CareError>;

/// Main error type for PredictivCare
#[derive(Debug, thiserror::Error)]
pub enum CareError {
    #[error("Patient API request failed: {0}")]
    Api(#[from] ports::ApiError),

    #[error("Credential store failed: {0}")]
    Store(#[from] adapters::StoreError),

    #[error("Invalid patient data: {0}")]
    Validation(#[from] domain::ValidationError),

    #[error("Authentication failed: {0}")]
    Auth(#[from] application::AuthError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CareError {
    /// Localized text shown to the practitioner.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e.user_message(),
            Self::Validation(e) => e.user_message().to_string(),
            Self::Auth(e) => e.user_message().to_string(),
            Self::Store(_) => "로컬 저장소 오류가 발생했습니다.".to_string(),
            Self::Config(msg) => format!("설정 오류: {msg}"),
            Self::Io(e) => format!("입출력 오류: {e}"),
            Self::Serialization(e) => format!("데이터 형식 오류: {e}"),
        }
    }
}
