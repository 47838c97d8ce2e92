//! TUI module: Terminal User Interface using Ratatui.
//!
//! Screens for the practitioner console:
//! - Login and profile
//! - Patient list with filters and add/edit/delete overlays
//! - Digital-twin detail and the intake survey wizard

mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::CareTheme;
pub use worker::{ApiOutcome, ApiRequest, ApiResponse, ApiWorker, RequestKind};
