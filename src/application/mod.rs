//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the console.

mod filter;
pub mod navigation;
mod patients;
mod session;
mod survey;

pub use filter::{PatientFilter, SearchField, StatusFilter};
pub use navigation::{resolve, sidebar_links, NavLink, Route};
pub use patients::{PatientList, PatientService};
pub use session::{AuthError, Profile, SessionService, DEMO_EMAIL, DEMO_TOKEN, MIN_PASSWORD_CHARS};
pub use survey::{HistorySection, SurveyWizard, FIRST_STEP, LAST_STEP, STEP_TITLES};
