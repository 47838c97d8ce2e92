//! Adapters layer: Concrete implementations of ports.
//!
//! - `http`: reqwest client for the patient REST API
//! - `memory`: in-memory patient API for offline mode and tests
//! - `sqlite`: SQLite session token and password hash
//! - `fixture`: sample digital-twin figures
//! - `sanitize`: PII filtering for logs

pub mod fixture;
pub mod http;
pub mod memory;
pub mod sanitize;
pub mod sqlite;

// Re-export store error for lib.rs
pub use sqlite::StoreError;
