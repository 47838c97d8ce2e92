//! Credential store port: session token and the simulated account password.
//!
//! This backs a demo login only. There is no real identity provider.

/// Password seeded into a fresh store.
pub const DEFAULT_PASSWORD: &str = "qweasd31d";

/// Trait for local session and credential persistence.
pub trait CredentialStore: Send + Sync {
    /// Error type for store operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the persisted auth token, if logged in.
    ///
    /// # Errors
    /// Returns error if the store cannot be read.
    fn load_token(&self) -> Result<Option<String>, Self::Error>;

    /// Persist an auth token, replacing any previous one.
    ///
    /// # Errors
    /// Returns error if the store cannot be written.
    fn save_token(&self, token: &str) -> Result<(), Self::Error>;

    /// Remove the auth token.
    ///
    /// # Errors
    /// Returns error if the store cannot be written.
    fn clear_token(&self) -> Result<(), Self::Error>;

    /// Check a candidate against the stored password.
    ///
    /// # Errors
    /// Returns error if the store cannot be read.
    fn password_matches(&self, candidate: &str) -> Result<bool, Self::Error>;

    /// Replace the stored password.
    ///
    /// # Errors
    /// Returns error if hashing or writing fails.
    fn set_password(&self, password: &str) -> Result<(), Self::Error>;
}
