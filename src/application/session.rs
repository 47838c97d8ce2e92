//! Session service: demo login gate and account password.
//!
//! # Demo-grade authentication
//!
//! Login checks a fixed email and the locally stored password, then stores a
//! fixed token. There is no identity provider, lockout or rate limiting.

use std::sync::Arc;

use crate::domain::ValidationError;
use crate::ports::CredentialStore;

/// The only accepted login email.
pub const DEMO_EMAIL: &str = "demo@predictivcare.com";

/// Token stored on successful login.
pub const DEMO_TOKEN: &str = "dummy_auth_token_12345";

/// Minimum length (in characters) of a new password.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Errors from login, password checks and password changes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Current password is incorrect")]
    IncorrectCurrentPassword,

    #[error("New password is too short")]
    PasswordTooShort,

    #[error("New password and confirmation differ")]
    PasswordMismatch,

    #[error("Password is empty")]
    EmptyPassword,

    /// Confirmation password for a destructive action did not match.
    #[error("Password rejected")]
    PasswordRejected,

    #[error("Credential store error: {0}")]
    Store(String),
}

impl AuthError {
    /// Localized text shown to the practitioner.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "이메일 또는 비밀번호가 올바르지 않습니다.",
            Self::IncorrectCurrentPassword => "현재 비밀번호가 올바르지 않습니다.",
            Self::PasswordTooShort => "새 비밀번호는 6자 이상이어야 합니다.",
            Self::PasswordMismatch => "새 비밀번호와 비밀번호 확인이 일치하지 않습니다.",
            Self::EmptyPassword => "비밀번호를 입력해주세요.",
            Self::PasswordRejected => "비밀번호가 일치하지 않습니다. 환자를 삭제할 수 없습니다.",
            Self::Store(_) => "로컬 저장소 오류가 발생했습니다.",
        }
    }
}

/// Service guarding authenticated screens.
pub struct SessionService<C>
where
    C: CredentialStore,
{
    store: Arc<C>,
}

impl<C> Clone for SessionService<C>
where
    C: CredentialStore,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<C> SessionService<C>
where
    C: CredentialStore,
{
    pub fn new(store: Arc<C>) -> Self {
        Self { store }
    }

    fn store_err(e: C::Error) -> AuthError {
        AuthError::Store(e.to_string())
    }

    /// Whether a token is stored. A store failure counts as logged out.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        match self.store.load_token() {
            Ok(token) => token.is_some(),
            Err(e) => {
                tracing::warn!("Failed to read session token: {e}");
                false
            }
        }
    }

    /// Check the demo email and stored password; store the token on success.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidCredentials` on any mismatch.
    pub fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let email_ok = email == DEMO_EMAIL;
        let password_ok = self.store.password_matches(password).map_err(Self::store_err)?;
        if !(email_ok && password_ok) {
            tracing::info!("Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        self.store.save_token(DEMO_TOKEN).map_err(Self::store_err)?;
        tracing::info!("Login succeeded");
        Ok(())
    }

    /// Remove the token.
    ///
    /// # Errors
    /// Returns error if the store cannot be written.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.clear_token().map_err(Self::store_err)?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Confirm a destructive action with the account password.
    ///
    /// # Errors
    /// `EmptyPassword` for blank input, `PasswordRejected` on mismatch.
    pub fn verify_password(&self, candidate: &str) -> Result<(), AuthError> {
        if candidate.is_empty() {
            return Err(AuthError::EmptyPassword);
        }
        if self.store.password_matches(candidate).map_err(Self::store_err)? {
            Ok(())
        } else {
            Err(AuthError::PasswordRejected)
        }
    }

    /// Replace the password and end the session.
    ///
    /// Checks run in order: current password, new length, confirmation.
    ///
    /// # Errors
    /// Returns the first failed check.
    pub fn change_password(&self, current: &str, new: &str, confirm: &str) -> Result<(), AuthError> {
        if !self.store.password_matches(current).map_err(Self::store_err)? {
            return Err(AuthError::IncorrectCurrentPassword);
        }
        if new.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AuthError::PasswordTooShort);
        }
        if new != confirm {
            return Err(AuthError::PasswordMismatch);
        }

        self.store.set_password(new).map_err(Self::store_err)?;
        self.store.clear_token().map_err(Self::store_err)?;
        tracing::info!("Password changed; session ended");
        Ok(())
    }
}

/// Editable profile names. Kept locally only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            first_name: "demo".to_string(),
            last_name: "user".to_string(),
        }
    }
}

impl Profile {
    /// Fixed account email, not editable.
    #[must_use]
    pub fn email(&self) -> &'static str {
        DEMO_EMAIL
    }

    /// Validate and apply new names.
    ///
    /// # Errors
    /// Returns `ValidationError::EmptyName` if either part is blank.
    pub fn update(&mut self, first_name: &str, last_name: &str) -> Result<(), ValidationError> {
        if first_name.trim().is_empty() || last_name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        self.first_name = first_name.trim().to_string();
        self.last_name = last_name.trim().to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::SqliteCredentialStore;
    use crate::ports::DEFAULT_PASSWORD;

    fn service() -> SessionService<SqliteCredentialStore> {
        SessionService::new(Arc::new(
            SqliteCredentialStore::in_memory().expect("Should create db"),
        ))
    }

    #[test]
    fn test_login_and_logout() {
        let session = service();
        assert!(!session.is_authenticated());

        session.login(DEMO_EMAIL, DEFAULT_PASSWORD).expect("Should log in");
        assert!(session.is_authenticated());

        session.logout().expect("Should log out");
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_login_rejections() {
        let session = service();
        assert_eq!(
            session.login("other@predictivcare.com", DEFAULT_PASSWORD),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(session.login(DEMO_EMAIL, "wrong"), Err(AuthError::InvalidCredentials));
        assert_eq!(
            session.login(" demo@predictivcare.com ", DEFAULT_PASSWORD),
            Err(AuthError::InvalidCredentials)
        );
        assert!(!session.is_authenticated());
        assert_eq!(
            AuthError::InvalidCredentials.user_message(),
            "이메일 또는 비밀번호가 올바르지 않습니다."
        );
    }

    #[test]
    fn test_verify_password() {
        let session = service();
        assert_eq!(session.verify_password(""), Err(AuthError::EmptyPassword));
        assert_eq!(session.verify_password("nope"), Err(AuthError::PasswordRejected));
        assert!(session.verify_password(DEFAULT_PASSWORD).is_ok());
    }

    #[test]
    fn test_change_password_rules() {
        let session = service();
        session.login(DEMO_EMAIL, DEFAULT_PASSWORD).expect("Should log in");

        assert_eq!(
            session.change_password("wrong", "abcdef", "abcdef"),
            Err(AuthError::IncorrectCurrentPassword)
        );
        assert_eq!(
            session.change_password(DEFAULT_PASSWORD, "abc", "abc"),
            Err(AuthError::PasswordTooShort)
        );
        assert_eq!(
            session.change_password(DEFAULT_PASSWORD, "abcdef", "abcdeg"),
            Err(AuthError::PasswordMismatch)
        );
        assert!(session.is_authenticated());

        session
            .change_password(DEFAULT_PASSWORD, "abcdef", "abcdef")
            .expect("Should change");
        assert!(!session.is_authenticated());
        assert_eq!(session.login(DEMO_EMAIL, DEFAULT_PASSWORD), Err(AuthError::InvalidCredentials));
        session.login(DEMO_EMAIL, "abcdef").expect("Should log in with new password");
    }

    #[test]
    fn test_password_length_counts_characters() {
        let session = service();
        // six Hangul syllables are six characters, not eighteen bytes
        assert!(session.change_password(DEFAULT_PASSWORD, "가나다라마바", "가나다라마바").is_ok());
        let session = service();
        assert_eq!(
            session.change_password(DEFAULT_PASSWORD, "가나다라마", "가나다라마"),
            Err(AuthError::PasswordTooShort)
        );
    }

    #[test]
    fn test_profile_requires_both_names() {
        let mut profile = Profile::default();
        assert_eq!(profile.update("길동", " "), Err(ValidationError::EmptyName));
        profile.update("길동", "홍").expect("Should update");
        assert_eq!(profile.last_name, "홍");
        assert_eq!(profile.email(), DEMO_EMAIL);
    }
}
