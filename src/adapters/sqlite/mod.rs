//! SQLite adapter: Implementation of CredentialStore.
//!
//! Persists the session token and an Argon2id hash of the simulated account
//! password. Patient records are never stored locally.
//!
//! # Demo login
//!
//! The store is seeded with a fixed default password on first open. This is a
//! placeholder for a real identity provider and offers no real security.
//!
//! # Mutex Behavior
//!
//! The connection is protected by `Mutex`. A poisoned mutex (from a panic in
//! another thread) will cause panic.
use std::path::Path;
use std::sync::Mutex;

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version};
use rusqlite::{params, Connection, OptionalExtension};

use crate::ports::{CredentialStore, DEFAULT_PASSWORD};

// 19 MiB, 2 passes: the argon2 crate's recommended minimum.
const ARGON2_MEMORY_KIB: u32 = 19_456;
const ARGON2_ITERATIONS: u32 = 2;
const ARGON2_PARALLELISM: u32 = 1;

/// Error type for credential store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("No password is stored")]
    MissingPassword,
}

/// SQLite credential store.
pub struct SqliteCredentialStore {
    conn: Mutex<Connection>,
}

impl SqliteCredentialStore {
    /// Open (or create) the store at the given path.
    ///
    /// # Errors
    /// Returns error if the database cannot be opened or initialized.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    ///
    /// # Errors
    /// Returns error if the database cannot be created.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create tables and seed the default password on first run.
    fn init_schema(&self) -> Result<(), StoreError> {
        {
            let conn = self.conn.lock().expect("Lock failed");
            conn.execute_batch(
                r"
                CREATE TABLE IF NOT EXISTS session (
                    id INTEGER PRIMARY KEY CHECK (id = 1),
                    token TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS credentials (
                    id INTEGER PRIMARY KEY CHECK (id = 1),
                    password_hash TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );
                ",
            )?;

            let seeded: i64 = conn.query_row("SELECT COUNT(*) FROM credentials", [], |row| row.get(0))?;
            if seeded > 0 {
                return Ok(());
            }
        }

        tracing::info!("Seeding default demo password");
        self.set_password(DEFAULT_PASSWORD)
    }

    fn hasher() -> Result<Argon2<'static>, StoreError> {
        let params = Params::new(ARGON2_MEMORY_KIB, ARGON2_ITERATIONS, ARGON2_PARALLELISM, None)
            .map_err(|e| StoreError::Hashing(format!("Invalid Argon2 params: {e}")))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    fn hash_password(password: &str) -> Result<String, StoreError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::hasher()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| StoreError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }
}

impl CredentialStore for SqliteCredentialStore {
    type Error = StoreError;

    fn load_token(&self) -> Result<Option<String>, Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");
        let token = conn
            .query_row("SELECT token FROM session WHERE id = 1", [], |row| row.get(0))
            .optional()?;
        Ok(token)
    }

    fn save_token(&self, token: &str) -> Result<(), Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");
        let now = chrono::Utc::now().to_rfc3339();
        conn.execute(
            "INSERT OR REPLACE INTO session (id, token, created_at) VALUES (1, ?1, ?2)",
            params![token, now],
        )?;
        Ok(())
    }

    fn clear_token(&self) -> Result<(), Self::Error> {
        let conn = self.conn.lock().expect("Lock failed");
        conn.execute("DELETE FROM session", [])?;
        Ok(())
    }

    fn password_matches(&self, candidate: &str) -> Result<bool, Self::Error> {
        let stored: Option<String> = {
            let conn = self.conn.lock().expect("Lock failed");
            conn.query_row("SELECT password_hash FROM credentials WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()?
        };
        let stored = stored.ok_or(StoreError::MissingPassword)?;

        let parsed = PasswordHash::new(&stored).map_err(|e| StoreError::Hashing(e.to_string()))?;
        Ok(Self::hasher()?
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok())
    }

    fn set_password(&self, password: &str) -> Result<(), Self::Error> {
        let hash = Self::hash_password(password)?;
        let conn = self.conn.lock().expect("Lock failed");
        let now = chrono::Utc::now().to_rfc3339();
        conn.execute(
            "INSERT OR REPLACE INTO credentials (id, password_hash, updated_at) VALUES (1, ?1, ?2)",
            params![hash, now],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_password_seeded() {
        let store = SqliteCredentialStore::in_memory().expect("Should create db");
        assert!(store.password_matches(DEFAULT_PASSWORD).expect("Should verify"));
        assert!(!store.password_matches("wrong").expect("Should verify"));
    }

    #[test]
    fn test_password_stored_hashed() {
        let store = SqliteCredentialStore::in_memory().expect("Should create db");
        let conn = store.conn.lock().expect("Lock failed");
        let hash: String = conn
            .query_row("SELECT password_hash FROM credentials", [], |row| row.get(0))
            .expect("Should read");
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains(DEFAULT_PASSWORD));
    }

    #[test]
    fn test_token_lifecycle() {
        let store = SqliteCredentialStore::in_memory().expect("Should create db");
        assert_eq!(store.load_token().expect("Should load"), None);

        store.save_token("dummy_auth_token_12345").expect("Should save");
        assert_eq!(
            store.load_token().expect("Should load").as_deref(),
            Some("dummy_auth_token_12345")
        );

        store.clear_token().expect("Should clear");
        assert_eq!(store.load_token().expect("Should load"), None);
    }

    #[test]
    fn test_set_password_replaces() {
        let store = SqliteCredentialStore::in_memory().expect("Should create db");
        store.set_password("newpass1").expect("Should set");
        assert!(store.password_matches("newpass1").expect("Should verify"));
        assert!(!store.password_matches(DEFAULT_PASSWORD).expect("Should verify"));
    }

    #[test]
    fn test_state_survives_reopen() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let path = dir.path().join("state.db");

        {
            let store = SqliteCredentialStore::new(&path).expect("Should open");
            store.set_password("changed1").expect("Should set");
            store.save_token("dummy_auth_token_12345").expect("Should save");
        }

        let reopened = SqliteCredentialStore::new(&path).expect("Should reopen");
        assert!(reopened.password_matches("changed1").expect("Should verify"));
        assert!(reopened.load_token().expect("Should load").is_some());
    }
}
