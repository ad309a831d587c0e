//! Session credential store
//!
//! The bearer token for the Posts API lives in a file written at login by the
//! protected-route collaborator. Submission code reads it at submit time and
//! passes it along explicitly; nothing in this crate caches it earlier.

use std::path::Path;

use secrecy::SecretString;

use crate::error::{ApiError, Result};

/// File-backed store for the session bearer token
#[derive(Debug, Clone)]
pub struct SessionStore {
    token_file: String,
}

impl SessionStore {
    /// Create a store over the given token file path (`~` and env vars are
    /// expanded on access).
    pub fn new(token_file: impl Into<String>) -> Self {
        Self {
            token_file: token_file.into(),
        }
    }

    /// Read the bearer token.
    ///
    /// The token is wrapped in [`SecretString`] so it is redacted from Debug
    /// output and zeroized on drop.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Authentication` if the file cannot be read or holds
    /// nothing but whitespace.
    pub fn load_token(&self) -> Result<SecretString> {
        let path = shellexpand::full(&self.token_file).map_err(|e| {
            ApiError::Authentication(format!("Failed to expand token file path: {}", e))
        })?;

        let token = std::fs::read_to_string(path.as_ref())
            .map_err(|e| {
                ApiError::Authentication(format!("Failed to read session token file: {}", e))
            })?
            .trim()
            .to_string();

        if token.is_empty() {
            return Err(ApiError::Authentication("Session token file is empty".to_string()).into());
        }

        Ok(SecretString::from(token))
    }

    /// Persist a token, creating parent directories as needed.
    ///
    /// Used by the login collaborator; the composer itself never writes here.
    pub fn store_token(&self, token: &str) -> Result<()> {
        let path = shellexpand::full(&self.token_file).map_err(|e| {
            ApiError::Authentication(format!("Failed to expand token file path: {}", e))
        })?;
        let path = Path::new(path.as_ref());

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ApiError::Authentication(format!("Failed to create token directory: {}", e))
            })?;
        }

        std::fs::write(path, token).map_err(|e| {
            ApiError::Authentication(format!("Failed to write session token file: {}", e))
        })?;

        Ok(())
    }
}
