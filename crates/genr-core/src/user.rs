//! Accounts and the credential store contract.

use async_trait::async_trait;
use thiserror::Error;

use crate::error::{GenrError, Result};

pub const MIN_USERNAME_CHARS: usize = 3;
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Account that is created when the registry is empty.
pub const SEED_USERNAME: &str = "Admin";
pub const SEED_PASSWORD: &str = "123";

/// Login and registration failures. Display strings are shown to the user.
#[derive(Error, Debug, Clone)]
pub enum AuthError {
    #[error("Username dan password tidak boleh kosong.")]
    EmptyFields,

    #[error("Username atau password salah.")]
    InvalidCredentials,

    #[error("Username minimal 3 karakter.")]
    UsernameTooShort,

    #[error("Password minimal 6 karakter.")]
    PasswordTooShort,

    #[error("Username \"{0}\" sudah digunakan.")]
    UsernameTaken(String),

    #[error(transparent)]
    Store(#[from] GenrError),
}

/// Checks registration input and returns the trimmed username.
pub fn validate_registration<'a>(
    username: &'a str,
    password: &str,
) -> std::result::Result<&'a str, AuthError> {
    let username = username.trim();
    if username.chars().count() < MIN_USERNAME_CHARS {
        return Err(AuthError::UsernameTooShort);
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AuthError::PasswordTooShort);
    }
    Ok(username)
}

/// Message shown after a successful registration.
pub fn registration_message(username: &str) -> String {
    format!("Akun \"{username}\" berhasil dibuat! Silakan login.")
}

/// Registry of accounts plus the remembered logged-in user.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Creates the seed account when no account exists. Returns whether it
    /// did.
    async fn ensure_seeded(&self) -> Result<bool>;

    /// Whether `password` matches the stored credential of `username`.
    /// Unknown users do not match.
    async fn verify(&self, username: &str, password: &str) -> Result<bool>;

    /// Adds an account. Fails with [`AuthError::UsernameTaken`] when the name
    /// exists; the existing entry is left untouched.
    async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> std::result::Result<(), AuthError>;

    async fn remembered_user(&self) -> Result<Option<String>>;

    async fn remember_user(&self, username: &str) -> Result<()>;

    async fn forget_user(&self) -> Result<()>;
}
