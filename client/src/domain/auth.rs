//! Authentication primitives for the admin session gate.
//!
//! The login form submits both fields exactly as provided — empty or not —
//! because the server owns credential validation. The password still gets
//! zeroed on drop.

use serde_json::{Value, json};
use zeroize::Zeroizing;

/// Admin credentials carried to the login endpoint.
///
/// # Examples
/// ```
/// use client::domain::LoginCredentials;
///
/// let creds = LoginCredentials::new("admin", "password");
/// assert_eq!(creds.username(), "admin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Username as entered.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password as entered.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// JSON body for the login request.
    #[must_use]
    pub fn request_body(&self) -> Value {
        json!({
            "username": self.username(),
            "password": self.password(),
        })
    }
}
