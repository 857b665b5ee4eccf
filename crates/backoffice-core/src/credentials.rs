//! Login and registration input.

use std::fmt;

use serde::Serialize;
use validator::Validate;

/// Login credentials for the back-office API.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use backoffice_core::Credentials;
///
/// let creds = Credentials::new("admin@advanzpay.com", "hunter22");
/// assert_eq!(creds.email(), "admin@advanzpay.com");
/// ```
#[derive(Clone, Serialize, Validate)]
pub struct Credentials {
    #[validate(email(message = "please enter a valid email address"))]
    email: String,
    #[validate(length(min = 1, message = "password is required"))]
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns the login email.
    pub fn email(&self) -> &str {
        &self.email
    }
}

// Intentionally hide password in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Self-service registration input.
#[derive(Clone, Serialize, Validate)]
pub struct Registration {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_hide_password_in_debug() {
        let creds = Credentials::new("admin@advanzpay.com", "secret123");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("admin@advanzpay.com"));
        assert!(!debug.contains("secret123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn credentials_reject_malformed_email() {
        assert!(Credentials::new("not-an-email", "pw").validate().is_err());
        assert!(Credentials::new("a@b.co", "pw").validate().is_ok());
    }

    #[test]
    fn registration_requires_long_password() {
        let reg = Registration {
            name: "Admin".into(),
            email: "admin@advanzpay.com".into(),
            password: "short".into(),
        };
        assert!(reg.validate().is_err());
    }
}
