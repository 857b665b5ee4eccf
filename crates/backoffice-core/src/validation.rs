//! Client-side input checks.
//!
//! Write payloads derive [`Validate`]; services call [`check`] before
//! building a request so that a bad form never reaches the transport and is
//! never masked by a synthetic fallback.

use validator::{Validate, ValidateEmail};

use crate::error::{Error, InvalidInputError};

/// Run the derived validation rules for `input`.
pub fn check<T: Validate>(input: &T) -> Result<(), Error> {
    input.validate().map_err(Error::from)
}

/// Reject an empty or whitespace-only value.
pub fn require(field: &'static str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(InvalidInputError::Required { field }.into());
    }
    Ok(())
}

/// Email check used by forms that are not derive-validated.
pub fn require_email(value: &str) -> Result<(), Error> {
    require("email", value)?;
    if !value.validate_email() {
        return Err(InvalidInputError::Field {
            field: "email".to_string(),
            reason: "please enter a valid email address".to_string(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewCorpUser;

    #[test]
    fn check_reports_the_failing_field() {
        let user = NewCorpUser {
            name: "Admin".into(),
            email: "admin-at-advanzpay".into(),
            title: "Administrator".into(),
            mobile: "+1234567890".into(),
            role: 1,
        };
        let err = check(&user).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn require_rejects_blank() {
        assert!(require("token", "  ").is_err());
        assert!(require("token", "abc").is_ok());
    }

    #[test]
    fn require_email_checks_format() {
        assert!(require_email("").is_err());
        assert!(require_email("nobody").is_err());
        assert!(require_email("admin@advanzpay.com").is_ok());
    }
}
