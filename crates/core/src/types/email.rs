//! Operator email address.

use core::fmt;

use serde::{Deserialize, Serialize};

/// RFC 5321 upper bound on a full address.
const MAX_LEN: usize = 254;

/// Reasons an email address fails to parse.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,
    #[error("email must be at most {MAX_LEN} characters")]
    TooLong,
    #[error("email must look like local@domain")]
    Malformed,
}

/// An email address with basic structural validation.
///
/// Only the shape is checked (non-empty local part and domain around a single
/// `@`, within the RFC 5321 length limit); full RFC 5322 parsing is the auth
/// service's problem. Deserialization is transparent and does not re-validate,
/// since addresses arriving over the wire were validated upstream.
///
/// ```
/// use ageless_core::Email;
///
/// assert!(Email::parse("gm@agelessrepublic.gg").is_ok());
/// assert!(Email::parse("no-at-symbol").is_err());
/// assert!(Email::parse("@missing.local").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parse and validate an email address.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError`] when the input is empty, too long, or not of
    /// the form `local@domain`.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        if input.is_empty() {
            return Err(EmailError::Empty);
        }
        if input.len() > MAX_LEN {
            return Err(EmailError::TooLong);
        }
        match input.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(input.to_owned()))
            }
            _ => Err(EmailError::Malformed),
        }
    }

    /// The address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_shapes() {
        for ok in [
            "gm@agelessrepublic.gg",
            "first.last@example.com",
            "ops+tag@sub.domain.co.uk",
            "a@b",
        ] {
            assert!(Email::parse(ok).is_ok(), "{ok} should parse");
        }
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(Email::parse(""), Err(EmailError::Empty));
        assert_eq!(Email::parse("no-at-symbol"), Err(EmailError::Malformed));
        assert_eq!(Email::parse("@domain.gg"), Err(EmailError::Malformed));
        assert_eq!(Email::parse("local@"), Err(EmailError::Malformed));
    }

    #[test]
    fn test_rejects_over_length_limit() {
        let long = format!("{}@example.com", "x".repeat(250));
        assert_eq!(Email::parse(&long), Err(EmailError::TooLong));
    }

    #[test]
    fn test_serde_is_transparent() {
        let email = Email::parse("ops@agelessrepublic.gg").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, r#""ops@agelessrepublic.gg""#);
        let back: Email = serde_json::from_str(&json).unwrap();
        assert_eq!(back, email);
    }
}
