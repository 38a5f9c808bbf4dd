//! Email address type for the sign-in and registration forms.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why an email address was rejected before any network call.
///
/// The `Display` form of every variant is the user-facing message the form
/// shows, so callers surface rejections with `err.to_string()`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input was empty or only whitespace.
    #[error("Please enter your email address")]
    Blank,
    /// The input exceeds the RFC 5321 length limit.
    #[error("Email address is too long")]
    TooLong,
    /// The input does not look like `local@domain`.
    #[error("Please enter a valid email address")]
    Malformed,
}

/// A structurally plausible email address.
///
/// The check here is deliberately shallow: one `@`, a non-empty local part,
/// and a dotted domain. Its job is to reject obviously malformed input
/// before a request is made; the backend remains the authority on whether
/// an address is real.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email`, trimming surrounding whitespace first.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError`] when the trimmed input is blank, too long, or
    /// not shaped like `local@domain.tld`.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(EmailError::Blank);
        }
        if trimmed.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong);
        }

        let (local, domain) = trimmed.split_once('@').ok_or(EmailError::Malformed)?;
        if local.is_empty() || domain.is_empty() || domain.contains('@') || !domain.contains('.') {
            return Err(EmailError::Malformed);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// The address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Email` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
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
    fn test_accepts_ordinary_addresses() {
        assert!(Email::parse("rose@daisyatelier.com").is_ok());
        assert!(Email::parse("user.name+tag@domain.co.uk").is_ok());
        assert!(Email::parse("a@b.c").is_ok());
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let email = Email::parse("  rose@daisyatelier.com ").unwrap();
        assert_eq!(email.as_str(), "rose@daisyatelier.com");
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(Email::parse(""), Err(EmailError::Blank));
        assert_eq!(Email::parse("   "), Err(EmailError::Blank));
    }

    #[test]
    fn test_length_limit() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(Email::parse(&long), Err(EmailError::TooLong));
    }

    #[test]
    fn test_rejects_malformed_shapes() {
        for input in [
            "no-at-symbol",
            "@daisyatelier.com",
            "rose@",
            "rose@localhost",
            "rose@a@b.com",
        ] {
            assert_eq!(Email::parse(input), Err(EmailError::Malformed), "{input}");
        }
    }

    #[test]
    fn test_rejection_messages_are_user_facing() {
        assert_eq!(
            EmailError::Malformed.to_string(),
            "Please enter a valid email address"
        );
        assert_eq!(
            EmailError::Blank.to_string(),
            "Please enter your email address"
        );
    }

    #[test]
    fn test_serde_transparent() {
        let email = Email::parse("rose@daisyatelier.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"rose@daisyatelier.com\"");

        let parsed: Email = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, email);
    }

    #[test]
    fn test_from_str() {
        let email: Email = "rose@daisyatelier.com".parse().unwrap();
        assert_eq!(email.as_ref(), "rose@daisyatelier.com");
    }
}
