//! Email address format validation.
//!
//! Format validity only: an address that passes here may still belong to no
//! account. The pattern accepts dotted or quoted local parts and either a
//! dotted domain with an alphabetic top-level label or a bracketed IPv4
//! literal.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Address shape used by both the login and registration forms.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("email pattern is a valid regex")
});

/// Email rule identifiers, reported in the order they were checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EmailRule {
    #[serde(rename = "required")]
    Required,
    #[serde(rename = "invalid format")]
    InvalidFormat,
}

impl EmailRule {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::InvalidFormat => "invalid format",
        }
    }
}

impl fmt::Display for EmailRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Outcome of [`validate_email`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailValidation {
    pub is_valid: bool,
    pub reasons: Vec<EmailRule>,
}

impl EmailValidation {
    fn from_reasons(reasons: Vec<EmailRule>) -> Self {
        Self {
            is_valid: reasons.is_empty(),
            reasons,
        }
    }

    /// First failed rule, if any.
    pub fn first_reason(&self) -> Option<EmailRule> {
        self.reasons.first().copied()
    }
}

/// Validate the format of an email address.
///
/// Empty input fails with [`EmailRule::Required`]; anything else that does
/// not match the address pattern fails with [`EmailRule::InvalidFormat`].
pub fn validate_email(input: &str) -> EmailValidation {
    let mut reasons = Vec::new();
    if input.is_empty() {
        reasons.push(EmailRule::Required);
    } else if !EMAIL_RE.is_match(input) {
        reasons.push(EmailRule::InvalidFormat);
    }
    EmailValidation::from_reasons(reasons)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_required() {
        let result = validate_email("");
        assert!(!result.is_valid);
        assert_eq!(result.reasons, vec![EmailRule::Required]);
    }

    #[test]
    fn test_valid_emails() {
        for email in [
            "user@example.com",
            "first.last@mail.example.com",
            "user+tag@example.org",
            "USER@EXAMPLE.COM",
            "a-b@sub-domain.example.co.uk",
            "\"john doe\"@example.com",
            "admin@[192.168.1.1]",
        ] {
            let result = validate_email(email);
            assert!(result.is_valid, "{email} should be valid");
            assert!(result.reasons.is_empty());
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "user@@example.com",
            "user@example",
            "notanemail",
            "user@",
            "@example.com",
            "user name@example.com",
            "user@example.c",
            "user@example.123",
            ".user@example.com",
            "user.@example.com",
            "us..er@example.com",
            "user@exa mple.com",
            "user@example.com\n",
            "a@b@example.com",
            "user(comment)@example.com",
        ] {
            let result = validate_email(email);
            assert!(!result.is_valid, "{email:?} should be invalid");
            assert_eq!(result.reasons, vec![EmailRule::InvalidFormat]);
        }
    }

    #[test]
    fn test_is_valid_tracks_reasons() {
        for email in ["", "x", "user@example.com"] {
            let result = validate_email(email);
            assert_eq!(result.is_valid, result.reasons.is_empty());
        }
    }

    #[test]
    fn test_idempotent() {
        for email in ["", "user@example.com", "user@@example.com"] {
            assert_eq!(validate_email(email), validate_email(email));
        }
    }

    #[test]
    fn test_rule_serialization() {
        let json = serde_json::to_string(&validate_email("")).unwrap();
        assert_eq!(json, r#"{"is_valid":false,"reasons":["required"]}"#);
        assert_eq!(EmailRule::InvalidFormat.to_string(), "invalid format");
    }
}
