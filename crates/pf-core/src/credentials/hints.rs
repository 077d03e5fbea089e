//! Human-readable text for rule identifiers.

use super::email::{EmailRule, EmailValidation};
use super::password::{PasswordPolicy, PasswordRule, PasswordValidation};

/// Message shown under the email field when a rule fails.
pub fn email_hint(rule: EmailRule) -> &'static str {
    match rule {
        EmailRule::Required => "Email is required",
        EmailRule::InvalidFormat => "Please enter a valid email address",
    }
}

/// Requirement text for a password rule. The length rule names the
/// configured minimum.
pub fn password_hint(rule: PasswordRule, policy: &PasswordPolicy) -> String {
    match rule {
        PasswordRule::MinLength => format!("At least {} characters", policy.min_length),
        PasswordRule::HasUpperCase => "At least one uppercase letter".to_string(),
        PasswordRule::HasLowerCase => "At least one lowercase letter".to_string(),
        PasswordRule::HasNumber => "At least one number".to_string(),
        PasswordRule::HasSpecial => "At least one special character".to_string(),
    }
}

/// One line of a password requirement checklist.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RequirementLine {
    pub rule: PasswordRule,
    pub met: bool,
    pub text: String,
}

/// Full checklist in rule order, met and unmet alike.
pub fn password_checklist(
    result: &PasswordValidation,
    policy: &PasswordPolicy,
) -> Vec<RequirementLine> {
    PasswordRule::ALL
        .iter()
        .map(|rule| RequirementLine {
            rule: *rule,
            met: result.is_satisfied(*rule),
            text: password_hint(*rule, policy),
        })
        .collect()
}

pub fn email_hints(result: &EmailValidation) -> Vec<&'static str> {
    result.reasons.iter().map(|r| email_hint(*r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{validate_email, validate_password};

    #[test]
    fn test_email_hints() {
        assert_eq!(email_hints(&validate_email("")), vec!["Email is required"]);
        assert_eq!(
            email_hints(&validate_email("nope")),
            vec!["Please enter a valid email address"]
        );
        assert!(email_hints(&validate_email("user@example.com")).is_empty());
    }

    #[test]
    fn test_checklist_covers_every_rule() {
        let policy = PasswordPolicy::default();
        let lines = password_checklist(&validate_password("abcdefgh"), &policy);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].text, "At least 8 characters");
        assert!(lines[0].met);
        assert!(!lines[1].met);
        assert!(lines[2].met);
        assert!(!lines[3].met);
        assert!(!lines[4].met);
    }

    #[test]
    fn test_min_length_hint_uses_policy() {
        let policy = PasswordPolicy::new(12);
        assert_eq!(
            password_hint(PasswordRule::MinLength, &policy),
            "At least 12 characters"
        );
    }
}
