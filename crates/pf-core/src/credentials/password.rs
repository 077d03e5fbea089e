//! Password strength rules.
//!
//! Every rule is evaluated on every call so callers can show all unmet
//! requirements at once.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum password length used when no policy is configured.
pub const DEFAULT_MIN_LENGTH: usize = 8;

/// Characters accepted by [`PasswordRule::HasSpecial`].
pub const SPECIAL_CHARACTERS: &[char] = &[
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '_', '+', '-', '=', '[', ']', '{', '}', ';',
    '\'', ':', '"', '\\', '|', ',', '.', '<', '>', '/', '?',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PasswordRule {
    #[serde(rename = "minLength")]
    MinLength,
    #[serde(rename = "hasUpperCase")]
    HasUpperCase,
    #[serde(rename = "hasLowerCase")]
    HasLowerCase,
    #[serde(rename = "hasNumber")]
    HasNumber,
    #[serde(rename = "hasSpecial")]
    HasSpecial,
}

impl PasswordRule {
    pub const ALL: [PasswordRule; 5] = [
        Self::MinLength,
        Self::HasUpperCase,
        Self::HasLowerCase,
        Self::HasNumber,
        Self::HasSpecial,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::MinLength => "minLength",
            Self::HasUpperCase => "hasUpperCase",
            Self::HasLowerCase => "hasLowerCase",
            Self::HasNumber => "hasNumber",
            Self::HasSpecial => "hasSpecial",
        }
    }
}

impl fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Outcome of a password check. `satisfied` and `failed` always partition
/// [`PasswordRule::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordValidation {
    pub is_valid: bool,
    pub satisfied: BTreeSet<PasswordRule>,
    pub failed: BTreeSet<PasswordRule>,
}

impl PasswordValidation {
    pub fn is_satisfied(&self, rule: PasswordRule) -> bool {
        self.satisfied.contains(&rule)
    }
}

/// Tunable part of the password rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
        }
    }
}

impl PasswordPolicy {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    fn check(&self, rule: PasswordRule, password: &str) -> bool {
        match rule {
            // Counted in characters, not bytes.
            PasswordRule::MinLength => password.chars().count() >= self.min_length,
            PasswordRule::HasUpperCase => password.chars().any(|c| c.is_ascii_uppercase()),
            PasswordRule::HasLowerCase => password.chars().any(|c| c.is_ascii_lowercase()),
            PasswordRule::HasNumber => password.chars().any(|c| c.is_ascii_digit()),
            PasswordRule::HasSpecial => password.chars().any(|c| SPECIAL_CHARACTERS.contains(&c)),
        }
    }

    /// Evaluate all five rules against `password`.
    pub fn validate(&self, password: &str) -> PasswordValidation {
        let (satisfied, failed): (BTreeSet<_>, BTreeSet<_>) = PasswordRule::ALL
            .iter()
            .copied()
            .partition(|rule| self.check(*rule, password));

        PasswordValidation {
            is_valid: failed.is_empty(),
            satisfied,
            failed,
        }
    }
}

/// Validate password strength with the default policy.
///
/// Requirements:
/// - At least 8 characters long
/// - Contains at least one ASCII uppercase letter
/// - Contains at least one ASCII lowercase letter
/// - Contains at least one ASCII digit
/// - Contains at least one character from [`SPECIAL_CHARACTERS`]
pub fn validate_password(password: &str) -> PasswordValidation {
    PasswordPolicy::default().validate(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(rules: &[PasswordRule]) -> BTreeSet<PasswordRule> {
        rules.iter().copied().collect()
    }

    #[test]
    fn test_all_rules_satisfied() {
        let result = validate_password("Abcdef1!");
        assert!(result.is_valid);
        assert_eq!(result.satisfied, set(&PasswordRule::ALL));
        assert!(result.failed.is_empty());
    }

    #[test]
    fn test_lowercase_only() {
        let result = validate_password("abcdefgh");
        assert!(!result.is_valid);
        assert_eq!(
            result.failed,
            set(&[
                PasswordRule::HasUpperCase,
                PasswordRule::HasNumber,
                PasswordRule::HasSpecial
            ])
        );
        assert_eq!(
            result.satisfied,
            set(&[PasswordRule::MinLength, PasswordRule::HasLowerCase])
        );
    }

    #[test]
    fn test_short_passwords_never_satisfy_min_length() {
        let mut candidate = String::new();
        for c in "Aa1!Bb2".chars() {
            candidate.push(c);
            let result = validate_password(&candidate);
            assert!(!result.is_satisfied(PasswordRule::MinLength), "{candidate}");
            assert!(!result.is_valid);
        }
    }

    #[test]
    fn test_every_character_class_with_length_is_valid() {
        for password in ["Aa1!aaaa", "Str0ng!Pass#2024", "Z9?zzzzzzzzz", "xY7\\abcd", "12345aB~."] {
            assert!(validate_password(password).is_valid, "{password}");
        }
    }

    #[test]
    fn test_rules_evaluated_independently() {
        let result = validate_password("");
        assert_eq!(result.failed, set(&PasswordRule::ALL));
        assert!(result.satisfied.is_empty());

        let result = validate_password("ONLYUPPERCASE1!");
        assert_eq!(result.failed, set(&[PasswordRule::HasLowerCase]));
    }

    #[test]
    fn test_special_character_set() {
        for c in SPECIAL_CHARACTERS {
            let password = format!("Abcdefg1{c}");
            assert!(validate_password(&password).is_valid, "{password}");
        }
        // Outside the accepted set.
        for c in ['~', '`', ' ', 'é'] {
            let password = format!("Abcdefg1{c}");
            let result = validate_password(&password);
            assert_eq!(result.failed, set(&[PasswordRule::HasSpecial]), "{password}");
        }
    }

    #[test]
    fn test_non_ascii_letters_do_not_count() {
        let result = validate_password("ÄÖÜäöü1!");
        assert!(result.is_satisfied(PasswordRule::MinLength));
        assert!(!result.is_satisfied(PasswordRule::HasUpperCase));
        assert!(!result.is_satisfied(PasswordRule::HasLowerCase));
    }

    #[test]
    fn test_length_counts_characters() {
        // Eight characters, sixteen bytes.
        let result = validate_password("ééééééé!");
        assert!(result.is_satisfied(PasswordRule::MinLength));
    }

    #[test]
    fn test_custom_min_length() {
        let policy = PasswordPolicy::new(12);
        assert!(!policy.validate("Abcdef1!").is_valid);
        assert!(policy.validate("Abcdef1!abcd").is_valid);
    }

    #[test]
    fn test_idempotent() {
        for password in ["", "abcdefgh", "Abcdef1!"] {
            assert_eq!(validate_password(password), validate_password(password));
        }
    }

    #[test]
    fn test_rule_ids_serialize() {
        let json = serde_json::to_value(validate_password("abcdefgh")).unwrap();
        assert_eq!(json["is_valid"], false);
        assert_eq!(
            json["failed"],
            serde_json::json!(["hasUpperCase", "hasNumber", "hasSpecial"])
        );
    }
}
