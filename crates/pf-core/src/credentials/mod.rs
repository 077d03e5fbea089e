//! Credential format validation.
//!
//! Pure functions over borrowed strings: no I/O, no shared mutable state,
//! safe to call from any thread. Results are rebuilt on every call.

pub mod email;
pub mod hints;
pub mod password;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use email::{validate_email, EmailRule, EmailValidation};
pub use password::{validate_password, PasswordPolicy, PasswordRule, PasswordValidation};

/// An email/password pair as typed into a login or registration form.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

impl Credential {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// Keep passwords out of logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Both field results for one credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialReport {
    pub is_valid: bool,
    pub email: EmailValidation,
    pub password: PasswordValidation,
}

/// Stateless validator carrying the configured password policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialValidator {
    policy: PasswordPolicy,
}

impl CredentialValidator {
    pub fn new(policy: PasswordPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    pub fn validate_email(&self, input: &str) -> EmailValidation {
        email::validate_email(input)
    }

    pub fn validate_password(&self, input: &str) -> PasswordValidation {
        self.policy.validate(input)
    }

    pub fn validate(&self, credential: &Credential) -> CredentialReport {
        let email = self.validate_email(&credential.email);
        let password = self.validate_password(&credential.password);
        CredentialReport {
            is_valid: email.is_valid && password.is_valid,
            email,
            password,
        }
    }
}
