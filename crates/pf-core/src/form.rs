//! Login and registration form state.
//!
//! Holds what the user has typed, which fields they have touched, and the
//! latest validation of each field. Both forms share one gating rule: a
//! submission goes through only when the email and the password are valid.

use thiserror::Error;
use tracing::debug;

use crate::credentials::hints::{self, RequirementLine};
use crate::credentials::{
    Credential, CredentialValidator, EmailValidation, PasswordValidation,
};

/// Shown when the email passes but the password does not.
pub const PASSWORD_REQUIREMENTS_MESSAGE: &str = "Password must meet all security requirements";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    Registration,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0}")]
    InvalidEmail(&'static str),
    #[error("{}", PASSWORD_REQUIREMENTS_MESSAGE)]
    WeakPassword,
}

#[derive(Debug, Clone)]
pub struct CredentialForm {
    kind: FormKind,
    validator: CredentialValidator,
    credential: Credential,
    email_touched: bool,
    password_touched: bool,
    email_result: EmailValidation,
    password_result: PasswordValidation,
}

impl CredentialForm {
    pub fn new(kind: FormKind, validator: CredentialValidator) -> Self {
        let credential = Credential::default();
        let email_result = validator.validate_email(&credential.email);
        let password_result = validator.validate_password(&credential.password);
        Self {
            kind,
            validator,
            credential,
            email_touched: false,
            password_touched: false,
            email_result,
            password_result,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn email_validation(&self) -> &EmailValidation {
        &self.email_result
    }

    pub fn password_validation(&self) -> &PasswordValidation {
        &self.password_result
    }

    pub fn email_touched(&self) -> bool {
        self.email_touched
    }

    pub fn password_touched(&self) -> bool {
        self.password_touched
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.credential.email = email.into();
        self.email_touched = true;
        self.email_result = self.validator.validate_email(&self.credential.email);
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.credential.password = password.into();
        self.password_touched = true;
        self.password_result = self.validator.validate_password(&self.credential.password);
    }

    pub fn can_submit(&self) -> bool {
        self.email_result.is_valid && self.password_result.is_valid
    }

    /// The message to show when submission is blocked, email first.
    pub fn submit_blocked_reason(&self) -> Option<FormError> {
        if let Some(rule) = self.email_result.first_reason() {
            return Some(FormError::InvalidEmail(hints::email_hint(rule)));
        }
        if !self.password_result.is_valid {
            return Some(FormError::WeakPassword);
        }
        None
    }

    /// Error text for the email field. Only shown after the field is touched.
    pub fn email_error(&self) -> Option<&'static str> {
        if !self.email_touched {
            return None;
        }
        self.email_result.first_reason().map(hints::email_hint)
    }

    /// Password checklist. Empty until the password field is touched.
    pub fn visible_password_hints(&self) -> Vec<RequirementLine> {
        if !self.password_touched {
            return Vec::new();
        }
        hints::password_checklist(&self.password_result, self.validator.policy())
    }

    /// Try to submit. Marks both fields touched so their errors become
    /// visible, then hands back the credential if it may be sent.
    pub fn attempt_submit(&mut self) -> Result<Credential, FormError> {
        self.email_touched = true;
        self.password_touched = true;

        if let Some(err) = self.submit_blocked_reason() {
            debug!("{:?} form submission blocked: {}", self.kind, err);
            return Err(err);
        }
        Ok(self.credential.clone())
    }
}
