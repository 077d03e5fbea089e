//! Login and registration submission.
//!
//! The account backend is reached through [`AccountApi`]; this module only
//! gates the request on the form and turns HTTP-style status codes into
//! outcomes the page can act on.

use thiserror::Error;
use tracing::{info, warn};

use crate::credentials::Credential;
use crate::form::{CredentialForm, FormError};

/// Shown when the backend rejects a login with 401.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";
/// Fallback when the backend gives no message of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Status and optional server-supplied message from the account backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub message: Option<String>,
}

impl ApiResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            message: None,
        }
    }

    pub fn with_message(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("{0}")]
    Form(#[from] FormError),
    #[error("Transport error: {0}")]
    Transport(String),
}

/// The external account backend (`/api/login`, `/api/register`).
#[allow(async_fn_in_trait)]
pub trait AccountApi {
    async fn login(&self, credential: &Credential) -> Result<ApiResponse, AccountError>;
    async fn register(&self, credential: &Credential) -> Result<ApiResponse, AccountError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Backend accepted the credential; the caller opens a session.
    SignedIn,
    InvalidCredentials,
    Rejected(String),
}

impl LoginOutcome {
    /// Message for the page's error banner, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::SignedIn => None,
            Self::InvalidCredentials => Some(INVALID_CREDENTIALS_MESSAGE),
            Self::Rejected(msg) => Some(msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// Account created; the caller moves on to the login page.
    Created,
    Rejected(String),
}

pub struct AccountFlow<A> {
    api: A,
}

impl<A: AccountApi> AccountFlow<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn login(&self, form: &mut CredentialForm) -> Result<LoginOutcome, AccountError> {
        let credential = form.attempt_submit()?;
        let response = self.api.login(&credential).await?;

        let outcome = match response.status {
            200 => LoginOutcome::SignedIn,
            401 => LoginOutcome::InvalidCredentials,
            _ => LoginOutcome::Rejected(
                response
                    .message
                    .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
            ),
        };

        match &outcome {
            LoginOutcome::SignedIn => info!("Login accepted for {}", credential.email),
            _ => warn!(
                "Login refused for {} (status {})",
                credential.email, response.status
            ),
        }
        Ok(outcome)
    }

    pub async fn register(
        &self,
        form: &mut CredentialForm,
    ) -> Result<RegistrationOutcome, AccountError> {
        let credential = form.attempt_submit()?;
        let response = self.api.register(&credential).await?;

        if response.status == 201 {
            info!("Registered account {}", credential.email);
            return Ok(RegistrationOutcome::Created);
        }

        warn!(
            "Registration refused for {} (status {})",
            credential.email, response.status
        );
        Ok(RegistrationOutcome::Rejected(
            response
                .message
                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
        ))
    }
}
