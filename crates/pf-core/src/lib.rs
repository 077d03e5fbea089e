//! Credential checks for the portfolio app's login and registration pages.
//!
//! [`credentials`] holds the pure validators. [`form`] and [`account`] wrap
//! them in the submit-gating and backend-response handling the pages need,
//! and [`config`] loads the tunable settings.

pub mod account;
pub mod config;
pub mod credentials;
pub mod form;

pub use credentials::{
    validate_email, validate_password, Credential, CredentialReport, CredentialValidator,
};
