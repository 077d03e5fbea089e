use std::fmt::Write;

use anyhow::Result;
use pf_core::config::OutputFormat;
use pf_core::credentials::hints::{self, RequirementLine};
use pf_core::credentials::{CredentialValidator, EmailValidation, PasswordValidation};
use serde::Serialize;

/// What `pf-credcheck` prints. Fields that were not asked for are omitted.
#[derive(Debug, Serialize)]
pub struct Report {
    is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<EmailValidation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<PasswordValidation>,
    #[serde(skip)]
    checklist: Vec<RequirementLine>,
}

impl Report {
    pub fn build(
        validator: &CredentialValidator,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Self {
        let email = email.map(|e| validator.validate_email(e));
        let password = password.map(|p| validator.validate_password(p));
        let checklist = password
            .as_ref()
            .map(|p| hints::password_checklist(p, validator.policy()))
            .unwrap_or_default();
        let is_valid = email.as_ref().map_or(true, |e| e.is_valid)
            && password.as_ref().map_or(true, |p| p.is_valid);

        Self {
            is_valid,
            email,
            password,
            checklist,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Text => Ok(self.render_text()),
        }
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        if let Some(email) = &self.email {
            if email.is_valid {
                let _ = writeln!(out, "email: ok");
            } else {
                for hint in hints::email_hints(email) {
                    let _ = writeln!(out, "email: {}", hint);
                }
            }
        }
        if self.password.is_some() {
            let _ = writeln!(out, "password:");
            for line in &self.checklist {
                let mark = if line.met { '✓' } else { '✗' };
                let _ = writeln!(out, "  {} {}", mark, line.text);
            }
        }
        let _ = write!(out, "{}", if self.is_valid { "valid" } else { "invalid" });
        out
    }
}
