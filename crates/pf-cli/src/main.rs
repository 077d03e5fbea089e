mod render;

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use pf_core::config::{OutputFormat, ValidatorConfig};
use pf_core::credentials::CredentialValidator;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use crate::render::Report;

/// Check email and password formats the way the portfolio sign-in pages do.
#[derive(Parser, Debug)]
#[command(name = "pf-credcheck", version, about)]
struct Args {
    /// Settings file (min_password_length, output, log_level).
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Email address to validate.
    #[arg(long, short)]
    email: Option<String>,
    /// Read the password to validate from the first line of stdin.
    #[arg(long)]
    password_stdin: bool,
    /// Print the report as JSON, overriding the settings file.
    #[arg(long)]
    json: bool,
}

fn read_password(input: impl BufRead) -> Result<String> {
    let mut lines = input.lines();
    let line = lines
        .next()
        .transpose()
        .context("failed to read password from stdin")?
        .unwrap_or_default();
    Ok(line.trim_end_matches('\r').to_string())
}

fn run(args: Args, config: &ValidatorConfig) -> Result<bool> {
    if args.email.is_none() && !args.password_stdin {
        bail!("nothing to check: pass --email and/or --password-stdin");
    }

    let validator = CredentialValidator::new(config.password_policy());
    let password = if args.password_stdin {
        Some(read_password(io::stdin().lock())?)
    } else {
        None
    };

    let report = Report::build(&validator, args.email.as_deref(), password.as_deref());
    debug!("Validation finished, valid = {}", report.is_valid());

    let format = if args.json {
        OutputFormat::Json
    } else {
        config.output
    };
    println!("{}", report.render(format)?);
    Ok(report.is_valid())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match ValidatorConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("pf-credcheck: {}", e);
                return ExitCode::from(2);
            }
        },
        None => ValidatorConfig::default(),
    };

    // RUST_LOG wins over the configured level. Logs go to stderr so stdout
    // stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    match run(args, &config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("pf-credcheck failed: {:#}", e);
            eprintln!("pf-credcheck: {:#}", e);
            ExitCode::from(2)
        }
    }
}
