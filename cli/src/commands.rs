use anyhow::{Context, Result};
use bookkeeper::validation::requests::{REPO_URL_FIELD, TARGET_BRANCH_FIELD};
use bookkeeper::validation::{
    strip_branch_prefix, validate_branch_name, validate_git_repo_url, ValidationErrorResponse,
};
use bookkeeper::{validate_and_canonicalize_request, RenderRequest, ValidationError};
use colored::Colorize;
use serde_json::json;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::{OutputFormat, Settings};

/// Result of a command that ran to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Rejected,
}

/// Read a payload from a file, or stdin when the path is absent or `-`
pub fn read_payload(path: Option<&Path>, max_bytes: usize) -> Result<String> {
    let reader: Box<dyn Read> = match path {
        Some(p) if p != Path::new("-") => Box::new(
            File::open(p).with_context(|| format!("Failed to open request file {:?}", p))?,
        ),
        _ => Box::new(io::stdin()),
    };

    let mut buf = String::new();
    reader
        .take(max_bytes as u64 + 1)
        .read_to_string(&mut buf)
        .context("Failed to read request payload")?;

    if buf.len() > max_bytes {
        anyhow::bail!("Request payload exceeds the {} byte limit", max_bytes);
    }

    Ok(buf)
}

pub fn validate(path: Option<&Path>, settings: &Settings) -> Result<Outcome> {
    let payload = read_payload(path, settings.max_request_bytes)?;
    let req: RenderRequest =
        serde_json::from_str(&payload).context("Failed to parse render request JSON")?;

    debug!(
        images = req.images.len(),
        has_ref = !req.git_ref.trim().is_empty(),
        "Validating render request"
    );

    match validate_and_canonicalize_request(req) {
        Ok(req) => {
            info!(
                repo_url = %req.repo_url,
                target_branch = %req.target_branch,
                "Render request accepted"
            );
            println!("{}", serde_json::to_string_pretty(&req)?);
            Ok(Outcome::Accepted)
        }
        Err(err) => {
            report_rejection(&err, settings.format)?;
            Ok(Outcome::Rejected)
        }
    }
}

pub fn check_branch(name: &str, format: OutputFormat) -> Result<Outcome> {
    let branch = strip_branch_prefix(name.trim());

    if let Err(rule) = validate_branch_name(branch) {
        let err = ValidationError::invalid(
            TARGET_BRANCH_FIELD,
            format!("{:?} is an invalid branch name: {}", branch, rule),
        );
        report_rejection(&err, format)?;
        return Ok(Outcome::Rejected);
    }

    match format {
        OutputFormat::Text => println!("{}", branch),
        OutputFormat::Json => println!("{}", json!({ "branch": branch })),
    }
    Ok(Outcome::Accepted)
}

pub fn check_url(url: &str, format: OutputFormat) -> Result<Outcome> {
    let url = url.trim();

    let checked = if url.is_empty() {
        Err(ValidationError::missing(REPO_URL_FIELD))
    } else {
        validate_git_repo_url(url).map_err(|reason| ValidationError::invalid(REPO_URL_FIELD, reason))
    };

    if let Err(err) = checked {
        report_rejection(&err, format)?;
        return Ok(Outcome::Rejected);
    }

    match format {
        OutputFormat::Text => println!("{}", url),
        OutputFormat::Json => println!("{}", json!({ "repoURL": url })),
    }
    Ok(Outcome::Accepted)
}

fn report_rejection(err: &ValidationError, format: OutputFormat) -> Result<()> {
    warn!(field = err.field(), kind = %err.kind(), "Request rejected");

    match format {
        OutputFormat::Text => eprintln!("{} {}", "✗".red(), err.to_string().red()),
        OutputFormat::Json => {
            let response = ValidationErrorResponse::from(err);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_payload_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"repoURL\": \"x\"}}").unwrap();

        let payload = read_payload(Some(file.path()), 1024).unwrap();
        assert_eq!(payload, "{\"repoURL\": \"x\"}");
    }

    #[test]
    fn test_read_payload_enforces_limit() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", "x".repeat(65)).unwrap();

        assert!(read_payload(Some(file.path()), 64).is_err());
        assert!(read_payload(Some(file.path()), 65).is_ok());
    }

    #[test]
    fn test_read_payload_missing_file() {
        let err = read_payload(Some(Path::new("/nonexistent/request.json")), 64).unwrap_err();
        assert!(err.to_string().contains("Failed to open request file"));
    }

    #[test]
    fn test_check_branch_outcomes() {
        assert_eq!(
            check_branch("refs/heads/env/dev", OutputFormat::Text).unwrap(),
            Outcome::Accepted
        );
        assert_eq!(
            check_branch("env/dev*", OutputFormat::Text).unwrap(),
            Outcome::Rejected
        );
    }

    #[test]
    fn test_check_url_outcomes() {
        assert_eq!(
            check_url(" https://github.com/akuity/foobar ", OutputFormat::Json).unwrap(),
            Outcome::Accepted
        );
        assert_eq!(check_url("foobar", OutputFormat::Json).unwrap(), Outcome::Rejected);
        assert_eq!(check_url("  ", OutputFormat::Text).unwrap(), Outcome::Rejected);
    }
}
