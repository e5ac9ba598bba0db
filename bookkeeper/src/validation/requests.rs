//! Validation implementations for render requests
//!
//! Each field is trimmed, normalized and checked in a fixed order, and the
//! first violated rule is returned.

use crate::models::RenderRequest;

use super::errors::ValidationError;
use super::sanitizers::{strip_branch_prefix_in_place, trim_each_in_place, trim_in_place};
use super::validators::{validate_branch_name, validate_git_repo_url, validate_images};

// ─────────────────────────────────────────────────────────────────────────────
// Field names as they appear in error messages
// ─────────────────────────────────────────────────────────────────────────────

pub const REPO_URL_FIELD: &str = "RepoURL";
pub const PASSWORD_FIELD: &str = "RepoCreds.Password";
pub const TARGET_BRANCH_FIELD: &str = "TargetBranch";
pub const IMAGES_FIELD: &str = "Images";

/// Types that can be put into canonical form in-place
///
/// On error the value may be partially canonicalized and should be
/// discarded.
pub trait Canonicalize {
    fn canonicalize(&mut self) -> Result<(), ValidationError>;
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::missing(field));
    }
    Ok(())
}

impl Canonicalize for RenderRequest {
    fn canonicalize(&mut self) -> Result<(), ValidationError> {
        trim_in_place(&mut self.repo_url);
        require(&self.repo_url, REPO_URL_FIELD)?;
        validate_git_repo_url(&self.repo_url)
            .map_err(|reason| ValidationError::invalid(REPO_URL_FIELD, reason))?;

        trim_in_place(&mut self.repo_creds.password);
        require(&self.repo_creds.password, PASSWORD_FIELD)?;

        // Optional, opaque revision pointer
        trim_in_place(&mut self.git_ref);

        trim_in_place(&mut self.target_branch);
        require(&self.target_branch, TARGET_BRANCH_FIELD)?;
        strip_branch_prefix_in_place(&mut self.target_branch);
        if validate_branch_name(&self.target_branch).is_err() {
            return Err(ValidationError::invalid(
                TARGET_BRANCH_FIELD,
                format!("{:?} is an invalid branch name", self.target_branch),
            ));
        }

        trim_each_in_place(&mut self.images);
        validate_images(&self.images)
            .map_err(|reason| ValidationError::invalid(IMAGES_FIELD, reason))?;

        Ok(())
    }
}

/// Validate a render request and return it in canonical form
///
/// The request is consumed; on success the same value comes back with every
/// field trimmed, `target_branch` stripped of `refs/heads/`, and `images`
/// free of empty entries.
pub fn validate_and_canonicalize_request(
    mut req: RenderRequest,
) -> Result<RenderRequest, ValidationError> {
    req.canonicalize()?;
    Ok(req)
}
