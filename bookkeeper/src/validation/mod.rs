//! Render request validation
//!
//! This module decides whether a render request is well-formed and puts it
//! into canonical shape before any rendering work begins.
//!
//! # Overview
//!
//! The validation system consists of three parts:
//!
//! 1. **Sanitizers** - In-place trimming and ref-prefix normalization
//! 2. **Validators** - Shape checks for git remote URLs and branch names
//! 3. **Requests** - The fixed-order, fail-fast pass over a `RenderRequest`
//!
//! # Usage
//!
//! ```
//! use bookkeeper::models::{RenderRequest, RepoCredentials};
//! use bookkeeper::validation::validate_and_canonicalize_request;
//!
//! let req = RenderRequest {
//!     repo_url: " https://github.com/akuity/foobar ".to_string(),
//!     repo_creds: RepoCredentials {
//!         username: String::new(),
//!         password: "token".to_string(),
//!     },
//!     git_ref: String::new(),
//!     target_branch: "refs/heads/env/dev".to_string(),
//!     images: vec![],
//! };
//!
//! let req = validate_and_canonicalize_request(req).unwrap();
//! assert_eq!(req.repo_url, "https://github.com/akuity/foobar");
//! assert_eq!(req.target_branch, "env/dev");
//! ```
//!
//! # Errors
//!
//! Failures carry an [`ErrorKind`] to branch on and a message whose text is
//! stable, e.g. `validation failed: TargetBranch is a required field`.

pub mod errors;
pub mod requests;
pub mod sanitizers;
pub mod validators;

// Re-export commonly used items
pub use errors::{ErrorKind, ValidationError, ValidationErrorResponse};
pub use requests::{validate_and_canonicalize_request, Canonicalize};
pub use sanitizers::{
    strip_branch_prefix, strip_branch_prefix_in_place, trim_each_in_place, trim_in_place,
    BRANCH_REF_PREFIX,
};
pub use validators::{validate_branch_name, validate_git_repo_url, validate_images, BranchNameRule};
