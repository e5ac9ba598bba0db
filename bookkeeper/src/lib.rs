pub mod models;
pub mod validation;

pub use models::{RenderRequest, RepoCredentials};
pub use validation::{
    validate_and_canonicalize_request, Canonicalize, ErrorKind, ValidationError,
};
