//! Input sanitization functions
//!
//! In-place helpers that put raw request fields into canonical shape
//! before they are validated.

/// Prefix git uses for fully-qualified branch refs
pub const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Trim leading and trailing whitespace from a string in-place
///
/// Already-trimmed strings are left untouched and never reallocate.
pub fn trim_in_place(value: &mut String) {
    let end = value.trim_end().len();
    value.truncate(end);

    let start = value.len() - value.trim_start().len();
    if start > 0 {
        value.drain(..start);
    }
}

/// Trim every entry of a list in-place, keeping order and length
pub fn trim_each_in_place(values: &mut [String]) {
    for value in values.iter_mut() {
        trim_in_place(value);
    }
}

/// Strip a single leading `refs/heads/` from a branch name
pub fn strip_branch_prefix(branch: &str) -> &str {
    branch.strip_prefix(BRANCH_REF_PREFIX).unwrap_or(branch)
}

/// Strip a single leading `refs/heads/` from a branch name in-place
pub fn strip_branch_prefix_in_place(branch: &mut String) {
    if branch.starts_with(BRANCH_REF_PREFIX) {
        branch.drain(..BRANCH_REF_PREFIX.len());
    }
}
