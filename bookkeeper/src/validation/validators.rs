//! Field validators for input validation
//!
//! Shape checks for the fields of a render request: git remote URLs,
//! branch names and image override lists.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Scheme-qualified remote, e.g. `https://host/org/repo` or `ssh://git@host:22/repo.git`
    static ref SCHEME_URL_REGEX: Regex = Regex::new(
        r"^(?:https?|ssh|git|git\+ssh|ssh\+git)://(?:[\w.~%!$&'()*+,;=-]+(?::[^\s@/]*)?@)?(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*|\[[0-9A-Fa-f:.]+\])(?::\d{1,5})?/\S*[^\s/]\S*$"
    ).unwrap();

    /// Local repository addressed through `file://`, with an optional host
    static ref FILE_URL_REGEX: Regex = Regex::new(
        r"^file://[A-Za-z0-9.-]*/\S*[^\s/]\S*$"
    ).unwrap();

    /// scp-like syntax, e.g. `git@github.com:org/repo.git`
    static ref SCP_LIKE_REGEX: Regex = Regex::new(
        r"^[\w.-]+@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*|\[[0-9A-Fa-f:.]+\]):/?[^\s/]\S*$"
    ).unwrap();
}

/// Characters git never allows anywhere in a ref name
const FORBIDDEN_REF_CHARS: &[char] = &[' ', '~', '^', ':', '?', '*', '[', '\\'];

/// A git ref-name rule broken by a candidate branch name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchNameRule {
    Empty,
    /// `@` and `HEAD` have special meaning to git
    Reserved,
    LeadingDash,
    ForbiddenCharacter(char),
    ControlCharacter,
    ConsecutiveDots,
    ReflogSyntax,
    LeadingSlash,
    TrailingSlash,
    ConsecutiveSlashes,
    TrailingDot,
    ComponentLeadingDot,
    LockSuffix,
}

impl std::fmt::Display for BranchNameRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BranchNameRule::Empty => write!(f, "must not be empty"),
            BranchNameRule::Reserved => write!(f, "is reserved by git"),
            BranchNameRule::LeadingDash => write!(f, "must not start with '-'"),
            BranchNameRule::ForbiddenCharacter(c) => {
                write!(f, "must not contain {:?}", c)
            }
            BranchNameRule::ControlCharacter => {
                write!(f, "must not contain control characters")
            }
            BranchNameRule::ConsecutiveDots => write!(f, "must not contain '..'"),
            BranchNameRule::ReflogSyntax => write!(f, "must not contain '@{{'"),
            BranchNameRule::LeadingSlash => write!(f, "must not start with '/'"),
            BranchNameRule::TrailingSlash => write!(f, "must not end with '/'"),
            BranchNameRule::ConsecutiveSlashes => write!(f, "must not contain '//'"),
            BranchNameRule::TrailingDot => write!(f, "must not end with '.'"),
            BranchNameRule::ComponentLeadingDot => {
                write!(f, "no path component may start with '.'")
            }
            BranchNameRule::LockSuffix => {
                write!(f, "no path component may end with '.lock'")
            }
        }
    }
}

/// Validate that a URL looks like a git remote
///
/// Accepts scheme URLs (`http(s)`, `ssh`, `git`, `file`), and scp-like
/// `user@host:path` addresses. Bare words and bare paths are rejected.
pub fn validate_git_repo_url(url: &str) -> Result<(), String> {
    let is_match = SCHEME_URL_REGEX.is_match(url)
        || FILE_URL_REGEX.is_match(url)
        || SCP_LIKE_REGEX.is_match(url);

    if !is_match {
        return Err(format!(
            "{:?} does not appear to be a valid git repository URL",
            url
        ));
    }

    Ok(())
}

/// Validate a bare branch name against git's ref-name rules
///
/// Mirrors `git check-ref-format --branch`. Returns the first rule broken.
pub fn validate_branch_name(name: &str) -> Result<(), BranchNameRule> {
    if name.is_empty() {
        return Err(BranchNameRule::Empty);
    }
    if name == "@" || name == "HEAD" {
        return Err(BranchNameRule::Reserved);
    }
    if name.starts_with('-') {
        return Err(BranchNameRule::LeadingDash);
    }

    for c in name.chars() {
        if c.is_ascii_control() {
            return Err(BranchNameRule::ControlCharacter);
        }
        if FORBIDDEN_REF_CHARS.contains(&c) {
            return Err(BranchNameRule::ForbiddenCharacter(c));
        }
    }

    if name.contains("..") {
        return Err(BranchNameRule::ConsecutiveDots);
    }
    if name.contains("@{") {
        return Err(BranchNameRule::ReflogSyntax);
    }
    if name.starts_with('/') {
        return Err(BranchNameRule::LeadingSlash);
    }
    if name.ends_with('/') {
        return Err(BranchNameRule::TrailingSlash);
    }
    if name.contains("//") {
        return Err(BranchNameRule::ConsecutiveSlashes);
    }
    if name.ends_with('.') {
        return Err(BranchNameRule::TrailingDot);
    }

    for component in name.split('/') {
        if component.starts_with('.') {
            return Err(BranchNameRule::ComponentLeadingDot);
        }
        if component.ends_with(".lock") {
            return Err(BranchNameRule::LockSuffix);
        }
    }

    Ok(())
}

/// Validate that no image override is empty
pub fn validate_images(images: &[String]) -> Result<(), String> {
    if images.iter().any(|image| image.is_empty()) {
        return Err("must not contain any empty strings".to_string());
    }
    Ok(())
}
