use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// RENDER REQUEST TYPES
// ═══════════════════════════════════════════════════════════════════════════

/// A request to render manifests from a git repository
///
/// Values arrive straight from a transport payload and are only safe to use
/// after passing through [`crate::validation::validate_and_canonicalize_request`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderRequest {
    /// URL of the git remote holding the source manifests
    #[serde(rename = "repoURL")]
    pub repo_url: String,
    #[serde(rename = "repoCreds")]
    pub repo_creds: RepoCredentials,
    /// Commit, tag or branch to render from. Empty means "not given".
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// Branch the rendered output is associated with
    #[serde(rename = "targetBranch")]
    pub target_branch: String,
    /// Container image overrides, in the order they were supplied
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

/// Credentials used to authenticate to the repository
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoCredentials {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,
    /// Token or password for the repository
    pub password: String,
}

impl std::fmt::Debug for RepoCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let password = if self.password.is_empty() {
            ""
        } else {
            "<redacted>"
        };
        f.debug_struct("RepoCredentials")
            .field("username", &self.username)
            .field("password", &password)
            .finish()
    }
}

impl RenderRequest {
    /// Whether a revision pointer was supplied
    pub fn has_ref(&self) -> bool {
        !self.git_ref.is_empty()
    }
}
