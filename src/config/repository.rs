//! Repository configuration entry

use crate::constants::publish::FALLBACK_BRANCH;
use serde::{Deserialize, Serialize};

fn default_branch() -> String {
    FALLBACK_BRANCH.to_string()
}

/// Credentials and coordinates of one destination repository
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Identifier documents refer to in their `repo` frontmatter key
    pub id: String,
    /// Personal access token with contents write scope
    #[serde(default)]
    pub token: String,
    /// User or organization owning the repository
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub repo_name: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    #[serde(default)]
    pub is_default: bool,
}

impl std::fmt::Debug for RepositoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryConfig")
            .field("id", &self.id)
            .field("token", &"[REDACTED]")
            .field("owner", &self.owner)
            .field("repo_name", &self.repo_name)
            .field("branch", &self.branch)
            .field("is_default", &self.is_default)
            .finish()
    }
}

impl RepositoryConfig {
    /// Create a new entry on the fallback branch
    pub fn new(id: String, token: String, owner: String, repo_name: String) -> Self {
        Self {
            id,
            token,
            owner,
            repo_name,
            branch: default_branch(),
            is_default: false,
        }
    }

    /// `owner/repo_name`, as shown to the user
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo_name)
    }

    /// Configured branch, or the fallback when blank
    pub fn effective_branch(&self) -> &str {
        if self.branch.trim().is_empty() {
            FALLBACK_BRANCH
        } else {
            &self.branch
        }
    }

    pub(crate) fn normalize_branch(&mut self) {
        if self.branch.trim().is_empty() {
            self.branch = default_branch();
        }
    }
}
