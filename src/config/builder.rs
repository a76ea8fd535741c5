//! Repository configuration builder

use super::RepositoryConfig;
use crate::constants::publish::FALLBACK_BRANCH;

/// Builder for creating repository configurations
///
/// The id may be left blank; the registry generates one on `add`.
#[derive(Default)]
pub struct RepositoryConfigBuilder {
    id: String,
    token: String,
    owner: String,
    repo_name: String,
    branch: Option<String>,
}

impl RepositoryConfigBuilder {
    /// Create a new builder for `owner/repo_name`
    pub fn new(owner: impl Into<String>, repo_name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo_name: repo_name.into(),
            ..Self::default()
        }
    }

    /// Start from an existing entry, for edits
    pub fn from_existing(repo: &RepositoryConfig) -> Self {
        Self {
            id: repo.id.clone(),
            token: repo.token.clone(),
            owner: repo.owner.clone(),
            repo_name: repo.repo_name.clone(),
            branch: Some(repo.branch.clone()),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    pub fn with_repo_name(mut self, repo_name: impl Into<String>) -> Self {
        self.repo_name = repo_name.into();
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Build the configuration; the default flag is owned by the registry
    pub fn build(self) -> RepositoryConfig {
        RepositoryConfig {
            id: self.id,
            token: self.token,
            owner: self.owner,
            repo_name: self.repo_name,
            branch: self.branch.unwrap_or_else(|| FALLBACK_BRANCH.to_string()),
            is_default: false,
        }
    }
}
