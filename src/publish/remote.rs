//! Remote contents API seam

use super::request::PublishRequest;
use crate::config::RepositoryConfig;
use anyhow::Result;
use async_trait::async_trait;
use ghpub_github::{ContentLocation, GitHubClient, PutContentRequest, WriteOutcome};

/// Fully resolved remote object: API base, credentials and coordinates
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    pub api_base: String,
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub path: String,
    pub branch: String,
}

impl std::fmt::Debug for RemoteTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteTarget")
            .field("api_base", &self.api_base)
            .field("token", &"[REDACTED]")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("path", &self.path)
            .field("branch", &self.branch)
            .finish()
    }
}

impl RemoteTarget {
    pub fn new(api_base: &str, repository: &RepositoryConfig, request: &PublishRequest) -> Self {
        Self {
            api_base: api_base.to_string(),
            token: repository.token.clone(),
            owner: repository.owner.clone(),
            repo: repository.repo_name.clone(),
            path: request.path.clone(),
            branch: request.branch.clone(),
        }
    }

    pub fn location(&self) -> ContentLocation<'_> {
        ContentLocation::new(&self.owner, &self.repo, &self.path, &self.branch)
    }

    /// Identity used to serialize concurrent publishes to the same object
    pub fn key(&self) -> String {
        format!(
            "{}/{}/{}@{}:{}",
            self.api_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.branch,
            self.path
        )
    }
}

/// The two remote calls a publish makes
#[async_trait]
pub trait ContentsApi: Send + Sync {
    /// Current revision token of the target, `None` when it does not exist
    ///
    /// # Errors
    /// Only transport or decoding failures; "not found" is `Ok(None)`.
    async fn lookup(&self, target: &RemoteTarget) -> Result<Option<String>>;

    /// Create or update the target
    ///
    /// # Errors
    /// Only transport failures; API refusals are [`WriteOutcome::Rejected`].
    async fn write(&self, target: &RemoteTarget, payload: &PutContentRequest)
    -> Result<WriteOutcome>;
}

/// [`ContentsApi`] backed by the GitHub REST API
#[derive(Debug, Clone, Default)]
pub struct GitHubContents;

impl GitHubContents {
    pub fn new() -> Self {
        Self
    }

    fn client(target: &RemoteTarget) -> GitHubClient {
        GitHubClient::with_api_base(target.token.clone(), target.api_base.clone())
    }
}

#[async_trait]
impl ContentsApi for GitHubContents {
    async fn lookup(&self, target: &RemoteTarget) -> Result<Option<String>> {
        Self::client(target)
            .get_content_sha(&target.location())
            .await
    }

    async fn write(
        &self,
        target: &RemoteTarget,
        payload: &PutContentRequest,
    ) -> Result<WriteOutcome> {
        Self::client(target)
            .put_content(&target.location(), payload)
            .await
    }
}
