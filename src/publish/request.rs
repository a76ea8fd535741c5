//! Resolution of a document's publish destination
//!
//! Everything here is pure: it turns frontmatter plus registry state into the effective
//! repository, path, branch and commit message without touching the network.

use super::error::PublishError;
use crate::config::{RepositoryConfig, RepositoryRegistry};
use crate::constants::publish::{COMMIT_MSG_PREFIX, FALLBACK_BRANCH};
use crate::document::{Document, DocumentMetadata};

/// Effective destination of one publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub repo_id: String,
    pub path: String,
    pub branch: String,
    pub commit_message: String,
}

/// Remote path for a document: the explicit path, with the document name appended when
/// it names a directory (trailing `/`), or the document name alone
pub fn effective_path(explicit: Option<&str>, document_name: &str) -> String {
    match explicit.filter(|p| !p.is_empty()) {
        Some(path) if path.ends_with('/') => format!("{path}{document_name}"),
        Some(path) => path.to_string(),
        None => document_name.to_string(),
    }
}

/// Branch precedence: frontmatter, then repository, then the fallback
pub fn effective_branch(explicit: Option<&str>, repository: &RepositoryConfig) -> String {
    explicit
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| repository.effective_branch())
        .to_string()
}

/// Commit message from frontmatter, else `Publish: {path}`
pub fn effective_commit_message(explicit: Option<&str>, path: &str) -> String {
    match explicit.filter(|m| !m.is_empty()) {
        Some(message) => message.to_string(),
        None => format!("{COMMIT_MSG_PREFIX} {path}"),
    }
}

/// Resolve where and how a document is published
///
/// # Errors
/// - [`PublishError::MissingDestination`] when neither the frontmatter nor the registry
///   names a repository
/// - [`PublishError::UnknownRepository`] when the named repository is not registered
pub fn resolve_request<'r>(
    document: &Document,
    metadata: &DocumentMetadata,
    registry: &'r RepositoryRegistry,
) -> Result<(PublishRequest, &'r RepositoryConfig), PublishError> {
    let repo_id = metadata
        .repo
        .as_deref()
        .filter(|r| !r.is_empty())
        .or_else(|| registry.default_id())
        .ok_or(PublishError::MissingDestination)?
        .to_string();

    let repository = registry
        .resolve(&repo_id)
        .ok_or_else(|| PublishError::UnknownRepository(repo_id.clone()))?;

    let path = effective_path(metadata.path.as_deref(), &document.name());
    let branch = effective_branch(metadata.branch.as_deref(), repository);
    let commit_message = effective_commit_message(metadata.commit.as_deref(), &path);

    Ok((
        PublishRequest {
            repo_id,
            path,
            branch,
            commit_message,
        },
        repository,
    ))
}
