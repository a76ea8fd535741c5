//! Repository contents operations

use crate::client::GitHubClient;
use crate::util::contents_url;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identity of a single file in a repository on a branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentLocation<'a> {
    pub owner: &'a str,
    pub repo: &'a str,
    pub path: &'a str,
    pub branch: &'a str,
}

impl<'a> ContentLocation<'a> {
    pub fn new(owner: &'a str, repo: &'a str, path: &'a str, branch: &'a str) -> Self {
        Self {
            owner,
            repo,
            path,
            branch,
        }
    }
}

/// Body of a create-or-update call
///
/// `sha` must be present to update an existing file and absent to create one.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PutContentRequest {
    pub message: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    pub branch: String,
}

/// What the API reported about an accepted write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentCommit {
    /// Blob sha of the stored file, the revision token for the next update
    pub content_sha: Option<String>,
    pub commit_sha: Option<String>,
}

/// Result of a write that reached the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(ContentCommit),
    Rejected { status: u16, message: String },
}

#[derive(Deserialize)]
struct ShaRef {
    sha: Option<String>,
}

#[derive(Deserialize)]
struct PutContentResponse {
    content: Option<ShaRef>,
    commit: Option<ShaRef>,
}

impl GitHubClient {
    /// Look up the current blob sha of a file on a branch
    ///
    /// Any non-success status, 404 included, means the file does not exist yet and yields
    /// `Ok(None)`. A directory listing (array body) has no sha and also yields `Ok(None)`.
    ///
    /// # Errors
    /// Returns an error if the URL cannot be built, the request cannot be sent, or a
    /// success body is not JSON.
    pub async fn get_content_sha(&self, location: &ContentLocation<'_>) -> Result<Option<String>> {
        let url = contents_url(&self.api_base, location)?;

        let response = self
            .decorate(self.client.get(url))
            .query(&[("ref", location.branch)])
            .send()
            .await
            .with_context(|| format!("Failed to look up {}", location.path))?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let body: Value = response
            .json()
            .await
            .context("Failed to parse contents lookup response")?;

        Ok(body
            .get("sha")
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    /// Create or update a file
    ///
    /// A non-success status is not an error here: it is returned as
    /// [`WriteOutcome::Rejected`] carrying the API's `message`, or the status reason text
    /// when the body has none.
    ///
    /// # Errors
    /// Returns an error when the URL cannot be built, the request cannot be sent, or the
    /// response body cannot be read.
    pub async fn put_content(
        &self,
        location: &ContentLocation<'_>,
        payload: &PutContentRequest,
    ) -> Result<WriteOutcome> {
        let url = contents_url(&self.api_base, location)?;

        let response = self
            .decorate(self.client.put(url))
            .query(&[("ref", location.branch)])
            .json(payload)
            .send()
            .await
            .with_context(|| format!("Failed to write {}", location.path))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read write response for {}", location.path))?;

        if status.is_success() {
            let commit = serde_json::from_str::<PutContentResponse>(&text)
                .map(|body| ContentCommit {
                    content_sha: body.content.and_then(|c| c.sha),
                    commit_sha: body.commit.and_then(|c| c.sha),
                })
                .unwrap_or_default();
            return Ok(WriteOutcome::Written(commit));
        }

        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|body| {
                body.get("message")
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
            })
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| status.as_u16().to_string());

        Ok(WriteOutcome::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
