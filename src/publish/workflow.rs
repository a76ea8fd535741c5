//! The publish routine: read, resolve, look up, write, report
//!
//! A publish moves through `ReadingContent → ResolvingConfig → CheckingRemote → Writing`
//! and ends in `Succeeded` or `Failed`. There are no retries and no partial success.
//! The only suspension points are the lookup and the write.

use super::error::PublishError;
use super::notifier::{Notice, Notifier, PublishStage};
use super::remote::{ContentsApi, RemoteTarget};
use super::request::resolve_request;
use crate::config::RepositoryRegistry;
use crate::document::{Document, DocumentStore, MetadataSource};
use ghpub_github::{PutContentRequest, WriteOutcome, encode_content};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OwnedMutexGuard;

/// Whether the publish created the remote file or replaced an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishKind {
    Created,
    Updated,
}

/// Successful publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    pub repo_id: String,
    pub path: String,
    pub branch: String,
    pub kind: PublishKind,
    /// Revision token of the stored file, when the API reported it
    pub content_sha: Option<String>,
    pub commit_sha: Option<String>,
}

/// One async mutex per remote target
#[derive(Debug, Default)]
struct TargetLocks {
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl TargetLocks {
    async fn acquire(&self, key: String) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(key).or_default().clone()
        };
        lock.lock_owned().await
    }
}

/// Publishes documents using a registry and the host's collaborators
///
/// Publishes to the same target through one workflow are serialized, so the second
/// lookup sees the revision the first write produced. Different targets proceed
/// independently.
pub struct PublishWorkflow<'a> {
    registry: &'a RepositoryRegistry,
    documents: &'a dyn DocumentStore,
    metadata: &'a dyn MetadataSource,
    remote: &'a dyn ContentsApi,
    notifier: &'a dyn Notifier,
    locks: TargetLocks,
}

impl<'a> PublishWorkflow<'a> {
    pub fn new(
        registry: &'a RepositoryRegistry,
        documents: &'a dyn DocumentStore,
        metadata: &'a dyn MetadataSource,
        remote: &'a dyn ContentsApi,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            registry,
            documents,
            metadata,
            remote,
            notifier,
            locks: TargetLocks::default(),
        }
    }

    /// Publish one document and report the outcome through the notifier
    ///
    /// Every failure is converted into a [`PublishError`] and a failure notice; nothing
    /// escapes as a panic.
    pub async fn publish(&self, document: &Document) -> Result<PublishReceipt, PublishError> {
        self.notifier.progress(PublishStage::Idle);
        let result = self.run(document).await;

        match &result {
            Ok(receipt) => {
                self.notifier.progress(PublishStage::Succeeded);
                self.notifier.notify(&Notice::success(format!(
                    "Successfully published {} to GitHub",
                    receipt.path
                )));
            }
            Err(e) => {
                self.notifier.progress(PublishStage::Failed);
                self.notifier.notify(&Notice::failure(e.to_string()));
            }
        }

        result
    }

    async fn run(&self, document: &Document) -> Result<PublishReceipt, PublishError> {
        self.notifier.progress(PublishStage::ReadingContent);
        let content = self
            .documents
            .read_content(document)
            .map_err(|e| PublishError::ContentRead(format!("{e:#}")))?;

        let metadata = self
            .metadata
            .frontmatter(document, &content)
            .map_err(PublishError::unexpected)?
            .unwrap_or_default();

        self.notifier.progress(PublishStage::ResolvingConfig);
        let (request, repository) = resolve_request(document, &metadata, self.registry)?;
        let target = RemoteTarget::new(self.registry.api_base(), repository, &request);
        let encoded = encode_content(&content);

        let _guard = self.locks.acquire(target.key()).await;

        self.notifier.progress(PublishStage::CheckingRemote);
        let sha = self
            .remote
            .lookup(&target)
            .await
            .map_err(PublishError::unexpected)?;

        self.notifier.progress(PublishStage::Writing);
        let kind = if sha.is_some() {
            PublishKind::Updated
        } else {
            PublishKind::Created
        };
        let payload = PutContentRequest {
            message: request.commit_message,
            content: encoded,
            sha,
            branch: request.branch.clone(),
        };

        match self
            .remote
            .write(&target, &payload)
            .await
            .map_err(PublishError::unexpected)?
        {
            WriteOutcome::Written(commit) => Ok(PublishReceipt {
                repo_id: request.repo_id,
                path: request.path,
                branch: request.branch,
                kind,
                content_sha: commit.content_sha,
                commit_sha: commit.commit_sha,
            }),
            WriteOutcome::Rejected { status, message } => {
                Err(PublishError::RemoteWrite { status, message })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MemorySettingsStore, RepositoryConfigBuilder};
    use crate::document::{DocumentMetadata, FsVault};
    use crate::publish::notifier::{MemoryNotifier, NoticeLevel};
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use ghpub_github::ContentCommit;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// Document store backed by a fixed text; `None` simulates a vanished file
    struct FixedDocument {
        content: Option<String>,
        metadata: Option<DocumentMetadata>,
    }

    impl DocumentStore for FixedDocument {
        fn read_content(&self, document: &Document) -> Result<String> {
            self.content
                .clone()
                .ok_or_else(|| anyhow!("Failed to read {}", document.path().display()))
        }
    }

    impl MetadataSource for FixedDocument {
        fn frontmatter(
            &self,
            _document: &Document,
            _content: &str,
        ) -> Result<Option<DocumentMetadata>> {
            Ok(self.metadata.clone())
        }
    }

    /// Filesystem vault that counts how often a document is read
    struct CountingVault {
        vault: FsVault,
        reads: AtomicUsize,
    }

    impl DocumentStore for CountingVault {
        fn read_content(&self, document: &Document) -> Result<String> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.vault.read_content(document)
        }
    }

    impl MetadataSource for CountingVault {
        fn frontmatter(
            &self,
            document: &Document,
            content: &str,
        ) -> Result<Option<DocumentMetadata>> {
            self.vault.frontmatter(document, content)
        }
    }

    /// In-memory contents API that enforces the sha rules of the real one
    #[derive(Default)]
    struct FakeRemote {
        files: Mutex<HashMap<String, String>>,
        writes: Mutex<Vec<PutContentRequest>>,
        lookups: Mutex<usize>,
        reject_with: Option<(u16, String)>,
        fail_transport: bool,
    }

    impl FakeRemote {
        fn writes(&self) -> Vec<PutContentRequest> {
            self.writes.lock().unwrap().clone()
        }

        fn calls(&self) -> usize {
            *self.lookups.lock().unwrap() + self.writes.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ContentsApi for FakeRemote {
        async fn lookup(&self, target: &RemoteTarget) -> Result<Option<String>> {
            *self.lookups.lock().unwrap() += 1;
            if self.fail_transport {
                return Err(anyhow!("connection refused"));
            }
            tokio::task::yield_now().await;
            Ok(self.files.lock().unwrap().get(&target.key()).cloned())
        }

        async fn write(
            &self,
            target: &RemoteTarget,
            payload: &PutContentRequest,
        ) -> Result<WriteOutcome> {
            self.writes.lock().unwrap().push(payload.clone());
            if let Some((status, message)) = &self.reject_with {
                return Ok(WriteOutcome::Rejected {
                    status: *status,
                    message: message.clone(),
                });
            }

            let mut files = self.files.lock().unwrap();
            let current = files.get(&target.key()).cloned();
            if current != payload.sha {
                return Ok(WriteOutcome::Rejected {
                    status: 409,
                    message: "sha does not match".to_string(),
                });
            }

            let new_sha = format!("sha-{}", self.writes.lock().unwrap().len());
            files.insert(target.key(), new_sha.clone());
            Ok(WriteOutcome::Written(ContentCommit {
                content_sha: Some(new_sha),
                commit_sha: Some("commit".to_string()),
            }))
        }
    }

    fn registry(default: bool) -> RepositoryRegistry {
        let mut registry = RepositoryRegistry::open(MemorySettingsStore::new()).unwrap();
        registry
            .add(
                RepositoryConfigBuilder::new("me", "site")
                    .with_id("blog")
                    .with_token("t")
                    .build(),
            )
            .unwrap();
        if default {
            registry.set_default("blog").unwrap();
        }
        registry
    }

    fn document_with(metadata: Option<DocumentMetadata>) -> FixedDocument {
        FixedDocument {
            content: Some("# Hello\n".to_string()),
            metadata,
        }
    }

    fn blog_posts() -> Option<DocumentMetadata> {
        Some(DocumentMetadata {
            repo: Some("blog".to_string()),
            path: Some("posts/".to_string()),
            ..DocumentMetadata::default()
        })
    }

    #[tokio::test]
    async fn test_first_publish_creates() {
        let registry = registry(false);
        let docs = document_with(blog_posts());
        let remote = FakeRemote::default();
        let notifier = MemoryNotifier::new();
        let workflow = PublishWorkflow::new(&registry, &docs, &docs, &remote, &notifier);

        let receipt = workflow.publish(&Document::new("note.md")).await.unwrap();

        assert_eq!(receipt.path, "posts/note.md");
        assert_eq!(receipt.branch, "main");
        assert_eq!(receipt.kind, PublishKind::Created);
        assert_eq!(remote.writes()[0].sha, None);
        assert_eq!(remote.writes()[0].message, "Publish: posts/note.md");
        assert_eq!(remote.writes()[0].content, "IyBIZWxsbwo=");
        assert_eq!(
            notifier.notices(),
            vec![Notice::success("Successfully published posts/note.md to GitHub")]
        );
    }

    #[tokio::test]
    async fn test_document_read_once_per_publish() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("note.md"),
            "---\nrepo: blog\npath: posts/\n---\nbody\n",
        )
        .unwrap();
        let registry = registry(false);
        let docs = CountingVault {
            vault: FsVault::with_root(temp_dir.path()),
            reads: AtomicUsize::new(0),
        };
        let remote = FakeRemote::default();
        let notifier = MemoryNotifier::new();
        let workflow = PublishWorkflow::new(&registry, &docs, &docs, &remote, &notifier);

        let receipt = workflow.publish(&Document::new("note.md")).await.unwrap();

        assert_eq!(receipt.path, "posts/note.md");
        assert_eq!(docs.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_second_publish_updates_with_previous_sha() {
        let registry = registry(false);
        let docs = document_with(blog_posts());
        let remote = FakeRemote::default();
        let notifier = MemoryNotifier::new();
        let workflow = PublishWorkflow::new(&registry, &docs, &docs, &remote, &notifier);
        let document = Document::new("note.md");

        let first = workflow.publish(&document).await.unwrap();
        let second = workflow.publish(&document).await.unwrap();

        assert_eq!(first.kind, PublishKind::Created);
        assert_eq!(second.kind, PublishKind::Updated);
        assert_eq!(remote.writes()[1].sha, first.content_sha);
    }

    #[tokio::test]
    async fn test_concurrent_publishes_to_same_target_are_serialized() {
        let registry = registry(false);
        let docs = document_with(blog_posts());
        let remote = FakeRemote::default();
        let notifier = MemoryNotifier::new();
        let workflow = PublishWorkflow::new(&registry, &docs, &docs, &remote, &notifier);
        let document = Document::new("note.md");

        let (first, second) = tokio::join!(workflow.publish(&document), workflow.publish(&document));

        assert!(first.is_ok());
        assert!(second.is_ok());
        let shas: Vec<_> = remote.writes().into_iter().map(|w| w.sha).collect();
        assert_eq!(shas, vec![None, Some("sha-1".to_string())]);
    }

    #[tokio::test]
    async fn test_missing_destination_makes_no_calls() {
        let registry = registry(false);
        let docs = document_with(None);
        let remote = FakeRemote::default();
        let notifier = MemoryNotifier::new();
        let workflow = PublishWorkflow::new(&registry, &docs, &docs, &remote, &notifier);

        let result = workflow.publish(&Document::new("note.md")).await;

        assert_eq!(result.unwrap_err(), PublishError::MissingDestination);
        assert_eq!(remote.calls(), 0);
        assert_eq!(notifier.notices()[0].level, NoticeLevel::Failure);
    }

    #[tokio::test]
    async fn test_default_repository_and_filename_path() {
        let registry = registry(true);
        let docs = document_with(None);
        let remote = FakeRemote::default();
        let notifier = MemoryNotifier::new();
        let workflow = PublishWorkflow::new(&registry, &docs, &docs, &remote, &notifier);

        let receipt = workflow
            .publish(&Document::new("vault/daily/2024-01-01.md"))
            .await
            .unwrap();

        assert_eq!(receipt.repo_id, "blog");
        assert_eq!(receipt.path, "2024-01-01.md");
    }

    #[tokio::test]
    async fn test_unknown_repository() {
        let registry = registry(true);
        let docs = document_with(Some(DocumentMetadata {
            repo: Some("docs".to_string()),
            ..DocumentMetadata::default()
        }));
        let remote = FakeRemote::default();
        let notifier = MemoryNotifier::new();
        let workflow = PublishWorkflow::new(&registry, &docs, &docs, &remote, &notifier);

        let result = workflow.publish(&Document::new("note.md")).await;

        assert_eq!(
            result.unwrap_err(),
            PublishError::UnknownRepository("docs".to_string())
        );
        assert_eq!(remote.calls(), 0);
        assert_eq!(
            notifier.notices()[0].message,
            "GitHub repo configuration not found for docs"
        );
    }

    #[tokio::test]
    async fn test_unreadable_document() {
        let registry = registry(true);
        let docs = FixedDocument {
            content: None,
            metadata: None,
        };
        let remote = FakeRemote::default();
        let notifier = MemoryNotifier::new();
        let workflow = PublishWorkflow::new(&registry, &docs, &docs, &remote, &notifier);

        let result = workflow.publish(&Document::new("gone.md")).await;

        assert!(matches!(result, Err(PublishError::ContentRead(_))));
        assert!(notifier.notices()[0].message.starts_with("Error publishing to GitHub:"));
        assert_eq!(remote.calls(), 0);
    }

    #[tokio::test]
    async fn test_rejected_write_reports_api_message() {
        let registry = registry(true);
        let docs = document_with(None);
        let remote = FakeRemote {
            reject_with: Some((422, "conflict".to_string())),
            ..FakeRemote::default()
        };
        let notifier = MemoryNotifier::new();
        let workflow = PublishWorkflow::new(&registry, &docs, &docs, &remote, &notifier);

        let result = workflow.publish(&Document::new("note.md")).await;

        assert_eq!(
            result.unwrap_err(),
            PublishError::RemoteWrite {
                status: 422,
                message: "conflict".to_string()
            }
        );
        assert!(notifier.notices()[0].message.contains("conflict"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_unexpected() {
        let registry = registry(true);
        let docs = document_with(None);
        let remote = FakeRemote {
            fail_transport: true,
            ..FakeRemote::default()
        };
        let notifier = MemoryNotifier::new();
        let workflow = PublishWorkflow::new(&registry, &docs, &docs, &remote, &notifier);

        let result = workflow.publish(&Document::new("note.md")).await;

        assert_eq!(
            result.unwrap_err().to_string(),
            "Error publishing to GitHub: connection refused"
        );
        assert!(remote.writes().is_empty());
    }

    #[tokio::test]
    async fn test_stage_sequence() {
        let registry = registry(true);
        let docs = document_with(None);
        let remote = FakeRemote::default();
        let notifier = MemoryNotifier::new();
        let workflow = PublishWorkflow::new(&registry, &docs, &docs, &remote, &notifier);

        workflow.publish(&Document::new("note.md")).await.unwrap();

        assert_eq!(
            notifier.stages(),
            vec![
                PublishStage::Idle,
                PublishStage::ReadingContent,
                PublishStage::ResolvingConfig,
                PublishStage::CheckingRemote,
                PublishStage::Writing,
                PublishStage::Succeeded,
            ]
        );
    }

    #[tokio::test]
    async fn test_explicit_branch_and_commit() {
        let registry = registry(false);
        let docs = document_with(Some(DocumentMetadata {
            repo: Some("blog".to_string()),
            path: Some("about.md".to_string()),
            branch: Some("gh-pages".to_string()),
            commit: Some("Update about page".to_string()),
        }));
        let remote = FakeRemote::default();
        let notifier = MemoryNotifier::new();
        let workflow = PublishWorkflow::new(&registry, &docs, &docs, &remote, &notifier);

        let receipt = workflow.publish(&Document::new("note.md")).await.unwrap();

        assert_eq!(receipt.path, "about.md");
        assert_eq!(receipt.branch, "gh-pages");
        let write = &remote.writes()[0];
        assert_eq!(write.branch, "gh-pages");
        assert_eq!(write.message, "Update about page");
    }
}
