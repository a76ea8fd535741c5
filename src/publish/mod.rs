//! Publishing a single document to a GitHub repository
//!
//! ## Architecture
//!
//! - [`request`]: Pure resolution of destination, path, branch and commit message
//! - [`remote`]: The [`ContentsApi`] seam and its GitHub implementation
//! - [`workflow`]: The read → resolve → lookup → write routine
//! - [`notifier`]: Terminal notices and stage updates
//! - [`error`]: Failure kinds and their user-facing texts
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ghpub::config::{RepositoryRegistry, YamlSettingsStore};
//! use ghpub::document::{Document, FsVault};
//! use ghpub::publish::{ConsoleNotifier, GitHubContents, PublishWorkflow};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let registry = RepositoryRegistry::open(YamlSettingsStore::new("ghpub.yaml"))?;
//! let vault = FsVault::new();
//! let remote = GitHubContents::new();
//! let notifier = ConsoleNotifier::new(false);
//!
//! let workflow = PublishWorkflow::new(&registry, &vault, &vault, &remote, &notifier);
//! let receipt = workflow.publish(&Document::new("notes/post.md")).await?;
//! println!("Published {}", receipt.path);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod notifier;
pub mod remote;
pub mod request;
pub mod workflow;

pub use error::PublishError;
pub use notifier::{ConsoleNotifier, MemoryNotifier, Notice, NoticeLevel, Notifier, PublishStage};
pub use remote::{ContentsApi, GitHubContents, RemoteTarget};
pub use request::{PublishRequest, resolve_request};
pub use workflow::{PublishKind, PublishReceipt, PublishWorkflow};
