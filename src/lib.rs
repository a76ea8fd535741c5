//! ghpub - Publish a single note to a GitHub repository

pub mod commands;
pub mod config;
pub mod constants;
pub mod document;
pub mod publish;

pub type Result<T> = anyhow::Result<T>;

// Re-export commonly used types
pub use commands::{Command, CommandContext};
pub use config::{PublishSettings, RepositoryConfig, RepositoryRegistry};
pub use document::{Document, DocumentMetadata};
pub use publish::{PublishError, PublishReceipt, PublishWorkflow};
