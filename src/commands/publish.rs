//! Publish command implementation

use super::{Command, CommandContext};
use crate::document::{Document, FsVault};
use crate::publish::{ConsoleNotifier, GitHubContents, PublishKind, PublishWorkflow};
use anyhow::Result;
use async_trait::async_trait;
use colored::*;

/// Publish command for sending one document to its configured repository
pub struct PublishCommand {
    /// Document path, relative to the vault when one is given
    pub file: String,
    /// Vault directory documents are resolved against
    pub vault: Option<String>,
}

#[async_trait]
impl Command for PublishCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let registry = context.open_registry()?;
        let vault = match &self.vault {
            Some(root) => FsVault::with_root(root),
            None => FsVault::new(),
        };
        let remote = GitHubContents::new();
        let notifier = ConsoleNotifier::new(context.verbose);

        let workflow = PublishWorkflow::new(&registry, &vault, &vault, &remote, &notifier);
        let receipt = workflow.publish(&Document::new(&self.file)).await?;

        if context.verbose {
            let action = match receipt.kind {
                PublishKind::Created => "Created",
                PublishKind::Updated => "Updated",
            };
            println!(
                "{} | {} {} on {}",
                receipt.repo_id.cyan().bold(),
                action,
                receipt.path,
                receipt.branch
            );
            if let Some(commit) = &receipt.commit_sha {
                println!("  Commit: {}", commit);
            }
        }

        Ok(())
    }
}
