//! List command implementation

use super::{Command, CommandContext};
use crate::config::RepositoryConfig;
use anyhow::Result;
use async_trait::async_trait;
use colored::*;
use serde::Serialize;

/// Output format for a repository in JSON mode; tokens are never printed
#[derive(Serialize)]
struct RepositoryOutput {
    id: String,
    owner: String,
    repo_name: String,
    branch: String,
    is_default: bool,
}

impl From<&RepositoryConfig> for RepositoryOutput {
    fn from(repo: &RepositoryConfig) -> Self {
        Self {
            id: repo.id.clone(),
            owner: repo.owner.clone(),
            repo_name: repo.repo_name.clone(),
            branch: repo.effective_branch().to_string(),
            is_default: repo.is_default,
        }
    }
}

/// List command for displaying configured repositories
pub struct ListCommand {
    /// Output in JSON format
    pub json: bool,
}

#[async_trait]
impl Command for ListCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let registry = context.open_registry()?;
        let repositories = registry.list();

        if self.json {
            let output: Vec<RepositoryOutput> =
                repositories.iter().map(RepositoryOutput::from).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        if repositories.is_empty() {
            println!(
                "{}",
                format!(
                    "No repositories configured in {}",
                    context.config_path.display()
                )
                .yellow()
            );
            return Ok(());
        }

        println!(
            "{}",
            format!("Found {} repositories", repositories.len()).green()
        );
        println!();

        for repo in repositories {
            let marker = if repo.is_default {
                " (default)".yellow().to_string()
            } else {
                String::new()
            };
            println!("{} {}{}", "•".blue(), repo.id.bold(), marker);
            println!("  Repository: {}", repo.full_name());
            println!("  Branch: {}", repo.effective_branch());
            println!();
        }

        Ok(())
    }
}
