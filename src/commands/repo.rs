//! Repository registry commands: add, edit, remove, set default

use super::{Command, CommandContext};
use crate::config::RepositoryConfigBuilder;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use colored::*;

/// Add a repository configuration
pub struct AddRepoCommand {
    /// Explicit id; generated when absent
    pub id: Option<String>,
    pub token: String,
    pub owner: String,
    pub repo_name: String,
    pub branch: Option<String>,
    /// Also make the new entry the default
    pub make_default: bool,
}

#[async_trait]
impl Command for AddRepoCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let mut registry = context.open_registry()?;

        let mut builder = RepositoryConfigBuilder::new(&self.owner, &self.repo_name)
            .with_token(&self.token)
            .with_id(self.id.clone().unwrap_or_default());
        if let Some(branch) = &self.branch {
            builder = builder.with_branch(branch);
        }

        let id = registry.add(builder.build())?;
        println!(
            "{} | {} {}/{}",
            id.cyan().bold(),
            "Added".green(),
            self.owner,
            self.repo_name
        );

        if self.make_default {
            registry.set_default(&id)?;
            println!("{} | {}", id.cyan().bold(), "Set as default".green());
        }

        Ok(())
    }
}

/// Edit a repository configuration; unspecified fields keep their current value
pub struct EditRepoCommand {
    pub id: String,
    pub new_id: Option<String>,
    pub token: Option<String>,
    pub owner: Option<String>,
    pub repo_name: Option<String>,
    pub branch: Option<String>,
}

#[async_trait]
impl Command for EditRepoCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let mut registry = context.open_registry()?;

        let existing = registry
            .settings()
            .get_repository(&self.id)
            .ok_or_else(|| anyhow!("Repository '{}' not found", self.id))?;

        let mut builder = RepositoryConfigBuilder::from_existing(existing);
        if let Some(new_id) = &self.new_id {
            builder = builder.with_id(new_id);
        }
        if let Some(token) = &self.token {
            builder = builder.with_token(token);
        }
        if let Some(owner) = &self.owner {
            builder = builder.with_owner(owner);
        }
        if let Some(repo_name) = &self.repo_name {
            builder = builder.with_repo_name(repo_name);
        }
        if let Some(branch) = &self.branch {
            builder = builder.with_branch(branch);
        }
        let updated = builder.build();
        let shown_id = updated.id.clone();

        if registry.update(&self.id, updated)? {
            println!("{} | {}", shown_id.cyan().bold(), "Updated".green());
        } else {
            println!(
                "{} | {}",
                self.id.cyan().bold(),
                "No longer exists, nothing updated".yellow()
            );
        }

        Ok(())
    }
}

/// Remove a repository configuration
pub struct RemoveRepoCommand {
    pub id: String,
}

#[async_trait]
impl Command for RemoveRepoCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let mut registry = context.open_registry()?;
        let was_default = registry.default_id() == Some(self.id.as_str());

        if registry.remove(&self.id)? {
            println!("{} | {}", self.id.cyan().bold(), "Removed".green());
            if was_default {
                println!("{}", "Default repository cleared".yellow());
            }
        } else {
            println!(
                "{}",
                format!("No repository found with id '{}'", self.id).yellow()
            );
        }

        Ok(())
    }
}

/// Make a repository configuration the default
pub struct DefaultRepoCommand {
    pub id: String,
}

#[async_trait]
impl Command for DefaultRepoCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let mut registry = context.open_registry()?;
        registry.set_default(&self.id)?;
        println!("{} | {}", self.id.cyan().bold(), "Set as default".green());
        Ok(())
    }
}
