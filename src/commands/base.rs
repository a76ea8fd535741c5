//! Base types and traits for the command pattern

use crate::config::{RepositoryRegistry, YamlSettingsStore};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Context passed to all commands containing shared options
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Settings file holding the repository registry
    pub config_path: PathBuf,
    /// Print publish stages as they happen
    pub verbose: bool,
}

impl CommandContext {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            verbose: false,
        }
    }

    /// Load the registry from the settings file, persisting back to the same file
    pub fn open_registry(&self) -> Result<RepositoryRegistry> {
        RepositoryRegistry::open(YamlSettingsStore::new(&self.config_path)).with_context(|| {
            format!(
                "Failed to load repositories from {}",
                self.config_path.display()
            )
        })
    }
}

/// Trait that all commands must implement
#[async_trait::async_trait]
pub trait Command {
    /// Execute the command with the given context
    async fn execute(&self, context: &CommandContext) -> Result<()>;
}
