//! Repository registry: CRUD over the configured destinations
//!
//! The registry owns the loaded [`PublishSettings`] and writes them back through its
//! [`SettingsStore`] after every mutation. A mutation whose save fails is rolled back,
//! so the in-memory list never drifts from what is persisted.

use super::store::SettingsStore;
use super::validation::{self, ValidationError};
use super::{PublishSettings, RepositoryConfig};
use crate::constants::config::{ID_PREFIX, UUID_LENGTH};
use colored::*;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by registry mutations
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Another entry already uses this id.
    #[error("Repository '{0}' already exists")]
    DuplicateId(String),

    /// No entry has this id.
    #[error("Repository '{0}' not found")]
    UnknownId(String),

    /// The entry failed validation.
    #[error("Invalid repository configuration: {}", validation::join_errors(.0))]
    Invalid(Vec<ValidationError>),

    /// Loading or saving the settings failed.
    #[error("Failed to persist settings: {0:#}")]
    Persistence(#[source] anyhow::Error),
}

/// Ordered list of repository configurations with one optional default
pub struct RepositoryRegistry {
    settings: PublishSettings,
    store: Box<dyn SettingsStore>,
}

impl std::fmt::Debug for RepositoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryRegistry")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl RepositoryRegistry {
    /// Load the registry from a store; an empty store yields an empty registry
    ///
    /// Duplicate ids are an error. Other invalid entries are kept with a warning so they
    /// can still be edited or removed, but [`resolve`](Self::resolve) never returns them.
    pub fn open(store: impl SettingsStore + 'static) -> Result<Self, RegistryError> {
        let mut settings = store
            .load()
            .map_err(RegistryError::Persistence)?
            .unwrap_or_default();

        if let Err(errors) = validation::validate_repositories(&settings.repos) {
            let (duplicates, invalid): (Vec<_>, Vec<_>) = errors
                .into_iter()
                .partition(|e| matches!(e, ValidationError::DuplicateId(_)));
            if !duplicates.is_empty() {
                return Err(RegistryError::Invalid(duplicates));
            }
            for error in invalid {
                eprintln!("{}", format!("Skipping repository: {error}").yellow());
            }
        }
        settings.sync_default_flags();

        Ok(Self {
            settings,
            store: Box::new(store),
        })
    }

    /// All entries in insertion order
    pub fn list(&self) -> &[RepositoryConfig] {
        &self.settings.repos
    }

    pub fn settings(&self) -> &PublishSettings {
        &self.settings
    }

    /// Id of the default entry, if any
    pub fn default_id(&self) -> Option<&str> {
        self.settings.default_id()
    }

    pub fn api_base(&self) -> &str {
        &self.settings.api_base
    }

    /// Append a new entry and return its id
    ///
    /// A blank id is replaced by a generated `repo-xxxxxx` id. The new entry is never the
    /// default; use [`set_default`](Self::set_default) for that.
    pub fn add(&mut self, mut config: RepositoryConfig) -> Result<String, RegistryError> {
        if config.id.trim().is_empty() {
            config.id = self.generate_id();
        } else if self.settings.get_repository(&config.id).is_some() {
            return Err(RegistryError::DuplicateId(config.id));
        }

        config.normalize_branch();
        config.is_default = false;
        validation::validate_repository(&config).map_err(RegistryError::Invalid)?;

        let id = config.id.clone();
        self.mutate(|settings| settings.repos.push(config))?;
        Ok(id)
    }

    /// Replace the entry matching `id`
    ///
    /// Returns `Ok(false)` without persisting when `id` is unknown, e.g. after the entry
    /// was removed elsewhere. The default pointer follows a renamed default entry.
    pub fn update(&mut self, id: &str, mut config: RepositoryConfig) -> Result<bool, RegistryError> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        if config.id.trim().is_empty() {
            config.id = id.to_string();
        }
        if config.id != id && self.settings.get_repository(&config.id).is_some() {
            return Err(RegistryError::DuplicateId(config.id));
        }

        config.normalize_branch();
        validation::validate_repository(&config).map_err(RegistryError::Invalid)?;

        self.mutate(|settings| {
            if settings.default_repo == id {
                settings.default_repo = config.id.clone();
            }
            settings.repos[index] = config;
        })?;
        Ok(true)
    }

    /// Delete the entry matching `id`, clearing the default pointer if it named it
    pub fn remove(&mut self, id: &str) -> Result<bool, RegistryError> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        self.mutate(|settings| {
            settings.repos.remove(index);
            if settings.default_repo == id {
                settings.default_repo.clear();
            }
        })?;
        Ok(true)
    }

    /// Make `id` the only default entry
    pub fn set_default(&mut self, id: &str) -> Result<(), RegistryError> {
        if self.position(id).is_none() {
            return Err(RegistryError::UnknownId(id.to_string()));
        }

        self.mutate(|settings| settings.default_repo = id.to_string())
    }

    /// Find the entry for `repo_id`, or the default entry when `repo_id` is empty
    ///
    /// Entries that fail validation are not publishable and resolve to `None`.
    pub fn resolve(&self, repo_id: &str) -> Option<&RepositoryConfig> {
        let id = if repo_id.is_empty() {
            self.default_id()?
        } else {
            repo_id
        };
        self.settings
            .get_repository(id)
            .filter(|repo| validation::validate_repository(repo).is_ok())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.settings.repos.iter().position(|repo| repo.id == id)
    }

    fn generate_id(&self) -> String {
        loop {
            let id = format!(
                "{}-{}",
                ID_PREFIX,
                &Uuid::new_v4().simple().to_string()[..UUID_LENGTH]
            );
            if self.settings.get_repository(&id).is_none() {
                return id;
            }
        }
    }

    /// Apply a change, re-derive default flags and persist; roll back if the save fails
    fn mutate(&mut self, change: impl FnOnce(&mut PublishSettings)) -> Result<(), RegistryError> {
        let previous = self.settings.clone();
        change(&mut self.settings);
        self.settings.sync_default_flags();

        if let Err(e) = self.store.save(&self.settings) {
            self.settings = previous;
            return Err(RegistryError::Persistence(e));
        }
        Ok(())
    }
}
