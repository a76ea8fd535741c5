//! Settings file loading and saving

use super::RepositoryConfig;
use crate::constants::github::API_BASE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_api_base() -> String {
    API_BASE.to_string()
}

/// Persisted settings: the repository list and the default pointer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishSettings {
    #[serde(default)]
    pub repos: Vec<RepositoryConfig>,
    /// Id of the default repository; empty when there is none
    #[serde(default)]
    pub default_repo: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl PublishSettings {
    /// Create empty settings pointing at api.github.com
    pub fn new() -> Self {
        Self {
            repos: Vec::new(),
            default_repo: String::new(),
            api_base: default_api_base(),
        }
    }

    /// Load settings from a YAML file
    ///
    /// Returns `Ok(None)` when the file does not exist yet.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        if content.trim().is_empty() || content.trim() == "---" {
            return Ok(Some(Self::new()));
        }

        let settings: PublishSettings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))?;

        Ok(Some(settings))
    }

    /// Save settings to a YAML file, creating the parent directory if needed
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;

        // Document marker for yamllint compliance
        let yaml_content = format!("---\n{}", yaml);

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        std::fs::write(path, yaml_content)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;

        Ok(())
    }

    /// Get repository by id
    pub fn get_repository(&self, id: &str) -> Option<&RepositoryConfig> {
        self.repos.iter().find(|repo| repo.id == id)
    }

    /// The default repository id, if one is set
    pub fn default_id(&self) -> Option<&str> {
        if self.default_repo.is_empty() {
            None
        } else {
            Some(&self.default_repo)
        }
    }

    /// Make every `is_default` flag agree with the default pointer
    pub(crate) fn sync_default_flags(&mut self) {
        let default_repo = self.default_repo.clone();
        for repo in &mut self.repos {
            repo.is_default = !default_repo.is_empty() && repo.id == default_repo;
        }
    }
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self::new()
    }
}
