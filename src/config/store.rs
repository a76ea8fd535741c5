//! Settings persistence backends

use super::PublishSettings;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Where the registry loads its settings from and persists every mutation to
pub trait SettingsStore: Send + Sync {
    /// Load persisted settings, `None` when nothing has been saved yet
    fn load(&self) -> Result<Option<PublishSettings>>;

    /// Persist the full settings
    fn save(&self, settings: &PublishSettings) -> Result<()>;
}

/// YAML file on disk
#[derive(Debug, Clone)]
pub struct YamlSettingsStore {
    path: PathBuf,
}

impl YamlSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SettingsStore for YamlSettingsStore {
    fn load(&self) -> Result<Option<PublishSettings>> {
        PublishSettings::load(&self.path)
    }

    fn save(&self, settings: &PublishSettings) -> Result<()> {
        settings.save(&self.path)
    }
}

/// In-memory store, for embedding and tests
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: Mutex<Option<PublishSettings>>,
    saves: AtomicUsize,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from previously persisted settings
    pub fn with_settings(settings: PublishSettings) -> Self {
        Self {
            settings: Mutex::new(Some(settings)),
            saves: AtomicUsize::new(0),
        }
    }

    /// Snapshot of what was last saved
    pub fn snapshot(&self) -> Option<PublishSettings> {
        self.settings
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Number of `save` calls so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<Option<PublishSettings>> {
        Ok(self.snapshot())
    }

    fn save(&self, settings: &PublishSettings) -> Result<()> {
        let mut guard = self
            .settings
            .lock()
            .map_err(|_| anyhow::anyhow!("Settings store lock poisoned"))?;
        *guard = Some(settings.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
