//! Provider settings storage.
//!
//! Persists provider settings to disk at `{working_dir}/.travel-planner/settings.json`.
//! Environment variables are used as initial defaults when no settings file exists.
//! Readers take a fresh snapshot on every call, so updates apply to the next request.
//! The CLI reads the file once per process; long-lived callers change the
//! provider through [`SettingsStore::set_provider`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::{Config, NarrativeLanguage, ProviderConfig};

/// Runtime-adjustable settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub language: NarrativeLanguage,
}

impl From<Config> for Settings {
    fn from(config: Config) -> Self {
        Self {
            provider: config.provider,
            language: config.language,
        }
    }
}

/// In-memory store for settings with optional disk persistence.
#[derive(Debug)]
pub struct SettingsStore {
    settings: RwLock<Settings>,
    storage_path: Option<PathBuf>,
}

impl SettingsStore {
    /// Create a settings store, loading from disk if available.
    ///
    /// If no settings file exists, uses environment variables as defaults
    /// (`AI_API_KEY`, `AI_API_ENDPOINT`, `AI_MODEL`, `NARRATIVE_LANGUAGE`).
    pub async fn new(working_dir: &Path) -> Self {
        let storage_path = working_dir.join(".travel-planner/settings.json");

        let settings = if storage_path.exists() {
            match Self::load_from_path(&storage_path) {
                Ok(s) => {
                    tracing::info!("Loaded settings from {}", storage_path.display());
                    s
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to load settings from {}: {}, using environment defaults",
                        storage_path.display(),
                        e
                    );
                    Config::from_env().into()
                }
            }
        } else {
            tracing::info!(
                "No settings file found at {}, using environment defaults",
                storage_path.display()
            );
            Config::from_env().into()
        };

        Self {
            settings: RwLock::new(settings),
            storage_path: Some(storage_path),
        }
    }

    /// A store that never touches disk.
    pub fn in_memory(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
            storage_path: None,
        }
    }

    fn load_from_path(path: &Path) -> Result<Settings, std::io::Error> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    async fn save_to_disk(&self) -> Result<(), std::io::Error> {
        let Some(path) = &self.storage_path else {
            return Ok(());
        };
        let settings = self.settings.read().await;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(&*settings)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(path, contents)?;
        tracing::debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Get a clone of the current settings.
    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Replace the provider configuration.
    ///
    /// Returns true if the value changed.
    pub async fn set_provider(&self, provider: ProviderConfig) -> Result<bool, std::io::Error> {
        let mut settings = self.settings.write().await;
        if settings.provider == provider {
            return Ok(false);
        }
        settings.provider = provider;
        drop(settings); // Release lock before saving
        self.save_to_disk().await?;
        Ok(true)
    }
}

/// Shared settings store wrapped in Arc for concurrent access.
pub type SharedSettingsStore = Arc<SettingsStore>;
