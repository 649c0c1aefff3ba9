use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use taskdeck_core::{Category, SortOption};

const CONFIG_DIR: &str = ".taskdeck";
const CONFIG_FILE: &str = "config.toml";
const DEFAULT_DATA_DIR: &str = ".taskdeck/data";

/// Top-level configuration loaded from `.taskdeck/config.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Where collections are stored.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Initial presentation settings.
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    categories: Option<Vec<Category>>,
}

impl AppConfig {
    /// Load configuration from a working directory. A missing file yields defaults.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read, parsed or validated.
    pub fn from_workdir(workdir: impl AsRef<Path>) -> Result<Self> {
        let config_path = workdir.as_ref().join(CONFIG_DIR).join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("invalid config {}", config_path.display()))
    }

    /// Parse and validate configuration text.
    ///
    /// # Errors
    /// Returns an error if the text is not valid TOML or fails validation.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Categories seeded on first run: the configured set, or the built-ins.
    #[must_use]
    pub fn default_categories(&self) -> Vec<Category> {
        self.categories.clone().unwrap_or_else(Category::defaults)
    }

    /// Resolve the data directory against `workdir` when it is relative.
    #[must_use]
    pub fn data_dir(&self, workdir: impl AsRef<Path>) -> PathBuf {
        workdir.as_ref().join(&self.storage.data_dir)
    }

    fn validate(&self) -> Result<()> {
        if self.storage.data_dir.as_os_str().is_empty() {
            bail!("storage data_dir must not be empty");
        }
        self.ensure_unique_categories()
    }

    fn ensure_unique_categories(&self) -> Result<()> {
        let Some(categories) = &self.categories else {
            return Ok(());
        };
        let mut seen = HashSet::new();
        for category in categories {
            if category.id.as_str().trim().is_empty() {
                bail!("category '{}' must have a non-empty id", category.name);
            }
            if !seen.insert(category.id.as_str()) {
                bail!("duplicate category id detected: {}", category.id);
            }
        }
        Ok(())
    }
}

/// Storage configuration block.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `tasks.json` and `categories.json`.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

/// View configuration block.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ViewConfig {
    /// Sort order selected when a store is opened.
    #[serde(default)]
    pub default_sort: SortOption,
}
