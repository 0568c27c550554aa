use crate::core::catalog::Catalog;
use crate::core::format::FormatOptions;
use crate::shared::error::{AppError, AppResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterSettings {
    /// External catalog document; the built-in catalog is used when unset
    pub catalog_path: Option<PathBuf>,
    /// Category a new session opens on
    pub default_category: Option<String>,
    /// Input value a new session starts with
    pub default_input: f64,
    pub format: FormatOptions,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            catalog_path: None,
            default_category: None,
            default_input: 1.0,
            format: FormatOptions::default(),
        }
    }
}

impl ConverterSettings {
    pub fn get_settings_path() -> AppResult<PathBuf> {
        ProjectDirs::from("com", "antigravity", "unit-converter")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .ok_or_else(|| AppError::Settings("Failed to determine config directory".to_string()))
    }

    /// Load from the platform config directory, writing defaults on first run
    pub async fn load() -> AppResult<Self> {
        let path = Self::get_settings_path()?;
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &Path) -> AppResult<Self> {
        if !fs::try_exists(path).await? {
            let settings = Self::default();
            settings.save_to(path).await?;
            tracing::info!(path = %path.display(), "wrote default converter settings");
            return Ok(settings);
        }

        let content = fs::read_to_string(path).await?;
        serde_json::from_str(&content)
            .map_err(|e| AppError::Settings(format!("Failed to parse settings: {}", e)))
    }

    pub async fn save(&self) -> AppResult<()> {
        let path = Self::get_settings_path()?;
        self.save_to(&path).await
    }

    pub async fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// The catalog these settings point at. Any failure here is fatal for the converter.
    pub async fn load_catalog(&self) -> AppResult<Catalog> {
        let catalog = match &self.catalog_path {
            Some(path) => Catalog::load_from_file(path).await?,
            None => Catalog::builtin()?,
        };
        Ok(catalog)
    }
}
