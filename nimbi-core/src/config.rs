use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{i18n::Language, model::ForecastRequest, provider::ModelId};

/// A named point on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Narrative language, "en" or "el".
    pub language: Language,

    /// Model the others are compared against.
    pub primary_model: ModelId,

    /// Models to fetch. The primary model is always fetched as well.
    pub models: Vec<ModelId>,

    /// Override for the Open-Meteo forecast endpoint.
    pub api_base_url: Option<String>,

    pub forecast_days: u8,

    /// Example TOML:
    /// [location]
    /// name = "Athens"
    /// latitude = 37.98
    /// longitude = 23.73
    pub location: Option<LocationConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::default(),
            primary_model: ModelId::primary(),
            models: ModelId::all().to_vec(),
            api_base_url: None,
            forecast_days: 7,
            location: None,
        }
    }
}

impl Config {
    /// Return the configured location, or a hint on how to set one.
    pub fn default_location(&self) -> Result<&LocationConfig> {
        self.location.as_ref().ok_or_else(|| {
            anyhow!(
                "No location configured.\n\
                 Hint: run `nimbi configure` or pass --lat and --lon."
            )
        })
    }

    pub fn set_location(&mut self, name: String, latitude: f64, longitude: f64) {
        self.location = Some(LocationConfig { name, latitude, longitude });
    }

    /// Models to request, primary first, without duplicates.
    pub fn enabled_models(&self) -> Vec<ModelId> {
        let mut models = vec![self.primary_model];
        for &model in &self.models {
            if !models.contains(&model) {
                models.push(model);
            }
        }
        models
    }

    pub fn forecast_request(&self, latitude: f64, longitude: f64) -> ForecastRequest {
        ForecastRequest {
            latitude,
            longitude,
            forecast_days: self.forecast_days,
        }
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "nimbi", "nimbi")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
