use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::error::{EditorError, Result};
use crate::app::domain::customization::TemplateId;
use crate::app::domain::ids::IdGenerator;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub default_template: TemplateId,

    #[serde(default = "default_currency")]
    pub default_currency: String,

    #[serde(default = "default_category_placeholder")]
    pub category_placeholder: String,

    #[serde(default = "default_item_placeholder")]
    pub item_placeholder: String,

    /// Open new sessions with the template's starter menu instead of an empty one.
    #[serde(default = "default_seed_starter_menu")]
    pub seed_starter_menu: bool,

    /// Fixed id prefix. `None` derives one from the session start time.
    #[serde(default)]
    pub id_prefix: Option<String>,
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_category_placeholder() -> String {
    "New Category".to_string()
}

fn default_item_placeholder() -> String {
    "New Item".to_string()
}

fn default_seed_starter_menu() -> bool {
    true
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_template: TemplateId::default(),
            default_currency: default_currency(),
            category_placeholder: default_category_placeholder(),
            item_placeholder: default_item_placeholder(),
            seed_starter_menu: default_seed_starter_menu(),
            id_prefix: None,
        }
    }
}

impl EditorConfig {
    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        let config_path = Self::get_config_path();
        match Self::load_from(&config_path) {
            Ok(Some(config)) => config,
            Ok(None) => {
                let default = Self::default();
                // Try to save defaults for next time
                if let Err(e) = default.save() {
                    warn!(error = %e, "Could not write default editor config");
                }
                default
            }
            Err(e) => {
                warn!(path = %config_path.display(), error = %e, "Failed to parse editor config, using defaults");
                Self::default()
            }
        }
    }

    /// Read a config file. `Ok(None)` when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let config: EditorConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        info!(path = %path.display(), template = config.default_template.as_str(), "Loaded editor config");
        Ok(Some(config))
    }

    /// Placeholders name entities that are created blank, so they can't be blank themselves.
    pub fn validate(&self) -> Result<()> {
        if self.category_placeholder.trim().is_empty() {
            return Err(EditorError::Config("category_placeholder must not be empty".to_string()));
        }
        if self.item_placeholder.trim().is_empty() {
            return Err(EditorError::Config("item_placeholder must not be empty".to_string()));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("menuforge");
        path.push("settings.json");
        path
    }

    pub fn id_generator(&self) -> IdGenerator {
        match self.id_prefix.as_deref().map(str::trim) {
            Some(prefix) if !prefix.is_empty() => IdGenerator::with_prefix(prefix),
            _ => IdGenerator::new(),
        }
    }
}
