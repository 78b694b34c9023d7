use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog::{Engine, SourceSpec};
use crate::error::{PricedeltaError, Result};

/// Global pricedelta configuration: the two catalog sources to compare and
/// where the report lands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Our storefront
    pub ours: SourceSpec,

    /// Competitor storefront
    pub competitor: SourceSpec,

    /// Directory for the dated report file (default: current directory)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ours: SourceSpec {
                name: "grillmaster".into(),
                url: "https://grillmaster.dp.ua/hazovi-hryli/".into(),
                engine: Engine::Http,
                // WooCommerce catalog markup
                card_class: "product".into(),
                title_class: "woocommerce-loop-product__title".into(),
                price_class: "woocommerce-Price-amount".into(),
                headers: Default::default(),
            },
            competitor: SourceSpec {
                name: "bbq24".into(),
                url: "https://bbq24.com.ua/ua/gazovye-grili/".into(),
                engine: Engine::Http,
                // CS-Cart grid-list markup
                card_class: "ty-grid-list__item".into(),
                title_class: "ty-grid-list__item-name".into(),
                price_class: "ty-price".into(),
                headers: Default::default(),
            },
            output_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from the default location, falling back to the
    /// built-in sources when no config file exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the given path
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| PricedeltaError::ConfigError(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "pricedelta").ok_or_else(|| {
            PricedeltaError::ConfigError("Could not determine config directory".into())
        })?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path (browser scroll script lives here)
    pub fn data_dir() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "pricedelta").ok_or_else(|| {
            PricedeltaError::ConfigError("Could not determine data directory".into())
        })?;
        Ok(dirs.data_dir().to_path_buf())
    }
}
