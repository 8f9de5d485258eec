use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::lookup::DEFAULT_BASE_URL;
use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub favorites: FavoritesConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base of the recipe API; `/lookup.php` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesConfig {
    /// JSON file the host keeps favorites in.
    #[serde(default = "default_favorites_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Recipe shown when no id is given on the command line.
    #[serde(default = "default_recipe_id")]
    pub default_recipe_id: String,
    #[serde(default = "default_show_keys_bar")]
    pub show_keys_bar: bool,
    /// Optional JSON loader animation (`{"frames": [...], "interval_ms": N}`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loader_asset: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            path: default_favorites_path(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_recipe_id: default_recipe_id(),
            show_keys_bar: default_show_keys_bar(),
            loader_asset: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    format!("cocktail/{}", env!("CARGO_PKG_VERSION"))
}

fn default_favorites_path() -> PathBuf {
    platform::data_dir().join("favorites.json")
}

fn default_recipe_id() -> String {
    "11007".to_string()
}

fn default_show_keys_bar() -> bool {
    true
}

impl Config {
    /// Load from the default location, writing a default file on first run.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(
            config.api.base_url,
            "https://www.thecocktaildb.com/api/json/v1/1"
        );
        assert!(config.api.user_agent.starts_with("cocktail/"));
        assert!(config.favorites.path.ends_with("cocktail/favorites.json"));
        assert_eq!(config.ui.default_recipe_id, "11007");
        assert!(config.ui.show_keys_bar);
        assert!(config.ui.loader_asset.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "http://127.0.0.1:9000/api"

            [ui]
            show_keys_bar = false
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:9000/api");
        assert!(config.api.user_agent.starts_with("cocktail/"));
        assert!(!config.ui.show_keys_bar);
        assert_eq!(config.ui.default_recipe_id, "11007");
    }

    #[test]
    fn test_default_config_survives_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let config: Config = toml::from_str(&text).unwrap();
        assert_eq!(config.ui.default_recipe_id, "11007");
    }
}
