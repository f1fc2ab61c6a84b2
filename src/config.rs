use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Runtime configuration for the recipe API client and the browsing flows
#[derive(Debug, Deserialize, Clone)]
pub struct FridgeConfig {
    /// API key sent as the `apiKey` query parameter
    /// (falls back to the SPOONACULAR_API_KEY environment variable)
    pub api_key: Option<String>,
    /// Base URL of the recipe API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Prefix joined with the image file names returned for ingredients
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Number of ingredients requested for a category, search or random list
    #[serde(default = "default_ingredient_count")]
    pub ingredient_count: u32,
    /// Number of ingredients requested per category when browsing "All"
    #[serde(default = "default_category_sample_count")]
    pub category_sample_count: u32,
    /// Number of recipes requested from findByIngredients
    #[serde(default = "default_recipe_count")]
    pub recipe_count: u32,
    /// Overrides the concurrency bound of both fan-outs
    #[serde(default)]
    pub max_concurrency: Option<usize>,
}

impl Default for FridgeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            timeout: default_timeout(),
            ingredient_count: default_ingredient_count(),
            category_sample_count: default_category_sample_count(),
            recipe_count: default_recipe_count(),
            max_concurrency: None,
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://api.spoonacular.com".to_string()
}

fn default_image_base_url() -> String {
    "https://spoonacular.com/cdn/ingredients_100x100".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_ingredient_count() -> u32 {
    20
}

fn default_category_sample_count() -> u32 {
    5
}

fn default_recipe_count() -> u32 {
    10
}

impl FridgeConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with FRIDGE_MATE__ prefix
    /// 2. fridge-mate.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: FRIDGE_MATE__API_KEY, FRIDGE_MATE__TIMEOUT
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Request timeout as a `Duration`
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// API key from configuration, then from SPOONACULAR_API_KEY
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var("SPOONACULAR_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }
}

/// Load configuration from file and environment variables
///
/// See [`FridgeConfig::load`] for the precedence rules.
pub fn load_config() -> Result<FridgeConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("fridge-mate").required(false))
        // Use double underscore for nested: FRIDGE_MATE__API_KEY
        .add_source(
            Environment::with_prefix("FRIDGE_MATE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_base_url(), "https://api.spoonacular.com");
        assert_eq!(default_timeout(), 10);
        assert_eq!(default_ingredient_count(), 20);
        assert_eq!(default_category_sample_count(), 5);
        assert_eq!(default_recipe_count(), 10);
    }

    #[test]
    fn test_default_config() {
        let config = FridgeConfig::default();
        assert!(config.api_key.is_none());
        assert!(config.max_concurrency.is_none());
        assert_eq!(config.timeout_duration(), Duration::from_secs(10));
        assert!(config.image_base_url.ends_with("ingredients_100x100"));
    }

    #[test]
    fn test_configured_api_key_wins() {
        let config = FridgeConfig {
            api_key: Some("from-config".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("from-config"));
    }

    #[test]
    fn test_load_config_without_file() {
        // Every field has a default, so loading without a file must succeed
        let config = load_config().unwrap();
        assert!(!config.base_url.is_empty());
    }
}
