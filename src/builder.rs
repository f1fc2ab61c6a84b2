use std::sync::Arc;
use std::time::Duration;

use crate::api::{RecipeApi, SpoonacularClient};
use crate::browser::{BrowseSettings, IngredientBrowser};
use crate::config::FridgeConfig;
use crate::recipes::RecipeResolver;
use crate::FridgeError;

/// Builder for a configured [`FridgeMate`] instance
#[derive(Default)]
pub struct FridgeMateBuilder {
    config: Option<FridgeConfig>,
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    api: Option<Arc<dyn RecipeApi>>,
}

impl FridgeMateBuilder {
    /// Use this configuration instead of loading it from file and environment
    ///
    /// # Example
    /// ```
    /// use fridge_mate::{FridgeConfig, FridgeMate};
    ///
    /// let builder = FridgeMate::builder().config(FridgeConfig::default());
    /// ```
    pub fn config(mut self, config: FridgeConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the API key directly instead of relying on configuration
    ///
    /// # Example
    /// ```
    /// use fridge_mate::FridgeMate;
    ///
    /// let builder = FridgeMate::builder().api_key("your-api-key");
    /// ```
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Point the client at another deployment or a local mock
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use fridge_mate::FridgeMate;
    /// use std::time::Duration;
    ///
    /// let builder = FridgeMate::builder().timeout(Duration::from_secs(5));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Use a custom API implementation; key, base URL and timeout are then ignored
    pub fn api(mut self, api: Arc<dyn RecipeApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Build the instance
    ///
    /// # Errors
    /// Returns `FridgeError` if:
    /// - configuration cannot be loaded
    /// - no API key is available
    /// - the HTTP client cannot be created
    pub fn build(self) -> Result<FridgeMate, FridgeError> {
        let mut config = match self.config {
            Some(config) => config,
            None => FridgeConfig::load()?,
        };
        if let Some(key) = self.api_key {
            config.api_key = Some(key);
        }
        if let Some(url) = self.base_url {
            config.base_url = url;
        }

        let api: Arc<dyn RecipeApi> = match self.api {
            Some(api) => api,
            None => {
                let api_key = config.resolve_api_key().ok_or(FridgeError::MissingApiKey)?;
                let timeout = self.timeout.unwrap_or_else(|| config.timeout_duration());
                Arc::new(SpoonacularClient::with_base_url(
                    api_key,
                    config.base_url.clone(),
                    timeout,
                )?)
            }
        };

        Ok(FridgeMate { api, config })
    }
}

/// Entry point tying configuration, API client and the two flows together
#[derive(Clone)]
pub struct FridgeMate {
    api: Arc<dyn RecipeApi>,
    config: FridgeConfig,
}

impl FridgeMate {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use fridge_mate::FridgeMate;
    ///
    /// let builder = FridgeMate::builder();
    /// ```
    pub fn builder() -> FridgeMateBuilder {
        FridgeMateBuilder::default()
    }

    pub fn config(&self) -> &FridgeConfig {
        &self.config
    }

    pub fn api(&self) -> Arc<dyn RecipeApi> {
        self.api.clone()
    }

    /// A fresh ingredient browser sharing this instance's client
    pub fn browser(&self) -> IngredientBrowser {
        IngredientBrowser::new(self.api.clone(), BrowseSettings::from(&self.config))
    }

    pub fn resolver(&self) -> RecipeResolver {
        RecipeResolver::new(self.api.clone(), &self.config)
    }
}
