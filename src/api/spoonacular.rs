use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::api::RecipeApi;
use crate::config::FridgeConfig;
use crate::model::{ApiIngredient, RecipeDetails, RecipeMatch};
use crate::FridgeError;

/// Ranking mode for findByIngredients: maximise used ingredients
const RANKING_MAXIMIZE_USED: &str = "1";

/// Spoonacular REST client
pub struct SpoonacularClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SpoonacularClient {
    /// Create a client from configuration
    pub fn new(config: &FridgeConfig) -> Result<Self, FridgeError> {
        let api_key = config.resolve_api_key().ok_or(FridgeError::MissingApiKey)?;
        Self::with_base_url(api_key, config.base_url.clone(), config.timeout_duration())
    }

    #[doc(hidden)]
    pub fn with_base_url(
        api_key: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, FridgeError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fridge-mate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FridgeError::Client(format!("Failed to create HTTP client: {}", e)))?;

        Ok(SpoonacularClient {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json(&self, path: &str, params: &[(&str, String)]) -> Result<Value, FridgeError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await
            .map_err(FridgeError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            debug!("GET {} answered {}", url, status);
            return Err(FridgeError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(FridgeError::from_transport)?;

        serde_json::from_slice(&body)
            .map_err(|e| FridgeError::InvalidResponse(format!("body is not JSON: {}", e)))
    }
}

fn parse_array<T: DeserializeOwned>(value: Value, what: &str) -> Result<Vec<T>, FridgeError> {
    if !value.is_array() {
        return Err(FridgeError::InvalidResponse(format!(
            "expected an array of {}",
            what
        )));
    }
    serde_json::from_value(value)
        .map_err(|e| FridgeError::InvalidResponse(format!("malformed {}: {}", what, e)))
}

#[async_trait]
impl RecipeApi for SpoonacularClient {
    async fn random_ingredients(&self, number: u32) -> Result<Vec<ApiIngredient>, FridgeError> {
        let value = self
            .get_json(
                "/food/ingredients/random",
                &[("number", number.to_string())],
            )
            .await?;
        parse_array(value, "ingredients")
    }

    async fn search_ingredients(
        &self,
        query: &str,
        number: u32,
        category: Option<&str>,
    ) -> Result<Vec<ApiIngredient>, FridgeError> {
        let mut params = vec![("query", query.to_string()), ("number", number.to_string())];
        if let Some(category) = category {
            params.push(("category", category.to_string()));
        }

        let mut value = self
            .get_json("/food/ingredients/search", &params)
            .await?;

        match value.get_mut("results").map(Value::take) {
            Some(results) => parse_array(results, "ingredients"),
            None => Err(FridgeError::InvalidResponse(
                "search response has no results array".to_string(),
            )),
        }
    }

    async fn find_by_ingredients(
        &self,
        ingredients: &str,
        number: u32,
    ) -> Result<Vec<RecipeMatch>, FridgeError> {
        let value = self
            .get_json(
                "/recipes/findByIngredients",
                &[
                    ("ingredients", ingredients.to_string()),
                    ("number", number.to_string()),
                    ("ranking", RANKING_MAXIMIZE_USED.to_string()),
                    ("ignorePantry", "true".to_string()),
                ],
            )
            .await?;
        parse_array(value, "recipes")
    }

    async fn recipe_information(&self, id: u64) -> Result<RecipeDetails, FridgeError> {
        let value = self
            .get_json(&format!("/recipes/{}/information", id), &[])
            .await?;

        if !value.is_object() {
            return Err(FridgeError::InvalidResponse(
                "expected a recipe object".to_string(),
            ));
        }
        serde_json::from_value(value)
            .map_err(|e| FridgeError::InvalidResponse(format!("malformed recipe: {}", e)))
    }
}
