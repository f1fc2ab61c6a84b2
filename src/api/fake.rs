use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::api::RecipeApi;
use crate::model::{ApiIngredient, RecipeDetails, RecipeMatch};
use crate::FridgeError;

/// In-memory API with canned answers; unknown keys answer 404.
pub struct FakeApi {
    pub random: Vec<ApiIngredient>,
    /// Keyed by search query
    pub searches: HashMap<String, Result<Vec<ApiIngredient>, u16>>,
    pub matches: Result<Vec<RecipeMatch>, u16>,
    pub details: HashMap<u64, RecipeDetails>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn with_search(mut self, query: &str, names: &[(u64, &str)]) -> Self {
        let items = names.iter().map(|(id, name)| item(*id, name)).collect();
        self.searches.insert(query.to_string(), Ok(items));
        self
    }

    pub fn with_failing_search(mut self, query: &str, status: u16) -> Self {
        self.searches.insert(query.to_string(), Err(status));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for FakeApi {
    fn default() -> Self {
        FakeApi {
            random: Vec::new(),
            searches: HashMap::new(),
            matches: Ok(Vec::new()),
            details: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

pub fn item(id: u64, name: &str) -> ApiIngredient {
    ApiIngredient {
        id,
        name: name.to_string(),
        image: None,
        aisle: None,
    }
}

#[async_trait]
impl RecipeApi for FakeApi {
    async fn random_ingredients(&self, number: u32) -> Result<Vec<ApiIngredient>, FridgeError> {
        self.record(format!("random number={}", number));
        Ok(self.random.clone())
    }

    async fn search_ingredients(
        &self,
        query: &str,
        number: u32,
        category: Option<&str>,
    ) -> Result<Vec<ApiIngredient>, FridgeError> {
        self.record(format!(
            "search query={} number={} category={}",
            query,
            number,
            category.unwrap_or("-")
        ));
        match self.searches.get(query) {
            Some(Ok(items)) => Ok(items.clone()),
            Some(Err(status)) => Err(FridgeError::Http { status: *status }),
            None => Err(FridgeError::Http { status: 404 }),
        }
    }

    async fn find_by_ingredients(
        &self,
        ingredients: &str,
        number: u32,
    ) -> Result<Vec<RecipeMatch>, FridgeError> {
        self.record(format!("find ingredients={} number={}", ingredients, number));
        self.matches
            .clone()
            .map_err(|status| FridgeError::Http { status })
    }

    async fn recipe_information(&self, id: u64) -> Result<RecipeDetails, FridgeError> {
        self.record(format!("information id={}", id));
        self.details
            .get(&id)
            .cloned()
            .ok_or(FridgeError::Http { status: 404 })
    }
}
