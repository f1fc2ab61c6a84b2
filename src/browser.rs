use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::RecipeApi;
use crate::category::Category;
use crate::config::FridgeConfig;
use crate::join::join_fail_fast;
use crate::model::{sort_by_name, ApiIngredient, Ingredient};
use crate::selection::{self, name_key, IdentityKey};
use crate::state::LoadState;
use crate::FridgeError;

/// Queries up to this many characters never hit the search endpoint
const MIN_SEARCH_CHARS: usize = 3;

/// Everything the ingredient screen renders
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientScreen {
    pub category: Category,
    pub query: String,
    pub ingredients: LoadState<Vec<Ingredient>>,
    /// Selected ingredients, one per identity key
    pub selected: Vec<Ingredient>,
}

impl IngredientScreen {
    /// Visible ingredients; empty unless a load succeeded
    pub fn visible(&self) -> &[Ingredient] {
        self.ingredients.data().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names of the selected ingredients, in list order
    pub fn selected_names(&self) -> Vec<String> {
        self.selected.iter().map(|i| i.name.clone()).collect()
    }

    /// Selected names joined for the recipe lookup
    pub fn selected_csv(&self) -> String {
        self.selected_names().join(",")
    }

    fn has_active_query(&self) -> bool {
        self.query.chars().count() >= MIN_SEARCH_CHARS
    }
}

/// What [`IngredientBrowser::search`] decided to do with a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchAction {
    /// Query was long enough and a search ran
    Searched,
    /// Query was cleared and the category reloaded
    ReloadedCategory,
    /// Query too short; nothing changed
    Skipped,
}

/// Request sizes and limits for the browser
#[derive(Debug, Clone)]
pub struct BrowseSettings {
    pub ingredient_count: u32,
    pub category_sample_count: u32,
    pub image_base_url: String,
    pub max_concurrency: Option<usize>,
}

impl From<&FridgeConfig> for BrowseSettings {
    fn from(config: &FridgeConfig) -> Self {
        BrowseSettings {
            ingredient_count: config.ingredient_count,
            category_sample_count: config.category_sample_count,
            image_base_url: config.image_base_url.clone(),
            max_concurrency: config.max_concurrency,
        }
    }
}

impl Default for BrowseSettings {
    fn default() -> Self {
        (&FridgeConfig::default()).into()
    }
}

/// Fetches, searches and selects ingredients for one screen
pub struct IngredientBrowser {
    api: Arc<dyn RecipeApi>,
    settings: BrowseSettings,
    identity: IdentityKey,
    screen: IngredientScreen,
}

impl IngredientBrowser {
    pub fn new(api: Arc<dyn RecipeApi>, settings: BrowseSettings) -> Self {
        IngredientBrowser {
            api,
            settings,
            identity: name_key,
            screen: IngredientScreen::default(),
        }
    }

    /// Replace the key used to match selections across fetches
    pub fn with_identity(mut self, identity: IdentityKey) -> Self {
        self.identity = identity;
        self
    }

    /// Resume from a previously saved screen
    pub fn with_screen(mut self, screen: IngredientScreen) -> Self {
        self.screen = screen;
        self
    }

    pub fn screen(&self) -> &IngredientScreen {
        &self.screen
    }

    pub fn into_screen(self) -> IngredientScreen {
        self.screen
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        self.screen.visible()
    }

    pub fn selected(&self) -> &[Ingredient] {
        &self.screen.selected
    }

    /// Random ingredients shown before a category is picked
    pub async fn load_initial(&mut self) -> Result<(), FridgeError> {
        self.screen.ingredients.begin();
        let result = self
            .api
            .random_ingredients(self.settings.ingredient_count)
            .await
            .map(|items| self.to_sorted_ingredients(items, "random"));
        self.settle(result, "random ingredients")
    }

    /// Switch to `category` and load its ingredients
    pub async fn load_by_category(&mut self, category: Category) -> Result<(), FridgeError> {
        self.screen.category = category;
        self.screen.ingredients.begin();
        let result = self.fetch_category(category).await;
        self.settle(result, category.id())
    }

    /// Search within the current category.
    ///
    /// Queries longer than two characters search, an empty query reloads the
    /// category and anything in between is ignored.
    pub async fn search(&mut self, query: &str) -> Result<SearchAction, FridgeError> {
        self.screen.query = query.to_string();

        if self.screen.has_active_query() {
            self.run_search().await?;
            Ok(SearchAction::Searched)
        } else if query.is_empty() {
            self.load_by_category(self.screen.category).await?;
            Ok(SearchAction::ReloadedCategory)
        } else {
            debug!("Query '{}' too short, keeping current results", query);
            Ok(SearchAction::Skipped)
        }
    }

    /// Re-issue the request behind the current screen
    pub async fn retry(&mut self) -> Result<(), FridgeError> {
        if self.screen.has_active_query() {
            self.run_search().await
        } else {
            self.load_by_category(self.screen.category).await
        }
    }

    /// Flip selection of the ingredient with `id`; returns the new flag.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let list = self.screen.ingredients.data_mut()?;
        let selected = selection::toggle(list, id, self.identity)?;
        self.screen.selected = selection::selected_set(list, self.identity);
        Some(selected)
    }

    /// Select the first unselected visible ingredient with this name (case-insensitive)
    pub fn select_by_name(&mut self, name: &str) -> bool {
        let wanted = name.to_lowercase();
        let id = self
            .ingredients()
            .iter()
            .find(|i| i.name.to_lowercase() == wanted && !i.selected)
            .map(|i| i.id.clone());
        match id {
            Some(id) => self.toggle(&id).unwrap_or(false),
            None => false,
        }
    }

    pub fn selected_names(&self) -> Vec<String> {
        self.screen.selected_names()
    }

    pub fn selected_csv(&self) -> String {
        self.screen.selected_csv()
    }

    async fn run_search(&mut self) -> Result<(), FridgeError> {
        self.screen.ingredients.begin();
        let category = self.screen.category;
        let context = format!("search-{}", category.id());
        let result = self
            .api
            .search_ingredients(
                &self.screen.query,
                self.settings.ingredient_count,
                category.query(),
            )
            .await
            .map(|items| self.to_sorted_ingredients(items, &context));
        self.settle(result, &context)
    }

    async fn fetch_category(&self, category: Category) -> Result<Vec<Ingredient>, FridgeError> {
        let Some(query) = category.query() else {
            return self.fetch_all_categories().await;
        };

        let items = self
            .api
            .search_ingredients(query, self.settings.ingredient_count, None)
            .await?;
        Ok(self.to_sorted_ingredients(items, category.id()))
    }

    /// One request per category, concatenated in table order and left unsorted
    async fn fetch_all_categories(&self) -> Result<Vec<Ingredient>, FridgeError> {
        let categories: Vec<Category> = Category::specific().collect();
        let limit = self.settings.max_concurrency.unwrap_or(categories.len());
        let number = self.settings.category_sample_count;
        let api = &self.api;
        let image_base_url = self.settings.image_base_url.as_str();

        let batches = join_fail_fast(categories, limit, |category| async move {
            let query = category.query().unwrap_or_default();
            let items = api.search_ingredients(query, number, None).await?;
            Ok::<_, FridgeError>(
                items
                    .into_iter()
                    .map(|item| Ingredient::from_api(item, category.id(), image_base_url))
                    .collect::<Vec<_>>(),
            )
        })
        .await?;

        Ok(batches.into_iter().flatten().collect())
    }

    fn to_sorted_ingredients(
        &self,
        items: Vec<ApiIngredient>,
        context: &str,
    ) -> Vec<Ingredient> {
        let mut ingredients: Vec<Ingredient> = items
            .into_iter()
            .map(|item| Ingredient::from_api(item, context, &self.settings.image_base_url))
            .collect();
        sort_by_name(&mut ingredients);
        ingredients
    }

    /// Apply a finished fetch to the screen, reconciling the selection.
    fn settle(
        &mut self,
        result: Result<Vec<Ingredient>, FridgeError>,
        context: &str,
    ) -> Result<(), FridgeError> {
        match result {
            Ok(results) => {
                info!("Loaded {} ingredients ({})", results.len(), context);
                let merged =
                    selection::reconcile_selection(results, &self.screen.selected, self.identity);
                self.screen.selected = selection::selected_set(&merged, self.identity);
                self.screen.ingredients.finish(Ok(merged));
                Ok(())
            }
            Err(e) => {
                error!("Error loading ingredients ({}): {}", context, e);
                self.screen.ingredients.fail(&e);
                Err(e)
            }
        }
    }
}
