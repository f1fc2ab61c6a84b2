use serde::{Deserialize, Serialize};

use crate::sanitize::clean_instructions;

/// Shown on the detail screen when a recipe carries no instructions
pub const NO_INSTRUCTIONS: &str = "No instructions available.";

/// Ingredient row as returned by the ingredient endpoints
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiIngredient {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub aisle: Option<String>,
}

/// An ingredient as displayed and selected in the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Composite `<context>-<api id>` key, unique within one fetch
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aisle: Option<String>,
    pub selected: bool,
}

impl Ingredient {
    /// Build a display ingredient from an API row fetched in `context`.
    pub fn from_api(item: ApiIngredient, context: &str, image_base_url: &str) -> Self {
        let image_url = item
            .image
            .filter(|file| !file.is_empty())
            .map(|file| format!("{}/{}", image_base_url.trim_end_matches('/'), file));

        Ingredient {
            id: format!("{}-{}", context, item.id),
            name: item.name,
            image_url,
            aisle: item.aisle,
            selected: false,
        }
    }
}

/// Sort ingredients by name, ignoring case.
pub fn sort_by_name(ingredients: &mut [Ingredient]) {
    ingredients.sort_by_cached_key(|i| i.name.to_lowercase());
}

/// Lightweight row from the findByIngredients endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeMatch {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub used_ingredient_count: Option<u32>,
    #[serde(default)]
    pub missed_ingredient_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedIngredient {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    /// Human readable line, e.g. "2 cups of flour"
    #[serde(default)]
    pub original: Option<String>,
}

/// Full recipe record from `/recipes/{id}/information`
///
/// Fields the list view depends on are optional here because the API
/// regularly omits them; see [`RecipeDetails::is_complete`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetails {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub source_url: Option<String>,
    /// HTML formatted method of preparation
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub extended_ingredients: Option<Vec<ExtendedIngredient>>,
}

impl RecipeDetails {
    /// A recipe is complete when title, image, ready time and servings are all
    /// present and non-empty; zero counts as missing.
    pub fn is_complete(&self) -> bool {
        let present = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.is_empty());
        present(&self.title)
            && present(&self.image)
            && self.ready_in_minutes.is_some_and(|m| m > 0)
            && self.servings.is_some_and(|s| s > 0)
    }

    /// `original` lines of the extended ingredients, in API order; entries
    /// without one are skipped
    pub fn ingredient_lines(&self) -> Vec<String> {
        self.extended_ingredients
            .iter()
            .flatten()
            .filter_map(|i| i.original.clone())
            .collect()
    }

    /// Instructions with markup stripped, or a placeholder when there are none
    pub fn method_of_preparation(&self) -> String {
        match self.instructions.as_deref() {
            Some(html) if !html.is_empty() => clean_instructions(html),
            _ => NO_INSTRUCTIONS.to_string(),
        }
    }

    /// Card for the recipe list; `None` if the record is incomplete.
    pub fn summary(&self) -> Option<RecipeSummary> {
        if !self.is_complete() {
            return None;
        }
        Some(RecipeSummary {
            id: self.id,
            title: self.title.clone().unwrap_or_default(),
            image: self.image.clone().unwrap_or_default(),
            ready_in_minutes: self.ready_in_minutes.unwrap_or_default(),
            servings: self.servings.unwrap_or_default(),
            source_url: self.source_url.clone(),
            ingredients: self.ingredient_lines(),
        })
    }
}

/// A complete recipe as shown in the recipe list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: u64,
    pub title: String,
    pub image: String,
    pub ready_in_minutes: u32,
    pub servings: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub ingredients: Vec<String>,
}
