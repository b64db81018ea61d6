// ============================================================================
// File: src/models.rs
// Search filters, API response models and display state
// ============================================================================

use clap::ValueEnum;
use serde::Deserialize;

pub const UNTITLED_RECIPE: &str = "Untitled Recipe";
pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_INGREDIENTS: &str = "No ingredients listed.";
pub const NO_INSTRUCTIONS: &str = "No instructions available.";
pub const NO_SUMMARY: &str = "No summary available.";

/// Cuisines offered by the search form. `None` in the filters means any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Cuisine {
    Indian,
    Mexican,
    Italian,
    Chinese,
}

impl Cuisine {
    /// Value sent to the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Cuisine::Indian => "Indian",
            Cuisine::Mexican => "Mexican",
            Cuisine::Italian => "Italian",
            Cuisine::Chinese => "Chinese",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DietPreference {
    #[default]
    Any,
    Vegetarian,
    #[value(name = "non-veg")]
    NonVegetarian,
}

/// User input for a single search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub query: Option<String>,
    pub cuisine: Option<Cuisine>,
    pub diet: DietPreference,
}

impl SearchFilters {
    pub fn new(query: Option<&str>, cuisine: Option<Cuisine>, diet: DietPreference) -> Self {
        let query = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string);
        Self {
            query,
            cuisine,
            diet,
        }
    }

    /// True when no filter narrows the search.
    pub fn is_unconstrained(&self) -> bool {
        self.query.is_none() && self.cuisine.is_none() && self.diet == DietPreference::Any
    }
}

/// Response from the complexSearch endpoint
#[derive(Debug, Deserialize)]
pub struct ComplexSearchResponse {
    pub results: Option<Vec<RecipeSummary>>,
}

#[derive(Debug, Deserialize)]
pub struct RecipeSummary {
    pub id: u64,
}

/// Response from the recipe information endpoint
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInformation {
    pub title: Option<String>,
    pub image: Option<String>,
    pub ready_in_minutes: Option<f64>,
    pub servings: Option<f64>,
    pub extended_ingredients: Option<Vec<ExtendedIngredient>>,
    pub analyzed_instructions: Option<Vec<InstructionGroup>>,
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExtendedIngredient {
    pub original: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InstructionGroup {
    pub steps: Option<Vec<InstructionStep>>,
}

#[derive(Debug, Deserialize)]
pub struct InstructionStep {
    pub step: Option<String>,
}

/// Recipe ready for display, with every missing field already filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDetail {
    pub title: String,
    pub image_url: String,
    pub ready_in_minutes: String,
    pub servings: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    /// Upstream HTML, passed through untouched.
    pub summary_html: String,
}

impl RecipeDetail {
    pub fn from_information(info: RecipeInformation, placeholder_image: &str) -> Self {
        let ingredients: Vec<String> = info
            .extended_ingredients
            .unwrap_or_default()
            .into_iter()
            .filter_map(|ing| non_empty(ing.original).or_else(|| non_empty(ing.name)))
            .collect();

        // Only the first instruction group is shown.
        let steps: Vec<String> = info
            .analyzed_instructions
            .and_then(|groups| groups.into_iter().next())
            .and_then(|group| group.steps)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|s| non_empty(s.step))
            .collect();

        Self {
            title: non_empty(info.title).unwrap_or_else(|| UNTITLED_RECIPE.to_string()),
            image_url: non_empty(info.image).unwrap_or_else(|| placeholder_image.to_string()),
            ready_in_minutes: count_or_na(info.ready_in_minutes),
            servings: count_or_na(info.servings),
            ingredients: or_placeholder(ingredients, NO_INGREDIENTS),
            steps: or_placeholder(steps, NO_INSTRUCTIONS),
            summary_html: non_empty(info.summary).unwrap_or_else(|| NO_SUMMARY.to_string()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// Whole numbers print without a fraction ("4", not "4.0").
fn count_or_na(value: Option<f64>) -> String {
    match value {
        Some(n) if n > 0.0 => n.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn or_placeholder(items: Vec<String>, placeholder: &str) -> Vec<String> {
    if items.is_empty() {
        vec![placeholder.to_string()]
    } else {
        items
    }
}

/// What the UI should currently show. Exactly one state at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DisplayResult {
    #[default]
    Idle,
    Loading,
    Empty,
    Error(String),
    Loaded(RecipeDetail),
}

impl DisplayResult {
    /// True for the states a search ends in.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DisplayResult::Empty | DisplayResult::Error(_) | DisplayResult::Loaded(_)
        )
    }
}
