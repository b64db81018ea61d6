// ============================================================================
// File: src/search_client.rs
// Spoonacular search pipeline: search, then fetch details for the top match
// ============================================================================

use std::sync::Arc;

use rand::Rng;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{SearchError, Stage};
use crate::http_client::HttpClient;
use crate::models::{
    ComplexSearchResponse, DietPreference, DisplayResult, RecipeDetail, RecipeInformation,
    RecipeSummary, SearchFilters,
};

/// Upper bound (exclusive) of the random offset used for unfiltered searches.
pub const MAX_RANDOM_OFFSET: u32 = 900;

/// Plant proteins excluded to approximate a non-vegetarian search.
pub const NON_VEG_EXCLUSIONS: &str = "tofu, seitan, tempeh, lentils";

pub struct SearchController {
    client: Arc<dyn HttpClient>,
    api_key: Option<String>,
    base_url: String,
    placeholder_image: String,
}

impl SearchController {
    pub fn new(client: Arc<dyn HttpClient>, config: &Config) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            placeholder_image: config.placeholder_image.clone(),
        }
    }

    /// Run one search and return the state it ends in.
    pub async fn search(&self, filters: &SearchFilters) -> DisplayResult {
        self.search_with_updates(filters, |_| {}).await
    }

    /// Run one search, reporting `Loading` and then the final state to `on_change`.
    pub async fn search_with_updates<F>(&self, filters: &SearchFilters, mut on_change: F) -> DisplayResult
    where
        F: FnMut(&DisplayResult),
    {
        on_change(&DisplayResult::Loading);

        let result = match self.find_recipe(filters).await {
            Ok(Some(recipe)) => DisplayResult::Loaded(recipe),
            Ok(None) => DisplayResult::Empty,
            Err(e) => {
                info!("Recipe search failed: {}", e);
                DisplayResult::Error(e.user_message())
            }
        };

        on_change(&result);
        result
    }

    async fn find_recipe(&self, filters: &SearchFilters) -> Result<Option<RecipeDetail>, SearchError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(SearchError::Configuration)?;

        let Some(summary) = self.first_match(api_key, filters).await? else {
            info!("No recipes matched {:?}", filters);
            return Ok(None);
        };

        let information = self.fetch_information(api_key, summary.id).await?;
        Ok(Some(RecipeDetail::from_information(
            information,
            &self.placeholder_image,
        )))
    }

    async fn first_match(
        &self,
        api_key: &str,
        filters: &SearchFilters,
    ) -> Result<Option<RecipeSummary>, SearchError> {
        let url = format!("{}/recipes/complexSearch", self.base_url);
        let params = search_params(api_key, filters, &mut rand::rng());

        let response: ComplexSearchResponse = self.get_json(Stage::Search, &url, &params).await?;
        let results = response.results.unwrap_or_default();
        debug!("Search returned {} result(s)", results.len());

        Ok(results.into_iter().next())
    }

    async fn fetch_information(
        &self,
        api_key: &str,
        recipe_id: u64,
    ) -> Result<RecipeInformation, SearchError> {
        let url = format!("{}/recipes/{}/information", self.base_url, recipe_id);
        let params = vec![
            ("apiKey".to_string(), api_key.to_string()),
            ("includeNutrition".to_string(), "false".to_string()),
        ];

        self.get_json(Stage::Detail, &url, &params).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        stage: Stage,
        url: &str,
        params: &[(String, String)],
    ) -> Result<T, SearchError> {
        debug!("GET {} ({} stage)", url, stage);
        let response = self.client.get(url, params).await?;

        if !response.is_success() {
            return Err(SearchError::UpstreamHttp {
                stage,
                status: response.status,
                status_text: response.status_text,
            });
        }

        serde_json::from_str(&response.body).map_err(|e| {
            debug!(
                "Unparseable {} response (first 500 chars): {}",
                stage,
                response.body.chars().take(500).collect::<String>()
            );
            SearchError::from(e)
        })
    }
}

/// Query pairs for the complexSearch endpoint.
///
/// An unfiltered search gets a random offset so repeated "surprise me"
/// searches do not keep returning the same top recipe.
pub fn search_params<R: Rng>(
    api_key: &str,
    filters: &SearchFilters,
    rng: &mut R,
) -> Vec<(String, String)> {
    let mut params = vec![
        ("apiKey".to_string(), api_key.to_string()),
        ("number".to_string(), "1".to_string()),
    ];

    if filters.is_unconstrained() {
        let offset = rng.random_range(0..MAX_RANDOM_OFFSET);
        params.push(("offset".to_string(), offset.to_string()));
    }

    if let Some(query) = &filters.query {
        params.push(("query".to_string(), query.clone()));
    }
    if let Some(cuisine) = filters.cuisine {
        params.push(("cuisine".to_string(), cuisine.as_str().to_string()));
    }

    match filters.diet {
        DietPreference::Any => {}
        DietPreference::Vegetarian => {
            params.push(("diet".to_string(), "vegetarian".to_string()));
        }
        // Not a true diet filter; the free tier offers nothing stronger.
        DietPreference::NonVegetarian => {
            params.push((
                "excludeIngredients".to_string(),
                NON_VEG_EXCLUSIONS.to_string(),
            ));
        }
    }

    params
}
