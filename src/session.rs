// ============================================================================
// File: src/session.rs
// Holds the current display state and renders it to the terminal
// ============================================================================

use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::API_KEY_ENV;
use crate::error::SearchError;
use crate::models::{DisplayResult, RecipeDetail, SearchFilters};
use crate::search_client::SearchController;

/// Receives every display state change.
pub trait Renderer {
    fn render(&mut self, result: &DisplayResult);
}

/// The UI side of a search: one result slot, one trigger.
pub struct SearchSession<R: Renderer> {
    controller: SearchController,
    renderer: R,
    current: DisplayResult,
}

impl<R: Renderer> SearchSession<R> {
    pub fn new(controller: SearchController, renderer: R) -> Self {
        Self {
            controller,
            renderer,
            current: DisplayResult::Idle,
        }
    }

    /// Run a search, rendering each state as it replaces the current one.
    pub async fn submit(&mut self, filters: &SearchFilters) -> &DisplayResult {
        let Self {
            controller,
            renderer,
            current,
        } = self;

        controller
            .search_with_updates(filters, |result| {
                *current = result.clone();
                renderer.render(result);
            })
            .await;

        debug_assert!(self.current.is_terminal());
        &self.current
    }

    pub fn current(&self) -> &DisplayResult {
        &self.current
    }

    #[cfg(test)]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

/// Prints results to stdout, with a spinner while a search is in flight.
#[derive(Default)]
pub struct TerminalRenderer {
    spinner: Option<ProgressBar>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn start_spinner(&mut self) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Searching...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, result: &DisplayResult) {
        if matches!(result, DisplayResult::Loading) {
            self.start_spinner();
            return;
        }

        self.stop_spinner();
        if let Some(text) = format_result(result) {
            println!("{}", text);
        }
    }
}

/// Terminal text for a state, or `None` when there is nothing to show.
pub fn format_result(result: &DisplayResult) -> Option<String> {
    match result {
        DisplayResult::Idle => None,
        DisplayResult::Loading => Some("Searching...".to_string()),
        DisplayResult::Empty => Some(format!(
            "{} No recipes found. Please try a different search.",
            "ℹ".blue().bold()
        )),
        DisplayResult::Error(message) => {
            let mut text = format!("{} {}", "Error:".red().bold(), message.red());
            if *message == SearchError::Configuration.to_string() {
                text.push_str(&format!(
                    "\n  Set {} in your environment or config file.",
                    API_KEY_ENV.bright_cyan()
                ));
            }
            Some(text)
        }
        DisplayResult::Loaded(recipe) => Some(format_recipe(recipe)),
    }
}

fn format_recipe(recipe: &RecipeDetail) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", recipe.title.bright_white().bold()));
    out.push_str(&format!("{}\n", "─".repeat(40).bright_black()));
    out.push_str(&format!("{}\n", recipe.image_url.bright_cyan()));
    out.push_str(&format!(
        "Ready In: {} mins | Servings: {}\n",
        recipe.ready_in_minutes, recipe.servings
    ));

    out.push_str(&format!("\n{}\n", "Ingredients:".green().bold()));
    for ingredient in &recipe.ingredients {
        out.push_str(&format!("  • {}\n", ingredient));
    }

    out.push_str(&format!("\n{}\n", "Summary:".green().bold()));
    out.push_str(&format!("{}\n", recipe.summary_html));

    out.push_str(&format!("\n{}\n", "Steps:".green().bold()));
    for (i, step) in recipe.steps.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, step));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::http_client::MockClient;
    use crate::models::DietPreference;
    use serde_json::json;
    use std::sync::Arc;

    const SEARCH_URL: &str = "http://recipes.test/recipes/complexSearch";
    const DETAIL_9: &str = "http://recipes.test/recipes/9/information";

    #[derive(Default)]
    struct RecordingRenderer {
        seen: Vec<DisplayResult>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, result: &DisplayResult) {
            self.seen.push(result.clone());
        }
    }

    fn new_session(mock: MockClient, api_key: Option<&str>) -> SearchSession<RecordingRenderer> {
        let config = Config {
            api_key: api_key.map(str::to_string),
            base_url: "http://recipes.test".to_string(),
            ..Config::default()
        };
        let controller = SearchController::new(Arc::new(mock), &config);
        SearchSession::new(controller, RecordingRenderer::default())
    }

    fn sample_recipe() -> RecipeDetail {
        RecipeDetail {
            title: "Pad Thai".to_string(),
            image_url: "https://img.test/pad-thai.jpg".to_string(),
            ready_in_minutes: "30".to_string(),
            servings: "2".to_string(),
            ingredients: vec!["rice noodles".to_string(), "peanuts".to_string()],
            steps: vec!["Soak the noodles.".to_string(), "Stir-fry.".to_string()],
            summary_html: "Sweet, sour and <i>salty</i>.".to_string(),
        }
    }

    #[test]
    fn starts_idle() {
        let session = new_session(MockClient::new(), Some("k"));
        assert_eq!(session.current(), &DisplayResult::Idle);
        assert!(session.renderer().seen.is_empty());
    }

    #[tokio::test]
    async fn submit_renders_each_transition() {
        let mock = MockClient::new().with_json(SEARCH_URL, json!({ "results": [] }));
        let mut session = new_session(mock, Some("k"));

        let filters = SearchFilters::new(Some("durian"), None, DietPreference::Any);
        let result = session.submit(&filters).await.clone();

        assert_eq!(result, DisplayResult::Empty);
        assert_eq!(
            session.renderer().seen,
            vec![DisplayResult::Loading, DisplayResult::Empty]
        );
    }

    #[tokio::test]
    async fn later_search_replaces_earlier_result() {
        let mock = MockClient::new()
            .with_json(SEARCH_URL, json!({ "results": [{ "id": 9 }] }))
            .with_json(DETAIL_9, json!({ "title": "Pho" }));
        let mut session = new_session(mock, Some("k"));

        session.submit(&SearchFilters::default()).await;
        assert!(matches!(session.current(), DisplayResult::Loaded(r) if r.title == "Pho"));

        session.submit(&SearchFilters::default()).await;
        assert_eq!(session.renderer().seen.len(), 4);
        assert_eq!(session.renderer().seen[2], DisplayResult::Loading);
    }

    #[tokio::test]
    async fn missing_key_is_rendered_not_raised() {
        let mut session = new_session(MockClient::new(), None);

        let result = session.submit(&SearchFilters::default()).await;

        assert_eq!(result, &DisplayResult::Error("API key is missing".to_string()));
    }

    #[test]
    fn idle_renders_nothing() {
        assert!(format_result(&DisplayResult::Idle).is_none());
    }

    #[test]
    fn missing_key_error_explains_fix() {
        let text = format_result(&DisplayResult::Error("API key is missing".to_string())).unwrap();
        assert!(text.contains("API key is missing"));
        assert!(text.contains(API_KEY_ENV));

        let text = format_result(&DisplayResult::Error("Search failed: (500)".to_string())).unwrap();
        assert!(!text.contains(API_KEY_ENV));
    }

    #[test]
    fn recipe_card_lists_everything_in_order() {
        let text = format_result(&DisplayResult::Loaded(sample_recipe())).unwrap();

        assert!(text.contains("Pad Thai"));
        assert!(text.contains("Ready In: 30 mins | Servings: 2"));
        assert!(text.contains("• rice noodles"));
        assert!(text.contains("Sweet, sour and <i>salty</i>."));
        assert!(text.contains("1. Soak the noodles."));
        assert!(text.contains("2. Stir-fry."));
        assert!(text.find("rice noodles").unwrap() < text.find("Soak the noodles").unwrap());
    }
}
