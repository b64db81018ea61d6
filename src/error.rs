// ============================================================================
// File: src/error.rs
// Error types for the transport and the search pipeline
// ============================================================================

use std::fmt;

use thiserror::Error;

/// Transport-level failure: the request never produced a usable response.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Invalid response encoding: {0}")]
    InvalidEncoding(String),
}

/// Which of the two upstream calls failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Search,
    Detail,
}

impl Stage {
    fn failure_prefix(&self) -> &'static str {
        match self {
            Stage::Search => "Search failed",
            Stage::Detail => "Could not fetch recipe details",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Search => write!(f, "search"),
            Stage::Detail => write!(f, "detail"),
        }
    }
}

/// Everything that can stop a search before a recipe is loaded.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("API key is missing")]
    Configuration,

    #[error("{}: {} ({})", .stage.failure_prefix(), .status_text, .status)]
    UpstreamHttp {
        stage: Stage,
        status: u16,
        status_text: String,
    },

    #[error("{0}")]
    UpstreamParse(String),

    #[error("{0}")]
    Network(String),
}

impl SearchError {
    /// Message shown to the user in place of a recipe.
    ///
    /// Transport and parse failures get a hint to retry; configuration and
    /// HTTP status failures are shown as-is.
    pub fn user_message(&self) -> String {
        match self {
            SearchError::Configuration | SearchError::UpstreamHttp { .. } => self.to_string(),
            SearchError::UpstreamParse(_) | SearchError::Network(_) => {
                format!("{}. Please try again later.", self)
            }
        }
    }
}

impl From<FetchError> for SearchError {
    fn from(err: FetchError) -> Self {
        SearchError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::UpstreamParse(err.to_string())
    }
}
