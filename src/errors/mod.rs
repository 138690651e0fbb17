use thiserror::Error;

#[derive(Error, Debug)]
pub enum CircliteError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // Parsing errors
    #[error("Feed payload malformed: {0}")]
    FeedParse(#[from] serde_json::Error),

    /// Both the cache and the network failed to produce a feed.
    /// Non-fatal: the UI surfaces it on the load-more affordance.
    #[error("failed to load friend-circle feed")]
    FetchFailed,

    // Storage errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    // User input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type CircliteResult<T> = Result<T, CircliteError>;
