use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShipyardError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No RSS feeds configured")]
    NoFeedsConfigured,

    // Feed errors
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),

    #[error("No items found in feed: {0}")]
    EmptyFeed(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for URL: {url}")]
    HttpStatus { status: u16, url: String },

    // Parsing errors
    #[error("Feed parsing failed: {0}")]
    FeedParse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // User input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ShipyardError {
    /// The error followed by every underlying cause, joined with `: `.
    ///
    /// Causes whose text already appears in the message are skipped, since
    /// `#[from]` variants print their source inline.
    pub fn full_message(&self) -> String {
        let mut message = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            let text = err.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            cause = err.source();
        }
        message
    }
}

pub type ShipyardResult<T> = Result<T, ShipyardError>;
