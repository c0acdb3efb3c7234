use feed_rs::parser;

use crate::domain::Dialect;
use crate::errors::{ShipyardError, ShipyardResult};
use crate::sources::http::HttpFetcher;
use crate::sources::parser::{detect_dialect, parse_feed};

/// What a feed reports about itself, used to verify configured sources.
#[derive(Debug, Clone)]
pub struct FeedMetadata {
    pub title: String,
    pub format: String,
    pub description: Option<String>,
    pub entry_count: usize,
    /// Dialect and item count as seen by the page pipeline's own parser
    pub dialect: Dialect,
    pub extracted_items: usize,
}

impl FeedMetadata {
    /// Whether both parsers agree on how many entries the feed carries
    pub fn is_consistent(&self) -> bool {
        self.entry_count == self.extracted_items
    }
}

/// Inspect raw feed bytes with a full feed parser.
pub fn inspect_bytes(bytes: &[u8]) -> ShipyardResult<FeedMetadata> {
    let feed = parser::parse(bytes).map_err(|e| ShipyardError::FeedParse(e.to_string()))?;

    let format = match feed.feed_type {
        feed_rs::model::FeedType::Atom => "atom",
        feed_rs::model::FeedType::JSON => "json",
        feed_rs::model::FeedType::RSS0 => "rss 0.9",
        feed_rs::model::FeedType::RSS1 => "rss 1.0",
        feed_rs::model::FeedType::RSS2 => "rss 2.0",
    }
    .to_string();

    let text = String::from_utf8_lossy(bytes);

    Ok(FeedMetadata {
        title: feed
            .title
            .map(|t| t.content)
            .unwrap_or_else(|| "Untitled Feed".to_string()),
        format,
        description: feed.description.map(|d| d.content),
        entry_count: feed.entries.len(),
        dialect: detect_dialect(&text),
        extracted_items: parse_feed(&text).len(),
    })
}

/// Fetch a source and inspect it
pub fn inspect(fetcher: &HttpFetcher, url: &str) -> ShipyardResult<FeedMetadata> {
    let bytes = fetcher.fetch_bytes(url)?;
    inspect_bytes(&bytes)
}
