use std::path::PathBuf;

use crate::errors::{ShipyardError, ShipyardResult};
use crate::render::preview_page::{self, PREVIEW_FILE};
use crate::sources::parser::parse_feed;
use crate::sources::registry::{FeedRegistry, Selection};
use crate::sources::traits::FeedFetcher;
use crate::storage::fs::ContentDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewReport {
    pub path: PathBuf,
    pub feed_name: String,
    pub total_items: usize,
    pub shown_items: usize,
}

/// Writes a diagnostic page for the first configured feed.
pub struct PreviewService<F: FeedFetcher> {
    feeds_config: PathBuf,
    fetcher: F,
    dir: ContentDir,
}

impl<F: FeedFetcher> PreviewService<F> {
    pub fn new(feeds_config: impl Into<PathBuf>, fetcher: F, dir: ContentDir) -> Self {
        Self {
            feeds_config: feeds_config.into(),
            fetcher,
            dir,
        }
    }

    pub fn preview(&self, max_items: usize) -> ShipyardResult<PreviewReport> {
        if max_items == 0 {
            return Err(ShipyardError::InvalidInput(
                "max items must be at least 1".to_string(),
            ));
        }

        let registry = FeedRegistry::load(&self.feeds_config)?;
        let source = registry.select(Selection::First)?;

        let text = self.fetcher.fetch(&source.url)?;
        let items = parse_feed(&text);
        if items.is_empty() {
            return Err(ShipyardError::EmptyFeed(source.name.clone()));
        }

        for (i, item) in items.iter().take(max_items).enumerate() {
            tracing::info!(
                position = i + 1,
                title = %item.title,
                image = item.image.is_some(),
                "preview item"
            );
        }

        let html = preview_page::render(&items, &source.name, max_items);
        self.dir.write(PREVIEW_FILE, &html)?;

        Ok(PreviewReport {
            path: self.dir.path(PREVIEW_FILE),
            feed_name: source.name.clone(),
            total_items: items.len(),
            shown_items: items.len().min(max_items),
        })
    }
}
