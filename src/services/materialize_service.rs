use chrono::{DateTime, Local, Utc};

use crate::domain::post::post_filename;
use crate::domain::summary::MAX_SUMMARY_ITEMS;
use crate::domain::{FeedItem, PostRecord};
use crate::errors::{ShipyardError, ShipyardResult};
use crate::render::post_page;
use crate::storage::traits::PostRepository;

/// Turns parsed items into one named static post and stores it.
pub struct MaterializeService<R: PostRepository> {
    repository: R,
    base_url: String,
}

impl<R: PostRepository> MaterializeService<R> {
    pub fn new(repository: R, base_url: impl Into<String>) -> Self {
        Self {
            repository,
            base_url: base_url.into(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Render the first three items as a post named after the first title and
    /// `now`, then persist it. A post from the same minute with the same slug
    /// is overwritten.
    pub fn materialize(
        &self,
        items: &[FeedItem],
        feed_name: &str,
        now: DateTime<Local>,
    ) -> ShipyardResult<PostRecord> {
        if items.is_empty() {
            return Err(ShipyardError::EmptyFeed(feed_name.to_string()));
        }

        let shown = &items[..items.len().min(MAX_SUMMARY_ITEMS)];
        let filename = post_filename(shown, now);
        let html = post_page::render(shown, feed_name, &filename, &self.base_url, now);

        let record = PostRecord::new(filename, now.with_timezone(&Utc))
            .with_feed_name(Some(feed_name.to_string()))
            .with_first_title(Some(shown[0].title.clone()))
            .with_item_count(shown.len());

        self.repository.add(&record, &html)?;
        Ok(record)
    }
}
