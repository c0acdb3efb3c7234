use std::path::PathBuf;

use chrono::Local;

use crate::domain::summary::MAX_SUMMARY_ITEMS;
use crate::domain::PostRecord;
use crate::errors::{ShipyardError, ShipyardResult};
use crate::services::materialize_service::MaterializeService;
use crate::services::site_service::{RebuildReport, SiteService};
use crate::sources::parser::parse_feed;
use crate::sources::registry::{FeedRegistry, Selection};
use crate::sources::traits::FeedFetcher;
use crate::storage::fs::ContentDir;
use crate::storage::traits::PostRepository;

/// Status of one pipeline invocation, as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub success: bool,
    pub message: String,
    pub filename: Option<String>,
}

impl RunOutcome {
    fn succeeded(record: &PostRecord, feed_name: &str) -> Self {
        Self {
            success: true,
            message: format!("Generated {} from {}", record.filename, feed_name),
            filename: Some(record.filename.clone()),
        }
    }

    fn failed(error: &ShipyardError) -> Self {
        Self {
            success: false,
            message: error.full_message(),
            filename: None,
        }
    }
}

/// fetch → parse → materialize → rebuild indexes → rebuild feed
pub struct PipelineService<F: FeedFetcher, R: PostRepository> {
    feeds_config: PathBuf,
    fetcher: F,
    materializer: MaterializeService<R>,
    site: SiteService,
}

impl<F: FeedFetcher, R: PostRepository> PipelineService<F, R> {
    pub fn new(
        feeds_config: impl Into<PathBuf>,
        fetcher: F,
        repository: R,
        dir: ContentDir,
        base_url: &str,
    ) -> Self {
        Self {
            feeds_config: feeds_config.into(),
            fetcher,
            materializer: MaterializeService::new(repository, base_url),
            site: SiteService::new(dir, base_url),
        }
    }

    /// Build a post from up to three items of the selected feed.
    pub fn run(&self, selection: Selection) -> RunOutcome {
        self.outcome(selection, MAX_SUMMARY_ITEMS)
    }

    /// Build a post from the first item of the selected feed only.
    pub fn inject(&self, selection: Selection) -> RunOutcome {
        self.outcome(selection, 1)
    }

    /// Regenerate index pages and the syndication feed from the posts on disk.
    pub fn rebuild(&self) -> ShipyardResult<RebuildReport> {
        self.site.rebuild(self.materializer.repository())
    }

    fn outcome(&self, selection: Selection, limit: usize) -> RunOutcome {
        match self.execute(selection, limit) {
            Ok((record, feed_name)) => RunOutcome::succeeded(&record, &feed_name),
            Err(e) => {
                tracing::warn!("run aborted: {}", e.full_message());
                RunOutcome::failed(&e)
            }
        }
    }

    /// Nothing is written until the feed has produced at least one item.
    fn execute(&self, selection: Selection, limit: usize) -> ShipyardResult<(PostRecord, String)> {
        let registry = FeedRegistry::load(&self.feeds_config)?;
        let source = registry.select(selection)?;

        let text = self.fetcher.fetch(&source.url)?;
        let items = parse_feed(&text);
        tracing::info!(feed = %source.name, items = items.len(), "feed parsed");

        if items.is_empty() {
            return Err(ShipyardError::EmptyFeed(source.name.clone()));
        }

        let items = &items[..items.len().min(limit)];
        let record = self.materializer.materialize(items, &source.name, Local::now())?;
        let report = self.rebuild()?;
        tracing::info!(
            filename = %record.filename,
            posts = report.posts,
            pages = report.index.pages,
            "run complete"
        );

        Ok((record, source.name.clone()))
    }
}
