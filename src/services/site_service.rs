use crate::errors::ShipyardResult;
use crate::services::index_service::{IndexReport, IndexService};
use crate::services::publish_service::PublishService;
use crate::storage::fs::ContentDir;
use crate::storage::traits::PostRepository;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebuildReport {
    pub posts: usize,
    pub index: IndexReport,
    pub feed_entries: usize,
}

/// Regenerates the listing pages and `rss.xml` from stored posts. Needs no
/// network access.
pub struct SiteService {
    indexer: IndexService,
    publisher: PublishService,
}

impl SiteService {
    pub fn new(dir: ContentDir, base_url: &str) -> Self {
        Self {
            indexer: IndexService::new(dir.clone()),
            publisher: PublishService::new(dir, base_url),
        }
    }

    pub fn rebuild<R: PostRepository>(&self, repository: &R) -> ShipyardResult<RebuildReport> {
        let posts = repository.get_all()?;
        let index = self.indexer.rebuild(&posts)?;
        let feed_entries = self.publisher.publish(&posts)?;

        Ok(RebuildReport {
            posts: posts.len(),
            index,
            feed_entries,
        })
    }
}
