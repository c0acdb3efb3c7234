use crate::domain::PostRecord;
use crate::errors::ShipyardResult;

#[cfg_attr(test, mockall::automock)]
pub trait PostRepository: Send + Sync {
    /// Write the post document and record it in the manifest
    fn add(&self, record: &PostRecord, html: &str) -> ShipyardResult<()>;
    /// Every post on disk, newest first
    fn get_all(&self) -> ShipyardResult<Vec<PostRecord>>;
}
