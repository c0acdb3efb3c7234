use crate::errors::ShipyardResult;

#[cfg_attr(test, mockall::automock)]
pub trait FeedFetcher: Send + Sync {
    /// Fetch the raw feed document at `url`
    fn fetch(&self, url: &str) -> ShipyardResult<String>;
}
