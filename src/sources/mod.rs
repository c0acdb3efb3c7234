pub mod traits;
pub mod http;
pub mod parser;
pub mod registry;
pub mod metadata;

pub use traits::FeedFetcher;
pub use http::HttpFetcher;
pub use parser::{parse_feed, FeedItems};
pub use registry::{FeedRegistry, Selection};
pub use metadata::FeedMetadata;
