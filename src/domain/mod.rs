pub mod feed;
pub mod item;
pub mod post;
pub mod summary;

pub use feed::{Dialect, FeedSource, FeedsConfig};
pub use item::FeedItem;
pub use post::PostRecord;
pub use summary::narrative_summary;
