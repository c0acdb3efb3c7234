//! Static documents written to the content and preview directories.

pub mod html;
pub mod index_page;
pub mod post_page;
pub mod preview_page;
pub mod rss_feed;

pub use index_page::{page_count, page_filename, page_links, PageLinks, PAGE_SIZE};
pub use rss_feed::{FEED_FILE, MAX_FEED_ITEMS};
