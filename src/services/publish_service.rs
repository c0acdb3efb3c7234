use crate::domain::PostRecord;
use crate::errors::ShipyardResult;
use crate::render::rss_feed::{self, FEED_FILE, MAX_FEED_ITEMS};
use crate::storage::fs::ContentDir;

/// Writes the `rss.xml` syndication feed.
pub struct PublishService {
    dir: ContentDir,
    base_url: String,
}

impl PublishService {
    pub fn new(dir: ContentDir, base_url: impl Into<String>) -> Self {
        Self {
            dir,
            base_url: base_url.into(),
        }
    }

    /// Regenerate the feed from `posts` (newest first). Returns the number of
    /// entries written.
    pub fn publish(&self, posts: &[PostRecord]) -> ShipyardResult<usize> {
        let xml = rss_feed::render(posts, &self.base_url);
        self.dir.write(FEED_FILE, &xml)?;

        let entries = posts.len().min(MAX_FEED_ITEMS);
        tracing::info!(entries, "syndication feed written");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use quick_xml::events::Event;
    use quick_xml::Reader;
    use tempfile::TempDir;

    #[test]
    fn test_publish_writes_escaped_well_formed_feed() {
        let temp = TempDir::new().unwrap();
        let dir = ContentDir::new(temp.path().join("rsscontent"));
        let service = PublishService::new(dir.clone(), "https://opulentshipyardmonaco.com");

        let posts = vec![PostRecord::new("rss-post-a-20250101-0900.html".into(), Utc::now())
            .with_first_title(Some("Refit & <Repair> \"Week\"".into()))];
        assert_eq!(service.publish(&posts).unwrap(), 1);

        let xml = dir.read(FEED_FILE).unwrap().unwrap();
        assert!(xml.contains("Refit &amp; &lt;Repair&gt; &quot;Week&quot;"));

        let mut reader = Reader::from_str(&xml);
        let mut items = 0;
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) if e.name().as_ref() == b"item" => items += 1,
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("feed is not well-formed: {}", e),
            }
        }
        assert_eq!(items, 1);
    }
}
