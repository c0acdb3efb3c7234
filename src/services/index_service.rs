use crate::domain::PostRecord;
use crate::errors::ShipyardResult;
use crate::render::index_page::{self, page_count, page_filename, page_number, PAGE_SIZE};
use crate::storage::fs::ContentDir;

/// What one index rebuild wrote and removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexReport {
    pub pages: usize,
    pub removed: Vec<String>,
}

/// Regenerates the paginated listing pages of the content directory.
pub struct IndexService {
    dir: ContentDir,
}

impl IndexService {
    pub fn new(dir: ContentDir) -> Self {
        Self { dir }
    }

    /// Write `ceil(N/20)` pages for `posts` (newest first) and delete listing
    /// pages numbered beyond that.
    ///
    /// The one exception is an empty post set: `ceil(0/20)` is zero, but a
    /// single empty-state `index.html` is still written so the section has a
    /// landing page, and the report counts it as one page.
    pub fn rebuild(&self, posts: &[PostRecord]) -> ShipyardResult<IndexReport> {
        let total_pages = page_count(posts.len());
        let removed = self.prune(total_pages.max(1))?;

        if posts.is_empty() {
            self.dir.write(&page_filename(1), &index_page::render_empty())?;
            tracing::info!("no posts yet, wrote empty index");
            return Ok(IndexReport { pages: 1, removed });
        }

        for (i, chunk) in posts.chunks(PAGE_SIZE).enumerate() {
            let page = i + 1;
            let html = index_page::render(chunk, page, total_pages, posts.len());
            self.dir.write(&page_filename(page), &html)?;
        }

        tracing::info!(pages = total_pages, posts = posts.len(), "index pages rebuilt");
        Ok(IndexReport {
            pages: total_pages,
            removed,
        })
    }

    fn prune(&self, keep: usize) -> ShipyardResult<Vec<String>> {
        let mut removed = Vec::new();

        for name in self.dir.file_names()? {
            match page_number(&name) {
                Some(n) if n > keep => {
                    if self.dir.remove(&name)? {
                        tracing::info!(file = %name, "removed stale index page");
                        removed.push(name);
                    }
                }
                _ => {}
            }
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn posts(n: usize) -> Vec<PostRecord> {
        let base = Utc::now();
        (0..n)
            .map(|i| {
                PostRecord::new(
                    format!("rss-post-story-{:03}-20250101-0900.html", i),
                    base - Duration::minutes(i as i64),
                )
                .with_first_title(Some(format!("Story {}", i)))
            })
            .collect()
    }

    fn index_files(dir: &ContentDir) -> Vec<String> {
        dir.file_names()
            .unwrap()
            .into_iter()
            .filter(|n| page_number(n).is_some())
            .collect()
    }

    #[test]
    fn test_forty_one_posts_make_three_pages() {
        let temp = TempDir::new().unwrap();
        let dir = ContentDir::new(temp.path());
        let service = IndexService::new(dir.clone());

        let report = service.rebuild(&posts(41)).unwrap();
        assert_eq!(report.pages, 3);
        assert_eq!(
            index_files(&dir),
            vec!["index-page-2.html", "index-page-3.html", "index.html"]
        );

        let first = dir.read("index.html").unwrap().unwrap();
        assert!(!first.contains(r#"rel="prev""#));
        assert!(first.contains(r#"href="/rsscontent/index-page-2.html" rel="next""#));
        assert_eq!(first.matches("View Articles").count(), 20);
        assert!(first.contains("Story 0 | Maritime News"));

        let last = dir.read("index-page-3.html").unwrap().unwrap();
        assert!(!last.contains(r#"rel="next""#));
        assert!(last.contains(r#"href="/rsscontent/index-page-2.html" rel="prev""#));
        assert_eq!(last.matches("View Articles").count(), 1);
        assert!(last.contains("Story 40 | Maritime News"));
    }

    #[test]
    fn test_rebuild_prunes_stale_pages() {
        let temp = TempDir::new().unwrap();
        let dir = ContentDir::new(temp.path());
        let service = IndexService::new(dir.clone());

        service.rebuild(&posts(45)).unwrap();
        assert_eq!(index_files(&dir).len(), 3);

        let report = service.rebuild(&posts(15)).unwrap();
        assert_eq!(report.pages, 1);
        assert_eq!(report.removed, vec!["index-page-2.html", "index-page-3.html"]);
        assert_eq!(index_files(&dir), vec!["index.html"]);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let dir = ContentDir::new(temp.path());
        let service = IndexService::new(dir.clone());
        let posts = posts(25);

        service.rebuild(&posts).unwrap();
        let first = (
            dir.read("index.html").unwrap(),
            dir.read("index-page-2.html").unwrap(),
        );

        let report = service.rebuild(&posts).unwrap();
        let second = (
            dir.read("index.html").unwrap(),
            dir.read("index-page-2.html").unwrap(),
        );

        assert_eq!(report.pages, 2);
        assert!(report.removed.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_rebuild_without_posts_writes_empty_index() {
        let temp = TempDir::new().unwrap();
        let dir = ContentDir::new(temp.path());
        dir.write("index-page-2.html", "stale").unwrap();
        let service = IndexService::new(dir.clone());

        let report = service.rebuild(&[]).unwrap();

        assert_eq!(report.pages, 1);
        assert_eq!(report.removed, vec!["index-page-2.html"]);
        assert_eq!(index_files(&dir), vec!["index.html"]);
        assert!(dir
            .read("index.html")
            .unwrap()
            .unwrap()
            .contains("No RSS content generated yet."));
    }

    #[test]
    fn test_rebuild_leaves_other_files_alone() {
        let temp = TempDir::new().unwrap();
        let dir = ContentDir::new(temp.path());
        dir.write("rss-post-keep-20250101-0900.html", "post").unwrap();
        dir.write("index-page-notes.txt", "notes").unwrap();
        let service = IndexService::new(dir.clone());

        service.rebuild(&posts(1)).unwrap();

        assert!(dir.exists("rss-post-keep-20250101-0900.html"));
        assert!(dir.exists("index-page-notes.txt"));
    }
}
