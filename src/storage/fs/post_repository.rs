use std::collections::HashMap;

use chrono::{DateTime, Utc};
use scraper::{Html, Selector};

use crate::domain::post::{is_post_filename, sort_newest_first, timestamp_from_filename};
use crate::domain::PostRecord;
use crate::errors::ShipyardResult;
use crate::storage::fs::ContentDir;
use crate::storage::traits::PostRepository;

pub const MANIFEST_FILE: &str = "posts.jsonl";

/// Post files plus a JSON-lines manifest, one record per post.
pub struct FsPostRepository {
    dir: ContentDir,
}

impl FsPostRepository {
    pub fn new(dir: ContentDir) -> Self {
        Self { dir }
    }

    fn read_manifest(&self) -> ShipyardResult<Vec<PostRecord>> {
        let Some(contents) = self.dir.read(MANIFEST_FILE)? else {
            return Ok(Vec::new());
        };

        let mut records = Vec::new();
        for (line_no, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<PostRecord>(line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(line = line_no + 1, "skipping malformed manifest record: {}", e);
                }
            }
        }
        Ok(records)
    }

    fn write_manifest(&self, records: &[PostRecord]) -> ShipyardResult<()> {
        let mut out = String::new();
        for record in records {
            out.push_str(&serde_json::to_string(record)?);
            out.push('\n');
        }
        self.dir.write(MANIFEST_FILE, &out)
    }

    /// Rebuild a record for a post file the manifest does not know about
    fn recover(&self, filename: &str) -> ShipyardResult<PostRecord> {
        let created_at: DateTime<Utc> = timestamp_from_filename(filename).unwrap_or_else(|| {
            tracing::debug!(filename, "no timestamp in filename, ordering as oldest");
            DateTime::<Utc>::default()
        });

        let first_title = self
            .dir
            .read(filename)?
            .and_then(|html| first_heading(&html));

        Ok(PostRecord::new(filename.to_string(), created_at).with_first_title(first_title))
    }
}

impl PostRepository for FsPostRepository {
    fn add(&self, record: &PostRecord, html: &str) -> ShipyardResult<()> {
        self.dir.write(&record.filename, html)?;

        let mut records = self.read_manifest()?;
        // Same-minute runs share a filename; the newer record replaces the older one.
        records.retain(|r| r.filename != record.filename);
        records.push(record.clone());
        self.write_manifest(&records)?;

        tracing::info!(filename = %record.filename, "post written");
        Ok(())
    }

    fn get_all(&self) -> ShipyardResult<Vec<PostRecord>> {
        let mut manifest: HashMap<String, PostRecord> = self
            .read_manifest()?
            .into_iter()
            .map(|r| (r.filename.clone(), r))
            .collect();

        let mut posts = Vec::new();
        for name in self.dir.file_names()? {
            if !is_post_filename(&name) {
                continue;
            }
            let record = match manifest.remove(&name) {
                Some(record) => record,
                None => self.recover(&name)?,
            };
            posts.push(record);
        }

        sort_newest_first(&mut posts);
        Ok(posts)
    }
}

/// Text of the first `<h3>` in a post document
pub fn first_heading(html: &str) -> Option<String> {
    let selector = Selector::parse("h3").ok()?;
    let document = Html::parse_document(html);

    let heading = document.select(&selector).next()?;
    let text = heading.text().collect::<Vec<_>>().join(" ");
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
