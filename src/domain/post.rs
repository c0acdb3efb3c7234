use std::sync::OnceLock;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::FeedItem;

pub const POST_PREFIX: &str = "rss-post-";
pub const POST_SUFFIX: &str = ".html";
pub const SLUG_MAX_CHARS: usize = 80;

/// Manifest entry for one materialized post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub filename: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub feed_name: Option<String>,
    #[serde(default)]
    pub first_title: Option<String>,
    #[serde(default)]
    pub item_count: usize,
}

impl PostRecord {
    pub fn new(filename: String, created_at: DateTime<Utc>) -> Self {
        Self {
            filename,
            created_at,
            feed_name: None,
            first_title: None,
            item_count: 0,
        }
    }

    pub fn with_feed_name(mut self, feed_name: Option<String>) -> Self {
        self.feed_name = feed_name;
        self
    }

    pub fn with_first_title(mut self, first_title: Option<String>) -> Self {
        self.first_title = first_title.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_item_count(mut self, item_count: usize) -> Self {
        self.item_count = item_count;
        self
    }

    /// Anchor text used by index pages and the syndication feed
    pub fn display_title(&self) -> String {
        match &self.first_title {
            Some(title) => format!("{} | Maritime News", title),
            None => format!(
                "Maritime News - {}",
                self.created_at.with_timezone(&Local).format("%b %-d, %Y")
            ),
        }
    }
}

/// Newest first; equal timestamps fall back to filename so ordering is stable.
pub fn sort_newest_first(posts: &mut [PostRecord]) {
    posts.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.filename.cmp(&a.filename))
    });
}

pub fn is_post_filename(name: &str) -> bool {
    name.starts_with(POST_PREFIX) && name.ends_with(POST_SUFFIX)
}

fn non_slug_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9\s-]").expect("valid slug pattern"))
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"))
}

fn hyphens_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-+").expect("valid hyphen pattern"))
}

fn timestamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-(\d{8})-(\d{4})\.html$").expect("valid timestamp pattern"))
}

/// URL-safe slug of a title, at most 80 characters. May be empty.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let cleaned = non_slug_regex().replace_all(&lowered, "");
    let hyphenated = whitespace_regex().replace_all(&cleaned, "-");
    let collapsed = hyphens_regex().replace_all(&hyphenated, "-");
    let trimmed = collapsed.trim_matches('-');

    let slug: String = trimmed.chars().take(SLUG_MAX_CHARS).collect();
    slug
}

/// `rss-post-<slug>-<YYYYMMDD>-<HHMM>.html`, or timestamp-only without a usable title.
pub fn post_filename(items: &[FeedItem], now: DateTime<Local>) -> String {
    let timestamp = now.format("%Y%m%d-%H%M");

    let slug = items.first().map(|item| slugify(&item.title)).unwrap_or_default();

    if slug.is_empty() {
        format!("{}{}{}", POST_PREFIX, timestamp, POST_SUFFIX)
    } else {
        format!("{}{}-{}{}", POST_PREFIX, slug, timestamp, POST_SUFFIX)
    }
}

/// Recover the creation time encoded in a post filename, interpreted as local time.
pub fn timestamp_from_filename(name: &str) -> Option<DateTime<Utc>> {
    let caps = timestamp_regex().captures(name)?;
    let raw = format!("{}{}", &caps[1], &caps[2]);
    let naive = NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M").ok()?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
