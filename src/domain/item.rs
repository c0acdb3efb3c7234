use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum snippet length in characters, before the ellipsis.
pub const SNIPPET_MAX_CHARS: usize = 200;

/// One normalized entry extracted from an RSS item or Atom entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub published_date: Option<String>,
    pub image: Option<String>,
    pub snippet: Option<String>,
}

impl FeedItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Sets the description and derives the snippet from it.
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.snippet = description.as_deref().map(make_snippet);
        self.description = description;
        self
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    pub fn with_published_date(mut self, published_date: Option<String>) -> Self {
        self.published_date = published_date;
        self
    }

    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }

    /// Title and description lowercased, used for topic matching
    pub fn search_text(&self) -> String {
        format!(
            "{} {}",
            self.title,
            self.description.as_deref().unwrap_or_default()
        )
        .to_lowercase()
    }
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"))
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"))
}

/// Strip markup, collapse whitespace, cap at 200 characters and add an ellipsis.
pub fn make_snippet(description: &str) -> String {
    let stripped = tag_regex().replace_all(description, "");
    let collapsed = whitespace_regex().replace_all(&stripped, " ");
    let truncated: String = collapsed.trim().chars().take(SNIPPET_MAX_CHARS).collect();
    // Stray angle brackets from unterminated tags would leak markup into the card.
    let cleaned: String = truncated.chars().filter(|c| *c != '<' && *c != '>').collect();
    format!("{}...", cleaned)
}
