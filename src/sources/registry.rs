use std::fs;
use std::path::Path;

use rand::Rng;
use url::Url;

use crate::domain::{FeedSource, FeedsConfig};
use crate::errors::{ShipyardError, ShipyardResult};

/// Which configured source a run should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    First,
    Index(usize),
    Random,
}

/// Configured feed sources, loaded once per invocation.
#[derive(Debug, Clone)]
pub struct FeedRegistry {
    sources: Vec<FeedSource>,
}

impl FeedRegistry {
    pub fn new(sources: Vec<FeedSource>) -> Self {
        Self { sources }
    }

    /// Load sources from a JSON file shaped like `{ "feeds": [{ "name", "url" }] }`
    pub fn load<P: AsRef<Path>>(path: P) -> ShipyardResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ShipyardError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> ShipyardResult<Self> {
        let config: FeedsConfig = serde_json::from_str(content)?;

        for source in &config.feeds {
            validate_url(&source.url)?;
        }

        Ok(Self::new(config.feeds))
    }

    pub fn sources(&self) -> &[FeedSource] {
        &self.sources
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Pick a source. An out-of-range index falls back to the first source.
    pub fn select(&self, selection: Selection) -> ShipyardResult<&FeedSource> {
        if self.sources.is_empty() {
            return Err(ShipyardError::NoFeedsConfigured);
        }

        let index = match selection {
            Selection::Index(i) if i < self.sources.len() => i,
            Selection::Index(i) => {
                tracing::warn!(index = i, available = self.sources.len(), "feed index out of range, using first feed");
                0
            }
            Selection::Random => rand::thread_rng().gen_range(0..self.sources.len()),
            Selection::First => 0,
        };

        let source = &self.sources[index];
        tracing::info!(index, name = %source.name, url = %source.url, "selected feed");
        Ok(source)
    }
}

fn validate_url(url: &str) -> ShipyardResult<()> {
    let parsed = Url::parse(url).map_err(|e| ShipyardError::InvalidUrl(format!("{}: {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ShipyardError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            url, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FEEDS_JSON: &str = r#"{
        "feeds": [
            { "name": "Boat International", "url": "https://example.com/boat.xml" },
            { "name": "Megayacht News", "url": "https://example.com/mega.xml" },
            { "name": "Robb Report", "url": "https://example.com/robb.xml" }
        ]
    }"#;

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(FEEDS_JSON.as_bytes()).unwrap();

        let registry = FeedRegistry::load(file.path()).unwrap();
        assert_eq!(registry.sources().len(), 3);
        assert_eq!(registry.sources()[1].name, "Megayacht News");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = FeedRegistry::load("/definitely/not/here/rss-feeds.json");
        assert!(matches!(result, Err(ShipyardError::Config(_))));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let json = r#"{"feeds":[{"name":"Bad","url":"not a url"}]}"#;
        assert!(matches!(
            FeedRegistry::from_json(json),
            Err(ShipyardError::InvalidUrl(_))
        ));

        let json = r#"{"feeds":[{"name":"Ftp","url":"ftp://example.com/feed"}]}"#;
        assert!(matches!(
            FeedRegistry::from_json(json),
            Err(ShipyardError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_select_from_empty_registry() {
        let registry = FeedRegistry::from_json(r#"{"feeds":[]}"#).unwrap();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.select(Selection::First),
            Err(ShipyardError::NoFeedsConfigured)
        ));
    }

    #[test]
    fn test_select_index_and_fallback() {
        let registry = FeedRegistry::from_json(FEEDS_JSON).unwrap();

        assert_eq!(registry.select(Selection::Index(2)).unwrap().name, "Robb Report");
        assert_eq!(
            registry.select(Selection::Index(99)).unwrap().name,
            "Boat International"
        );
        assert_eq!(
            registry.select(Selection::First).unwrap().name,
            "Boat International"
        );
    }

    #[test]
    fn test_select_random_stays_in_range() {
        let registry = FeedRegistry::from_json(FEEDS_JSON).unwrap();
        for _ in 0..20 {
            let source = registry.select(Selection::Random).unwrap();
            assert!(registry.sources().contains(source));
        }
    }
}
