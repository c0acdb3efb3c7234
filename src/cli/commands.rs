use clap::{Args, Parser, Subcommand};

use crate::sources::Selection;

#[derive(Parser)]
#[command(name = "shipyard")]
#[command(about = "RSS ingestion and static page generator for Opulent Shipyard Monaco")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Which configured feed to fetch
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct FeedChoice {
    /// Zero-based index into the configured feeds (out of range uses the first)
    #[arg(long, conflicts_with = "random")]
    pub feed: Option<usize>,

    /// Pick a configured feed at random
    #[arg(long)]
    pub random: bool,
}

impl FeedChoice {
    pub fn selection(&self) -> Selection {
        match (self.feed, self.random) {
            (Some(index), _) => Selection::Index(index),
            (None, true) => Selection::Random,
            (None, false) => Selection::First,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a feed, generate a post, then rebuild index pages and rss.xml
    Build {
        #[command(flatten)]
        choice: FeedChoice,
    },

    /// Generate a post from the first article of a feed (short timeout)
    Inject {
        #[command(flatten)]
        choice: FeedChoice,
    },

    /// Regenerate index pages and rss.xml from existing posts
    Rebuild,

    /// List configured feeds
    List,

    /// Fetch every configured feed and report what it contains
    Check,

    /// Write a diagnostic preview page for the first configured feed
    Preview {
        /// Number of articles to display
        #[arg(long, default_value_t = 3)]
        max_items: usize,
    },
}
