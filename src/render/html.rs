//! Shared HTML fragments and text helpers for generated pages.

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, Local};

pub const SITE_NAME: &str = "Opulent Shipyard Monaco";
pub const CONTENT_PATH: &str = "/rsscontent/";

const FONT_LINKS: &str = r#"    <link rel="preconnect" href="https://fonts.googleapis.com">
    <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
    <link href="https://fonts.googleapis.com/css2?family=Montserrat:wght@300;400;600&display=swap" rel="stylesheet">
    <script src="https://cdn.tailwindcss.com"></script>"#;

const BASE_STYLE: &str = r#"    <style>
        body {
            font-family: 'Montserrat', sans-serif;
            background-color: #F8F8F8;
        }
        .yacht-card {
            background: linear-gradient(145deg, #ffffff, #f8f8f8);
            box-shadow: 6px 6px 12px rgba(0, 0, 0, 0.1), -6px -6px 12px rgba(255, 255, 255, 0.5);
            border: 1px solid rgba(220, 220, 220, 0.3);
        }
    </style>"#;

/// Escape `& < > " '` for text and attribute positions alike.
pub fn escape(s: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(s)
}

/// Site-relative URL of a file in the content directory
pub fn content_url(filename: &str) -> String {
    format!("{}{}", CONTENT_PATH, filename)
}

/// Absolute URL of a file in the content directory
pub fn absolute_content_url(base_url: &str, filename: &str) -> String {
    format!("{}{}{}", base_url.trim_end_matches('/'), CONTENT_PATH, filename)
}

fn parse_item_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}

/// Short local date for a feed item's publish date.
///
/// Feeds publish RFC 2822 (RSS) or RFC 3339 (Atom) dates; anything else is
/// shown as given.
pub fn format_item_date(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => "Unknown date".to_string(),
        Some(raw) => match parse_item_date(raw) {
            Some(date) => date.with_timezone(&Local).format("%-m/%-d/%Y").to_string(),
            None => raw.to_string(),
        },
    }
}

/// `<head>` contents shared by every generated page. `title` and
/// `description` must already be escaped.
pub fn page_head(title: &str, description: &str, extra: &str) -> String {
    format!(
        r#"<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="description" content="{description}">
{extra}
{FONT_LINKS}
{BASE_STYLE}
</head>"#
    )
}

pub fn site_header() -> String {
    format!(
        r#"    <header class="w-full py-4 px-6 flex justify-between items-center bg-white shadow-sm">
        <div class="flex items-center">
            <img src="https://placehold.co/40x40/000000/FFFFFF?text=OSM" alt="{SITE_NAME} Logo" class="h-10 w-10 mr-2 rounded-lg">
            <a href="/" class="text-xl font-bold text-gray-800">{SITE_NAME}</a>
        </div>
        <nav>
            <ul class="flex space-x-6">
                <li><a href="/about" class="text-gray-600 hover:text-gray-900 font-medium">About</a></li>
                <li><a href="/about-tech" class="text-gray-600 hover:text-gray-900 font-medium">About the Tech</a></li>
                <li><a href="{CONTENT_PATH}" class="text-gray-600 hover:text-gray-900 font-medium">RSS Content</a></li>
                <li><a href="/settings" class="text-gray-600 hover:text-gray-900 font-medium">Settings</a></li>
            </ul>
        </nav>
    </header>"#
    )
}

/// Footer with a label on the left and pre-rendered links on the right
pub fn site_footer(label: &str, links: &str) -> String {
    format!(
        r#"    <footer class="w-full py-8 px-6 bg-white border-t mt-12">
        <div class="max-w-6xl mx-auto flex justify-between items-center">
            <span class="text-gray-500 text-sm font-light">{label}</span>
            <div class="flex space-x-4">{links}</div>
        </div>
    </footer>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_special_characters() {
        let escaped = escape(r#"Fish & Chips <b> "quoted" 'single'"#);
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('"'));
        assert!(!escaped.contains('\''));
        assert!(escaped.contains("&amp;"));
        assert!(escaped.contains("&lt;b&gt;"));
        assert!(escaped.contains("&quot;quoted&quot;"));
    }

    #[test]
    fn test_escape_plain_text_borrows() {
        assert!(matches!(escape("Monaco"), Cow::Borrowed("Monaco")));
    }

    #[test]
    fn test_format_item_date_missing() {
        assert_eq!(format_item_date(None), "Unknown date");
        assert_eq!(format_item_date(Some("   ")), "Unknown date");
    }

    #[test]
    fn test_format_item_date_rfc2822_and_rfc3339() {
        let rss = format_item_date(Some("Fri, 14 Mar 2025 12:00:00 +0000"));
        assert!(rss.ends_with("/2025"), "got {}", rss);

        let atom = format_item_date(Some("2025-03-14T12:00:00Z"));
        assert!(atom.ends_with("/2025"), "got {}", atom);
    }

    #[test]
    fn test_format_item_date_unparsable_is_shown_raw() {
        assert_eq!(format_item_date(Some("Spring 2025")), "Spring 2025");
    }

    #[test]
    fn test_content_urls() {
        assert_eq!(content_url("index.html"), "/rsscontent/index.html");
        assert_eq!(
            absolute_content_url("https://example.com/", "rss.xml"),
            "https://example.com/rsscontent/rss.xml"
        );
    }
}
