use chrono::{DateTime, Local};
use serde_json::json;

use crate::domain::summary::MAX_SUMMARY_ITEMS;
use crate::domain::{narrative_summary, FeedItem};
use crate::render::html::{
    absolute_content_url, escape, format_item_date, page_head, site_footer, site_header,
    CONTENT_PATH, SITE_NAME,
};

const OG_IMAGE: &str = "https://placehold.co/1200x630/E0E0E0/333333?text=Maritime%20News";
const META_SUMMARY_CHARS: usize = 150;

/// Placeholder shown when an item carries no image; `position` is 1-based.
pub fn placeholder_image(position: usize) -> String {
    format!(
        "https://placehold.co/400x250/E0E0E0/333333?text=Article%20{}",
        position
    )
}

/// One article card. Shared with the preview page.
pub(crate) fn article_card(item: &FeedItem, position: usize) -> String {
    let placeholder = placeholder_image(position);
    let image = item.image.as_deref().unwrap_or(&placeholder);
    let title = escape(&item.title);
    let snippet = item
        .snippet
        .as_deref()
        .map(escape)
        .unwrap_or_else(|| "No description available.".into());
    let url = escape(item.url.as_deref().unwrap_or("#"));
    let date = escape(&format_item_date(item.published_date.as_deref())).into_owned();

    format!(
        r#"
            <div class="yacht-card rounded-lg overflow-hidden">
                <img src="{image}"
                     alt="{title}"
                     class="w-full h-48 object-cover"
                     onerror="this.src='{placeholder}'">
                <div class="p-4">
                    <h3 class="article-title text-lg font-semibold text-gray-800 mb-2">{title}</h3>
                    <p class="text-gray-600 text-sm mb-3 line-clamp-3">{snippet}</p>
                    <div class="flex justify-between items-center">
                        <a href="{url}" target="_blank" rel="noopener noreferrer"
                           class="inline-block bg-blue-600 text-white px-4 py-2 rounded text-sm font-medium hover:bg-blue-700 transition duration-200">
                            Read Article
                        </a>
                        <span class="text-xs text-gray-500">{date}</span>
                    </div>
                </div>
            </div>"#,
        image = escape(image),
    )
}

/// JSON-LD block describing the post as a news article listing its items.
fn structured_data(
    title: &str,
    description: &str,
    page_url: &str,
    base_url: &str,
    items: &[FeedItem],
    generated_at: DateTime<Local>,
) -> String {
    let list: Vec<_> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "url": item.url,
                "name": item.title,
            })
        })
        .collect();

    let data = json!({
        "@context": "https://schema.org",
        "@type": "NewsArticle",
        "headline": title,
        "description": description,
        "url": page_url,
        "datePublished": generated_at.to_rfc3339(),
        "publisher": {
            "@type": "Organization",
            "name": SITE_NAME,
            "url": base_url,
        },
        "mainEntity": {
            "@type": "ItemList",
            "numberOfItems": items.len(),
            "itemListElement": list,
        },
    });

    // A literal "</" inside the script would close it early.
    let encoded = serde_json::to_string_pretty(&data)
        .unwrap_or_default()
        .replace("</", "<\\/");
    format!(
        "    <script type=\"application/ld+json\">\n{}\n    </script>",
        encoded
    )
}

/// Render the static page for one materialized post.
///
/// Only the first three items are shown. Everything interpolated from the
/// feed is escaped.
pub fn render(
    items: &[FeedItem],
    feed_name: &str,
    filename: &str,
    base_url: &str,
    generated_at: DateTime<Local>,
) -> String {
    let shown = &items[..items.len().min(MAX_SUMMARY_ITEMS)];
    let summary = narrative_summary(shown, feed_name);

    let title = format!("{} - Latest Maritime News | {}", feed_name, SITE_NAME);
    let short_summary: String = summary.chars().take(META_SUMMARY_CHARS).collect();
    let description = format!(
        "Latest maritime news and yacht industry articles from {}. {}...",
        feed_name, short_summary
    );
    let page_url = absolute_content_url(base_url, filename);

    let e_title = escape(&title);
    let e_description = escape(&description);
    let e_page_url = escape(&page_url);

    let meta = format!(
        r#"    <meta property="og:title" content="{e_title}">
    <meta property="og:type" content="website">
    <meta property="og:image" content="{OG_IMAGE}">
    <meta property="og:url" content="{e_page_url}">
    <meta property="og:description" content="{e_description}">
    <meta property="og:site_name" content="{SITE_NAME}">
    <meta name="twitter:card" content="summary_large_image">
    <meta name="twitter:title" content="{e_title}">
    <meta name="twitter:description" content="{e_description}">
    <meta name="twitter:image" content="{OG_IMAGE}">
{ld}"#,
        ld = structured_data(&title, &description, &page_url, base_url, shown, generated_at),
    );

    let cards: String = shown
        .iter()
        .enumerate()
        .map(|(i, item)| article_card(item, i + 1))
        .collect();

    let month_year = generated_at.format("%B %Y");
    let footer_links = format!(
        r#"<a href="{CONTENT_PATH}" class="text-gray-500 hover:text-gray-700 text-sm font-light">RSS Content Index</a>"#
    );

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
{head}
<body class="min-h-screen bg-gray-50">
{header}
    <main class="max-w-6xl mx-auto px-4 py-8">
        <div class="mb-8">
            <h1 class="text-3xl font-bold text-gray-800 mb-2">Latest Maritime News</h1>
            <p class="text-gray-600">From: <strong>{feed}</strong></p>
            <p class="text-gray-500 text-sm">Generated: {generated}</p>
        </div>

        <div id="ava-summary" class="bg-white rounded-lg p-6 mb-8 shadow-sm border">
            <h2 class="text-xl font-semibold text-gray-800 mb-3">AVA Summary</h2>
            <p class="text-gray-700 leading-relaxed">{summary}</p>
            <div class="mt-4 pt-4 border-t border-gray-200">
                <p class="text-gray-500 text-sm italic">Editor's note: This curated list was generated by AVA, your Monaco yacht concierge, based on the latest public yacht listings and industry news as of {month_year}.</p>
            </div>
        </div>

        <div class="mb-8">
            <p class="text-gray-700 leading-relaxed">As of {month_year}, according to industry sources and Monaco-based yacht brokers, these are currently considered the best yachts available in Monaco for viewing, charter or sale.</p>
        </div>

        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6 mb-8">{cards}
        </div>

        <div class="mb-8">
            <p class="text-gray-600 leading-relaxed"><strong>Sources:</strong> Yacht Buyer, Boat International, Robb Report, Megayacht News, Marine Link, and other public yacht listings.</p>
        </div>

        <div class="flex justify-between items-center mt-8">
            <a href="{CONTENT_PATH}" class="text-blue-600 hover:text-blue-800 font-medium">&larr; Back to RSS Content Index</a>
            <a href="/" class="text-gray-500 hover:text-gray-700 font-medium">Home</a>
        </div>
    </main>
{footer}
</body>
</html>
"#,
        head = page_head(&e_title, &e_description, &meta),
        header = site_header(),
        feed = escape(feed_name),
        generated = generated_at.format("%-m/%-d/%Y at %-I:%M:%S %p"),
        summary = escape(&summary),
        footer = site_footer(&format!("RSS Content - {}", escape(filename)), &footer_links),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn generated_at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 14, 9, 5, 0).unwrap()
    }

    fn items(n: usize) -> Vec<FeedItem> {
        (1..=n)
            .map(|i| {
                FeedItem::new(format!("Yacht story {}", i))
                    .with_url(Some(format!("https://example.com/{}", i)))
                    .with_description(Some(format!("<p>Story number {}</p>", i)))
            })
            .collect()
    }

    #[test]
    fn test_renders_first_three_items_only() {
        let html = render(&items(5), "Boat International", "rss-post-a.html", "http://localhost:3000", generated_at());

        assert_eq!(html.matches(r#"<h3 class="article-title"#).count(), 3);
        assert!(html.contains("Yacht story 3"));
        assert!(!html.contains("Yacht story 4"));
    }

    #[test]
    fn test_placeholders_and_defaults() {
        let items = vec![FeedItem::new("Bare item")];
        let html = render(&items, "Feed", "rss-post-b.html", "http://localhost:3000", generated_at());

        assert!(html.contains(&placeholder_image(1)));
        assert!(html.contains("No description available."));
        assert!(html.contains("Unknown date"));
    }

    #[test]
    fn test_feed_text_is_escaped() {
        let items = vec![FeedItem::new("<script>alert('x')</script> & more")];
        let html = render(&items, "Feed & Co", "rss-post-c.html", "http://localhost:3000", generated_at());

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Feed &amp; Co"));
    }

    #[test]
    fn test_structured_data_cannot_close_script() {
        let items = vec![FeedItem::new("</script><b>x</b>")];
        let html = render(&items, "Feed", "rss-post-d.html", "http://localhost:3000", generated_at());
        // Only the stylesheet loader and the JSON-LD block close a script.
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn test_page_url_uses_base_url() {
        let html = render(&items(1), "Feed", "rss-post-e.html", "https://opulentshipyardmonaco.com", generated_at());
        assert!(html.contains(r#"content="https://opulentshipyardmonaco.com/rsscontent/rss-post-e.html""#));
    }

    #[test]
    fn test_summary_present() {
        let html = render(&items(2), "Megayacht News", "rss-post-f.html", "http://localhost:3000", generated_at());
        assert!(html.contains("I&apos;ve curated 2 latest articles from Megayacht News"));
    }
}
