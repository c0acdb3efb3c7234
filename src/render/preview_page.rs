use crate::domain::{narrative_summary, FeedItem};
use crate::render::html::{escape, page_head, site_footer, site_header};
use crate::render::post_page::article_card;

pub const PREVIEW_FILE: &str = "rss-test-1.html";

fn debug_entry(item: &FeedItem, position: usize) -> String {
    let description = match &item.description {
        Some(d) => format!("{} chars", d.chars().count()),
        None => "None".to_string(),
    };

    format!(
        r#"
                    <div class="ml-4 mt-2 p-2 bg-white rounded border">
                        <p><strong>{position}. {title}</strong></p>
                        <p class="text-xs">URL: {url}</p>
                        <p class="text-xs">Published: {published}</p>
                        <p class="text-xs">Image: {image}</p>
                        <p class="text-xs">Description: {description}</p>
                    </div>"#,
        title = escape(&item.title),
        url = escape(item.url.as_deref().unwrap_or("None")),
        published = escape(item.published_date.as_deref().unwrap_or("Unknown")),
        image = if item.image.is_some() { "Found" } else { "Not found" },
    )
}

/// Diagnostic page showing up to `max_items` parsed items of one feed.
pub fn render(items: &[FeedItem], feed_name: &str, max_items: usize) -> String {
    let shown = &items[..items.len().min(max_items)];
    let summary = narrative_summary(shown, feed_name);

    let cards: String = shown
        .iter()
        .enumerate()
        .map(|(i, item)| article_card(item, i + 1))
        .collect();
    let entries: String = shown
        .iter()
        .enumerate()
        .map(|(i, item)| debug_entry(item, i + 1))
        .collect();

    let title = format!("RSS Feed Preview - {}", escape(feed_name));

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
{head}
<body class="min-h-screen bg-gray-50">
{header}
    <main class="max-w-6xl mx-auto px-4 py-8">
        <div id="ava-summary" class="bg-white rounded-lg p-6 mb-8 shadow-sm border">
            <h2 class="text-xl font-semibold text-gray-800 mb-3">AVA Summary</h2>
            <p class="text-gray-700 leading-relaxed">{summary}</p>
        </div>

        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6 mb-8">{cards}
        </div>

        <div class="mt-8 p-4 bg-gray-100 rounded-lg">
            <h3 class="text-lg font-semibold text-gray-800 mb-2">Debug Information</h3>
            <div class="text-sm text-gray-600 space-y-2">
                <p><strong>Feed:</strong> {feed}</p>
                <p><strong>Total Items Found:</strong> {total}</p>
                <p><strong>Items Displayed:</strong> {displayed}</p>
                <div class="mt-3">
                    <p><strong>Latest Articles:</strong></p>{entries}
                </div>
            </div>
        </div>
    </main>
{footer}
</body>
</html>
"#,
        head = page_head(&title, &title, ""),
        header = site_header(),
        summary = escape(&summary),
        feed = escape(feed_name),
        total = items.len(),
        displayed = shown.len(),
        footer = site_footer(
            "RSS Feed Test Preview",
            r#"<a href="/" class="text-gray-500 hover:text-gray-700 text-sm font-light">Back to Search</a>"#,
        ),
    )
}
