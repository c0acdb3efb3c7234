use chrono::Local;

use crate::domain::PostRecord;
use crate::render::html::{content_url, escape, page_head, site_footer, site_header, CONTENT_PATH};

pub const PAGE_SIZE: usize = 20;
pub const FIRST_PAGE: &str = "index.html";

/// Previous/next targets of one listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    pub prev: Option<String>,
    pub next: Option<String>,
}

/// Number of listing pages needed for `total_posts`
pub fn page_count(total_posts: usize) -> usize {
    total_posts.div_ceil(PAGE_SIZE)
}

/// `index.html` for page 1, `index-page-<n>.html` after that
pub fn page_filename(page: usize) -> String {
    if page <= 1 {
        FIRST_PAGE.to_string()
    } else {
        format!("index-page-{}.html", page)
    }
}

/// Page number encoded in a listing page name, `None` for anything else
pub fn page_number(filename: &str) -> Option<usize> {
    if filename == FIRST_PAGE {
        return Some(1);
    }
    filename
        .strip_prefix("index-page-")?
        .strip_suffix(".html")?
        .parse()
        .ok()
        .filter(|n| *n > 1)
}

/// Navigation from position alone. Page 2 links back to `index.html`.
pub fn page_links(page: usize, total_pages: usize) -> PageLinks {
    let prev = (page > 1).then(|| content_url(&page_filename(page - 1)));
    let next = (page < total_pages).then(|| content_url(&page_filename(page + 1)));
    PageLinks { prev, next }
}

fn post_row(post: &PostRecord, last: bool) -> String {
    let url = escape(&content_url(&post.filename)).into_owned();
    let anchor = escape(&post.display_title()).into_owned();
    let generated = post
        .created_at
        .with_timezone(&Local)
        .format("%-m/%-d/%Y %-I:%M:%S %p");
    let border = if last { "" } else { " border-b border-gray-100" };

    format!(
        r#"
            <div class="p-6{border}">
                <div class="flex justify-between items-start">
                    <div class="flex-1">
                        <h3 class="text-lg font-semibold text-gray-800 mb-2">
                            <a href="{url}" class="hover:text-blue-600 transition duration-200">{anchor}</a>
                        </h3>
                        <p class="text-gray-600 text-sm mb-2">Latest yacht industry articles and maritime insights</p>
                        <p class="text-gray-500 text-xs">Generated: {generated}</p>
                    </div>
                    <div class="ml-4">
                        <a href="{url}" class="inline-block bg-blue-600 text-white px-4 py-2 rounded text-sm font-medium hover:bg-blue-700 transition duration-200">View Articles</a>
                    </div>
                </div>
            </div>"#
    )
}

fn pagination(links: &PageLinks, page: usize, total_pages: usize) -> String {
    if total_pages <= 1 {
        return String::new();
    }

    let active = "inline-block bg-blue-600 text-white px-4 py-2 rounded text-sm font-medium hover:bg-blue-700 transition duration-200";
    let inactive = "px-4 py-2 bg-gray-200 text-gray-400 rounded text-sm";

    let prev = match &links.prev {
        Some(href) => format!(r#"<a href="{href}" rel="prev" class="{active}">Previous</a>"#),
        None => format!(r#"<span class="{inactive}">Previous</span>"#),
    };
    let next = match &links.next {
        Some(href) => format!(r#"<a href="{href}" rel="next" class="{active}">Next</a>"#),
        None => format!(r#"<span class="{inactive}">Next</span>"#),
    };

    format!(
        r#"
        <div class="flex justify-center mt-8">
            <div class="flex space-x-2">
                {prev}
                <span class="px-4 py-2 bg-blue-600 text-white rounded text-sm font-medium">Page {page} of {total_pages}</span>
                {next}
            </div>
        </div>"#
    )
}

fn document(page: usize, total_pages: usize, total_posts: usize, list: &str, nav: &str) -> String {
    let title = format!(
        "Latest Maritime News and Yacht Industry Insights - Page {}",
        page
    );
    let description = format!(
        "Latest maritime news and yacht industry articles from leading yacht RSS feeds. Page {} of {}.",
        page, total_pages
    );
    let footer_links = format!(
        r#"<a href="{CONTENT_PATH}rss.xml" class="text-blue-600 hover:text-blue-800 text-sm font-light">&rarr; RSS Feed</a>
                <a href="/" class="text-gray-500 hover:text-gray-700 text-sm font-light">Home</a>"#
    );

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
{head}
<body class="min-h-screen bg-gray-50">
{header}
    <main class="max-w-4xl mx-auto px-4 py-8">
        <div class="mb-8">
            <h1 class="text-3xl font-bold text-gray-800 mb-2">RSS Content Index - Page {page} of {total_pages}</h1>
            <p class="text-gray-600">Latest maritime news and yacht industry articles</p>
            <p class="text-gray-500 text-sm mt-2">Total articles: {total_posts} | Page {page} of {total_pages}</p>
        </div>

        <div class="bg-white rounded-lg shadow-sm border">{list}
        </div>
{nav}
        <div class="text-center mt-8">
            <a href="/" class="text-gray-500 hover:text-gray-700 font-medium">&larr; Back to Home</a>
        </div>
    </main>
{footer}
</body>
</html>
"#,
        head = page_head(&title, &description, ""),
        header = site_header(),
        footer = site_footer("RSS Content Index", &footer_links),
    )
}

/// Render listing page `page` (1-based) from the posts that belong on it.
///
/// Output depends only on the arguments, so an unchanged post set renders
/// byte-identical pages.
pub fn render(page_posts: &[PostRecord], page: usize, total_pages: usize, total_posts: usize) -> String {
    let list: String = page_posts
        .iter()
        .enumerate()
        .map(|(i, post)| post_row(post, i + 1 == page_posts.len()))
        .collect();
    let links = page_links(page, total_pages);

    document(
        page,
        total_pages,
        total_posts,
        &list,
        &pagination(&links, page, total_pages),
    )
}

/// The single `index.html` written when no posts exist yet
pub fn render_empty() -> String {
    let list = r#"
            <div class="p-6 text-center">
                <p class="text-gray-500">No RSS content generated yet.</p>
                <p class="text-gray-400 text-sm mt-2">Run a build to generate content.</p>
            </div>"#;
    document(1, 1, 0, list, "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn post(name: &str, title: Option<&str>) -> PostRecord {
        PostRecord::new(name.to_string(), DateTime::<Utc>::default())
            .with_first_title(title.map(str::to_string))
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0), 0);
        assert_eq!(page_count(1), 1);
        assert_eq!(page_count(20), 1);
        assert_eq!(page_count(21), 2);
        assert_eq!(page_count(41), 3);
    }

    #[test]
    fn test_page_filenames() {
        assert_eq!(page_filename(1), "index.html");
        assert_eq!(page_filename(3), "index-page-3.html");
        assert_eq!(page_number("index.html"), Some(1));
        assert_eq!(page_number("index-page-7.html"), Some(7));
        assert_eq!(page_number("index-page-1.html"), None);
        assert_eq!(page_number("index-page-x.html"), None);
        assert_eq!(page_number("rss.xml"), None);
    }

    #[test]
    fn test_page_links() {
        assert_eq!(
            page_links(1, 3),
            PageLinks { prev: None, next: Some("/rsscontent/index-page-2.html".into()) }
        );
        assert_eq!(
            page_links(2, 3),
            PageLinks {
                prev: Some("/rsscontent/index.html".into()),
                next: Some("/rsscontent/index-page-3.html".into()),
            }
        );
        assert_eq!(
            page_links(3, 3),
            PageLinks { prev: Some("/rsscontent/index-page-2.html".into()), next: None }
        );
        assert_eq!(page_links(1, 1), PageLinks { prev: None, next: None });
    }

    #[test]
    fn test_render_escapes_anchor_text() {
        let posts = vec![post("rss-post-a-20250101-0900.html", Some("Fish & <Chips>"))];
        let html = render(&posts, 1, 1, 1);

        assert!(html.contains("Fish &amp; &lt;Chips&gt; | Maritime News"));
        assert!(html.contains(r#"href="/rsscontent/rss-post-a-20250101-0900.html""#));
        assert!(!html.contains("Previous"));
    }

    #[test]
    fn test_render_untitled_post_uses_date_anchor() {
        let posts = vec![post("rss-post-20250101-0900.html", None)];
        let html = render(&posts, 1, 1, 1);
        assert!(html.contains("Maritime News - "));
    }

    #[test]
    fn test_render_middle_page_has_both_links() {
        let html = render(&[post("rss-post-a.html", Some("A"))], 2, 3, 41);

        assert!(html.contains(r#"<a href="/rsscontent/index.html" rel="prev""#));
        assert!(html.contains(r#"<a href="/rsscontent/index-page-3.html" rel="next""#));
        assert!(html.contains("Total articles: 41 | Page 2 of 3"));
    }

    #[test]
    fn test_render_empty() {
        let html = render_empty();
        assert!(html.contains("No RSS content generated yet."));
        assert!(html.contains("Total articles: 0"));
    }
}
