use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::domain::PostRecord;
use crate::render::html::{absolute_content_url, escape, SITE_NAME};

pub const FEED_FILE: &str = "rss.xml";
pub const MAX_FEED_ITEMS: usize = 20;

fn item_description(post: &PostRecord) -> String {
    format!(
        "Latest yacht industry articles and maritime insights from {}.",
        post.first_title
            .as_deref()
            .unwrap_or("our maritime news collection")
    )
}

/// RSS 2.0 document over the newest posts. `posts` must be newest first.
///
/// `lastBuildDate` is the newest post's creation time, so an unchanged post
/// set yields the same document.
pub fn render(posts: &[PostRecord], base_url: &str) -> String {
    let base = escape(base_url.trim_end_matches('/')).into_owned();
    let build_date = posts
        .first()
        .map(|p| p.created_at)
        .unwrap_or_else(DateTime::<Utc>::default)
        .to_rfc2822();

    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
<channel>
    <title>{site} - Maritime News</title>
    <link>{base}/rsscontent/</link>
    <description>Latest maritime news and yacht industry articles from {site}</description>
    <language>en-us</language>
    <lastBuildDate>{build_date}</lastBuildDate>
    <generator>{site} RSS Generator</generator>
    <atom:link href="{base}/rsscontent/{FEED_FILE}" rel="self" type="application/rss+xml" />
"#,
        site = escape(SITE_NAME),
    );

    for post in posts.iter().take(MAX_FEED_ITEMS) {
        let link = escape(&absolute_content_url(base_url, &post.filename)).into_owned();
        // Writing into a String cannot fail.
        let _ = write!(
            xml,
            r#"
    <item>
        <title>{title}</title>
        <link>{link}</link>
        <description>{description}</description>
        <pubDate>{pub_date}</pubDate>
        <guid isPermaLink="true">{link}</guid>
    </item>"#,
            title = escape(&post.display_title()),
            description = escape(&item_description(post)),
            pub_date = post.created_at.to_rfc2822(),
        );
    }

    xml.push_str("\n</channel>\n</rss>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quick_xml::events::Event;
    use quick_xml::Reader;

    fn post(name: &str, title: Option<&str>, minutes_ago: i64) -> PostRecord {
        PostRecord::new(name.to_string(), Utc::now() - Duration::minutes(minutes_ago))
            .with_first_title(title.map(str::to_string))
    }

    /// Read the document to the end, collecting item titles
    fn titles(xml: &str) -> Vec<String> {
        let mut reader = Reader::from_str(xml);
        let mut titles = Vec::new();
        let mut in_item = false;
        let mut in_title = false;

        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) if e.name().as_ref() == b"item" => in_item = true,
                Event::End(e) if e.name().as_ref() == b"item" => in_item = false,
                Event::Start(e) if e.name().as_ref() == b"title" => in_title = in_item,
                Event::End(e) if e.name().as_ref() == b"title" => in_title = false,
                Event::Text(t) if in_title => titles.push(t.unescape().unwrap().into_owned()),
                Event::Eof => break,
                _ => {}
            }
        }
        titles
    }

    #[test]
    fn test_escapes_title_and_is_well_formed() {
        let posts = vec![post(
            "rss-post-x-20250101-0900.html",
            Some(r#"Sail & "Motor" <Yachts>"#),
            0,
        )];
        let xml = render(&posts, "http://localhost:3000");

        assert!(xml.contains(
            "<title>Sail &amp; &quot;Motor&quot; &lt;Yachts&gt; | Maritime News</title>"
        ));
        assert_eq!(titles(&xml), vec![r#"Sail & "Motor" <Yachts> | Maritime News"#]);
    }

    #[test]
    fn test_links_are_absolute() {
        let posts = vec![post("rss-post-y-20250101-0900.html", Some("Y"), 0)];
        let xml = render(&posts, "https://opulentshipyardmonaco.com/");

        assert!(xml.contains(
            "<link>https://opulentshipyardmonaco.com/rsscontent/rss-post-y-20250101-0900.html</link>"
        ));
        assert!(xml.contains(r#"<guid isPermaLink="true">https://opulentshipyardmonaco.com/rsscontent/rss-post-y-20250101-0900.html</guid>"#));
    }

    #[test]
    fn test_caps_at_twenty_newest() {
        let posts: Vec<_> = (0..25)
            .map(|i| post(&format!("rss-post-{:02}.html", i), Some(&format!("Post {}", i)), i))
            .collect();
        let found = titles(&render(&posts, "http://localhost:3000"));

        assert_eq!(found.len(), MAX_FEED_ITEMS);
        assert_eq!(found[0], "Post 0 | Maritime News");
        assert_eq!(found[19], "Post 19 | Maritime News");
    }

    #[test]
    fn test_empty_feed_is_well_formed() {
        assert!(titles(&render(&[], "http://localhost:3000")).is_empty());
    }

    #[test]
    fn test_same_posts_same_document() {
        let posts = vec![post("rss-post-z.html", Some("Z"), 3)];
        assert_eq!(
            render(&posts, "http://localhost:3000"),
            render(&posts, "http://localhost:3000")
        );
    }
}
