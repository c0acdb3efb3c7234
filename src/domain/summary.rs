use super::FeedItem;

/// Items considered for the summary and rendered on a post page.
pub const MAX_SUMMARY_ITEMS: usize = 3;
const MAX_TOPICS: usize = 3;
const FALLBACK_TOPICS: &str = "maritime lifestyle and yacht industry news";

/// Keyword groups and the topic phrase each one contributes.
const TOPIC_KEYWORDS: &[(&[&str], &str)] = &[
    (&["yacht", "boat"], "yachting"),
    (&["charter"], "charter services"),
    (&["marina", "harbor", "port"], "marinas"),
    (&["luxury", "superyacht"], "luxury vessels"),
    (&["destination", "travel"], "destinations"),
    (&["monaco", "mediterranean"], "Mediterranean"),
    (&["anchor", "sailing"], "sailing"),
    (&["florida", "caribbean"], "tropical waters"),
];

/// The concierge narrative shown at the top of a post page.
pub fn narrative_summary(items: &[FeedItem], feed_name: &str) -> String {
    let Some(first) = items.first() else {
        return format!(
            "Bonjour! I'm AVA, your Monaco yacht concierge. I couldn't find any recent articles from {} at the moment. Please check back later for the latest yacht and maritime news. —AVA",
            feed_name
        );
    };

    let article_count = items.len().min(MAX_SUMMARY_ITEMS);
    let topics = topic_clause(items);

    format!(
        "Bonjour! I'm AVA, your Monaco yacht concierge. I've curated {} latest articles from {}, featuring \"{}\" and other maritime insights covering {}. These articles provide valuable perspectives on yacht lifestyle, destinations, and industry trends for the discerning yacht enthusiast. —AVA",
        article_count, feed_name, first.title, topics
    )
}

/// Distinct topics in order of first appearance across the first three items.
pub fn extract_topics(items: &[FeedItem]) -> Vec<&'static str> {
    let mut topics: Vec<&'static str> = Vec::new();

    for item in items.iter().take(MAX_SUMMARY_ITEMS) {
        let text = item.search_text();
        for (keywords, topic) in TOPIC_KEYWORDS {
            if keywords.iter().any(|k| text.contains(k)) && !topics.contains(topic) {
                topics.push(topic);
            }
        }
    }

    topics.truncate(MAX_TOPICS);
    topics
}

pub fn topic_clause(items: &[FeedItem]) -> String {
    let topics = extract_topics(items);

    match topics.as_slice() {
        [] => FALLBACK_TOPICS.to_string(),
        [only] => only.to_string(),
        [a, b] => format!("{} and {}", a, b),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, description: Option<&str>) -> FeedItem {
        FeedItem::new(title).with_description(description.map(str::to_string))
    }

    #[test]
    fn test_empty_items_summary() {
        let summary = narrative_summary(&[], "Boat International");
        assert!(summary.contains("couldn't find any recent articles from Boat International"));
    }

    #[test]
    fn test_summary_names_first_title_and_caps_count() {
        let items = vec![
            item("New superyacht delivered", None),
            item("Second", None),
            item("Third", None),
            item("Fourth", None),
        ];
        let summary = narrative_summary(&items, "Megayacht News");

        assert!(summary.contains("curated 3 latest articles from Megayacht News"));
        assert!(summary.contains("featuring \"New superyacht delivered\""));
    }

    #[test]
    fn test_single_topic() {
        let items = vec![item("Charter rates rise", None)];
        assert_eq!(topic_clause(&items), "charter services");
    }

    #[test]
    fn test_two_topics_joined_with_and() {
        let items = vec![item("Sailing to Florida", None)];
        assert_eq!(topic_clause(&items), "sailing and tropical waters");
    }

    #[test]
    fn test_three_topics_use_oxford_comma_and_cap() {
        let items = vec![
            item("Yacht charter", Some("A new marina opens")),
            item("Luxury travel in Monaco", None),
        ];
        assert_eq!(
            topic_clause(&items),
            "yachting, charter services, and marinas"
        );
    }

    #[test]
    fn test_topics_are_distinct() {
        let items = vec![item("Yacht", None), item("Boat", None), item("Yacht", None)];
        assert_eq!(extract_topics(&items), vec!["yachting"]);
    }

    #[test]
    fn test_only_first_three_items_considered() {
        let items = vec![
            item("One", None),
            item("Two", None),
            item("Three", None),
            item("Caribbean escape", None),
        ];
        assert_eq!(topic_clause(&items), FALLBACK_TOPICS);
    }

    #[test]
    fn test_summary_is_deterministic() {
        let items = vec![item("Harbor refit", Some("Anchor upgrades"))];
        assert_eq!(
            narrative_summary(&items, "Feed"),
            narrative_summary(&items, "Feed")
        );
    }
}
