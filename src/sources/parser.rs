//! Streaming RSS/Atom item extraction.
//!
//! The document dialect is detected once from the root element and then
//! drives a single extraction loop: `Dialect` decides which element opens an
//! item and which child elements map onto which `FeedItem` field.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::OnceLock;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;

use crate::domain::{Dialect, FeedItem};
use crate::errors::{ShipyardError, ShipyardResult};

pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Field {
    Title,
    Description,
    Body,
    Link,
    Guid,
    Published,
    PublishedFallback,
    FeaturedImage,
}

impl Dialect {
    fn is_item_start(&self, local_name: &str) -> bool {
        match self {
            Dialect::Rss => local_name == "item",
            Dialect::Atom => local_name == "entry",
        }
    }

    /// Map a direct child of an item onto the field it feeds
    fn field_for(&self, name: &str) -> Option<Field> {
        match self {
            Dialect::Rss => match name {
                "title" => Some(Field::Title),
                "description" => Some(Field::Description),
                "content:encoded" => Some(Field::Body),
                "link" => Some(Field::Link),
                "guid" => Some(Field::Guid),
                "pubdate" => Some(Field::Published),
                "dc:date" => Some(Field::PublishedFallback),
                "wp:featuredimage" => Some(Field::FeaturedImage),
                _ => None,
            },
            Dialect::Atom => match name.strip_prefix("atom:").unwrap_or(name) {
                "title" => Some(Field::Title),
                "summary" => Some(Field::Description),
                "content" => Some(Field::Body),
                "published" => Some(Field::Published),
                "updated" => Some(Field::PublishedFallback),
                _ => None,
            },
        }
    }
}

/// Detect the dialect from the document's root element.
pub fn detect_dialect(text: &str) -> Dialect {
    let mut reader = Reader::from_str(text);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let is_feed = lowercase(e.local_name().as_ref()) == "feed";
                let declares_atom = e.attributes().flatten().any(|attr| {
                    let key = attr.key.as_ref();
                    (key == b"xmlns" || key.starts_with(b"xmlns:"))
                        && attr.value.as_ref() == ATOM_NAMESPACE.as_bytes()
                });
                return if is_feed && declares_atom {
                    Dialect::Atom
                } else {
                    Dialect::Rss
                };
            }
            Ok(Event::Eof) | Err(_) => return Dialect::Rss,
            Ok(_) => {}
        }
    }
}

/// Lazy, single-pass iterator over the items of one feed document.
///
/// Iteration stops at the first XML error; [`FeedItems::failed`] reports it.
pub struct FeedItems<'a> {
    reader: Reader<&'a [u8]>,
    dialect: Dialect,
    failed: bool,
    done: bool,
}

impl<'a> FeedItems<'a> {
    pub fn new(text: &'a str) -> Self {
        let dialect = detect_dialect(text);
        let mut reader = Reader::from_str(text);
        reader.config_mut().check_end_names = false;

        Self {
            reader,
            dialect,
            failed: false,
            done: false,
        }
    }

    pub fn failed(&self) -> bool {
        self.failed
    }

    fn next_item(&mut self) -> ShipyardResult<Option<FeedItem>> {
        loop {
            match self.reader.read_event().map_err(xml_error)? {
                Event::Start(e) => {
                    if self.dialect.is_item_start(&lowercase(e.local_name().as_ref())) {
                        return self.read_item().map(Some);
                    }
                }
                // A self-closed item still counts, with every field absent.
                Event::Empty(e) => {
                    if self.dialect.is_item_start(&lowercase(e.local_name().as_ref())) {
                        return Ok(Some(ItemDraft::default().finish(self.dialect)));
                    }
                }
                Event::Eof => return Ok(None),
                _ => {}
            }
        }
    }

    /// Read one item. End tags are matched by name rather than by depth, so
    /// unclosed HTML such as `<br>` cannot swallow the rest of the document.
    fn read_item(&mut self) -> ShipyardResult<FeedItem> {
        let dialect = self.dialect;
        let mut draft = ItemDraft::default();
        // Names of non-field elements currently open inside the item.
        let mut open: Vec<String> = Vec::new();
        let mut capture: Option<Capture> = None;

        loop {
            match self.reader.read_event().map_err(xml_error)? {
                Event::Start(e) => {
                    let name = element_name(&e);
                    if let Some(c) = capture.as_mut() {
                        c.open_tag(&e, &name, false);
                        continue;
                    }
                    draft.inspect(dialect, &name, &e, open.len() + 1);
                    match dialect.field_for(&name) {
                        Some(field) if open.is_empty() => capture = Some(Capture::new(field, name)),
                        _ => open.push(name),
                    }
                }
                Event::Empty(e) => {
                    let name = element_name(&e);
                    if let Some(c) = capture.as_mut() {
                        c.open_tag(&e, &name, true);
                        continue;
                    }
                    draft.inspect(dialect, &name, &e, open.len() + 1);
                    if open.is_empty() {
                        if let Some(field) = dialect.field_for(&name) {
                            draft.set(field, String::new());
                        }
                    }
                }
                Event::End(e) => {
                    let name = lowercase(e.name().as_ref());
                    let closes_item = dialect.is_item_start(&lowercase(e.local_name().as_ref()));

                    if let Some(mut c) = capture.take() {
                        if closes_item || c.close_tag(&name) {
                            draft.set(c.field, c.buf);
                        } else {
                            capture = Some(c);
                            continue;
                        }
                    } else if let Some(pos) = open.iter().rposition(|n| *n == name) {
                        open.truncate(pos);
                        continue;
                    }

                    if closes_item {
                        return Ok(draft.finish(dialect));
                    }
                }
                Event::Text(t) => {
                    if let Some(c) = capture.as_mut() {
                        match t.unescape() {
                            Ok(text) => c.buf.push_str(&text),
                            // Unknown HTML entities such as &nbsp; are kept verbatim.
                            Err(_) => c.buf.push_str(&String::from_utf8_lossy(&t)),
                        }
                    }
                }
                Event::CData(t) => {
                    if let Some(c) = capture.as_mut() {
                        c.buf.push_str(&String::from_utf8_lossy(&t));
                    }
                }
                Event::Eof => {
                    return Err(ShipyardError::FeedParse(
                        "document ended inside an item".to_string(),
                    ));
                }
                _ => {}
            }
        }
    }
}

impl Iterator for FeedItems<'_> {
    type Item = FeedItem;

    fn next(&mut self) -> Option<FeedItem> {
        if self.done {
            return None;
        }

        match self.next_item() {
            Ok(Some(item)) => Some(item),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                tracing::warn!(dialect = %self.dialect, "Error parsing XML feed: {}", e);
                self.failed = true;
                self.done = true;
                None
            }
        }
    }
}

/// Parse a whole document. Any XML error yields no items at all.
pub fn parse_feed(text: &str) -> Vec<FeedItem> {
    let mut items = FeedItems::new(text);
    let collected: Vec<FeedItem> = items.by_ref().collect();

    if items.failed() {
        return Vec::new();
    }
    collected
}

/// Text being accumulated for one field element, nested markup included.
struct Capture {
    field: Field,
    name: String,
    /// Open elements inside the field sharing its name
    nested: usize,
    buf: String,
}

impl Capture {
    fn new(field: Field, name: String) -> Self {
        Self {
            field,
            name,
            nested: 0,
            buf: String::new(),
        }
    }

    fn open_tag(&mut self, e: &BytesStart<'_>, name: &str, empty: bool) {
        if !empty && name == self.name {
            self.nested += 1;
        }
        self.buf.push('<');
        self.buf.push_str(&String::from_utf8_lossy(e));
        self.buf.push_str(if empty { "/>" } else { ">" });
    }

    /// Record an end tag; true when it closes the field element itself
    fn close_tag(&mut self, name: &str) -> bool {
        if name == self.name {
            if self.nested == 0 {
                return true;
            }
            self.nested -= 1;
        }
        self.buf.push_str("</");
        self.buf.push_str(name);
        self.buf.push('>');
        false
    }
}

#[derive(Default)]
struct ItemDraft {
    fields: HashMap<Field, String>,
    media_image: Option<String>,
    enclosure_image: Option<String>,
    alternate_link: Option<String>,
    other_link: Option<String>,
}

impl ItemDraft {
    fn set(&mut self, field: Field, value: String) {
        self.fields.entry(field).or_insert(value);
    }

    /// Collect attribute-borne values: images anywhere, Atom links on direct children.
    fn inspect(&mut self, dialect: Dialect, name: &str, e: &BytesStart<'_>, depth: usize) {
        match name {
            "media:content" if self.media_image.is_none() => {
                self.media_image = attribute(e, b"url").filter(|u| looks_like_image(u));
            }
            "enclosure" if self.enclosure_image.is_none() => {
                self.enclosure_image = attribute(e, b"url").filter(|u| looks_like_image(u));
            }
            "link" | "atom:link" if dialect == Dialect::Atom && depth == 1 => {
                let Some(href) = attribute(e, b"href") else {
                    return;
                };
                match attribute(e, b"rel").as_deref() {
                    None | Some("alternate") => {
                        self.alternate_link.get_or_insert(href);
                    }
                    Some(_) => {
                        self.other_link.get_or_insert(href);
                    }
                }
            }
            _ => {}
        }
    }

    fn text(&self, field: Field) -> Option<String> {
        self.fields
            .get(&field)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn finish(self, dialect: Dialect) -> FeedItem {
        let title = self.text(Field::Title).unwrap_or_default();
        let description = self.text(Field::Description).or_else(|| self.text(Field::Body));

        let url = match dialect {
            Dialect::Rss => self.text(Field::Link).or_else(|| self.text(Field::Guid)),
            Dialect::Atom => self.alternate_link.clone().or_else(|| self.other_link.clone()),
        };

        let published = self
            .text(Field::Published)
            .or_else(|| self.text(Field::PublishedFallback));

        let image = self
            .media_image
            .clone()
            .or_else(|| self.enclosure_image.clone())
            .or_else(|| {
                [Field::Description, Field::Body]
                    .iter()
                    .filter_map(|f| self.fields.get(f))
                    .find_map(|body| first_inline_image(body))
            })
            .or_else(|| self.text(Field::FeaturedImage));

        FeedItem::new(title)
            .with_description(description)
            .with_url(url)
            .with_published_date(published)
            .with_image(image)
    }
}

fn img_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)<img[^>]*?\ssrc=["']([^"']+)["']"#).expect("valid img pattern")
    })
}

fn first_inline_image(markup: &str) -> Option<String> {
    img_regex()
        .captures_iter(markup)
        .map(|caps| caps[1].to_string())
        .find(|src| looks_like_image(src))
}

/// Whether a URL's path ends in a known image extension.
pub fn looks_like_image(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let Some((_, ext)) = path.rsplit_once('.') else {
        return false;
    };
    IMAGE_EXTENSIONS
        .iter()
        .any(|known| ext.eq_ignore_ascii_case(known))
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref().eq_ignore_ascii_case(key))
        .map(|attr| match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        })
}

fn element_name(e: &BytesStart<'_>) -> String {
    lowercase(e.name().as_ref())
}

fn lowercase(bytes: &[u8]) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(s) => s.to_ascii_lowercase(),
        Cow::Owned(s) => s.to_ascii_lowercase(),
    }
}

fn xml_error(e: quick_xml::Error) -> ShipyardError {
    ShipyardError::FeedParse(e.to_string())
}
