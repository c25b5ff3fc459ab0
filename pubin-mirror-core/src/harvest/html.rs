//! Minimal structural matching over the HTML served by the indices.
//!
//! The pages involved are machine-generated and flat (directory listings,
//! a single table, `<pre>` blocks), so a handful of regexes over tags is
//! enough; no DOM is built.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

macro_rules! static_regex {
    ($name:ident, $re:expr) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($re).expect("static regex is valid"))
        }
    };
}

static_regex!(anchor_re, r"(?is)<a\b([^>]*)>");
static_regex!(
    attr_re,
    r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#
);
static_regex!(tag_re, r"(?s)<[^>]*>");
static_regex!(anchor_element_re, r"(?is)<a\b[^>]*>.*?</a\s*>");
static_regex!(pre_re, r"(?is)<pre\b[^>]*>(.*?)</pre\s*>");
static_regex!(row_re, r"(?is)<tr\b[^>]*>(.*?)</tr\s*>");
static_regex!(cell_re, r"(?is)<td\b[^>]*>(.*?)</td\s*>");
static_regex!(entity_re, r"&(?:#[xX]([0-9A-Fa-f]{1,6})|#([0-9]{1,7})|([a-zA-Z]+));");

/// Attributes of every `<a>` start tag, in document order. Names are
/// lower-cased; values are entity-decoded.
pub fn anchors(html: &str) -> Vec<HashMap<String, String>> {
    anchor_re()
        .captures_iter(html)
        .map(|cap| attributes(&cap[1]))
        .collect()
}

fn attributes(tag_body: &str) -> HashMap<String, String> {
    attr_re()
        .captures_iter(tag_body)
        .map(|cap| {
            let value = cap
                .get(2)
                .or_else(|| cap.get(3))
                .or_else(|| cap.get(4))
                .map_or("", |m| m.as_str());
            (cap[1].to_ascii_lowercase(), decode_entities(value))
        })
        .collect()
}

/// Text content of the last `<pre>` block, markup stripped and entities decoded.
pub fn last_pre_text(html: &str) -> Option<String> {
    pre_re()
        .captures_iter(html)
        .last()
        .map(|cap| text(&cap[1]))
}

/// Strip tags and decode entities.
pub fn text(fragment: &str) -> String {
    decode_entities(&tag_re().replace_all(fragment, ""))
}

/// One table row: the `href` of its first link and the text its cells
/// carry outside of any link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub href: Option<String>,
    pub text: Option<String>,
}

pub fn table_rows(html: &str) -> Vec<Row> {
    row_re()
        .captures_iter(html)
        .map(|row| {
            let body = &row[1];
            let href = anchors(body)
                .into_iter()
                .find_map(|mut attrs| attrs.remove("href"));
            let label = cell_re().captures_iter(body).find_map(|cell| {
                let bare = anchor_element_re().replace_all(&cell[1], "");
                let bare = text(&bare);
                let bare = bare.trim();
                (!bare.is_empty()).then(|| bare.to_string())
            });
            Row { href, text: label }
        })
        .collect()
}

/// Decode the named entities `amp lt gt quot apos nbsp` and every numeric
/// character reference in one pass, so `&amp;lt;` yields `&lt;`. Unknown names
/// and references to invalid code points are left as written.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    entity_re()
        .replace_all(s, |caps: &Captures| {
            let decoded = if let Some(hex) = caps.get(1) {
                u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = caps.get(2) {
                dec.as_str().parse().ok().and_then(char::from_u32)
            } else {
                match &caps[3] {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some(' '),
                    _ => None,
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}
