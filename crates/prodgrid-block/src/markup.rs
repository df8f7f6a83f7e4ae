//! Reading authored block markup.
//!
//! Authored blocks arrive as a table of `<div>` rows:
//!
//! ```html
//! <div class="product-list" data-cq-tags="red, blue">
//!   <div><div>Folder</div><div><a href="/content/dam/luma3/men.html">men</a></div></div>
//!   <div><div>Tags</div><div>red, blue</div></div>
//! </div>
//! ```
//!
//! Extraction is regex-based and tolerant: anything it cannot make sense of
//! reads as absent.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::node::Block;

static START_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*<([a-zA-Z][a-zA-Z0-9-]*)\b([^>]*)>").expect("valid start tag regex")
});
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)([^\s"'=<>/]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("valid attr regex")
});
static DIV_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(/?)div\b([^>]*)>").expect("valid div regex"));
static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b([^>]*)>(.*?)</a\s*>").expect("valid anchor regex"));
static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p\b[^>]*>(.*?)</p\s*>").expect("valid paragraph regex"));
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// A configuration cell value: one string, or several when the cell holds
/// multiple links or paragraphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Single(String),
    List(Vec<String>),
}

impl ConfigValue {
    /// The value as a single string; a list yields its first entry.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            ConfigValue::Single(s) => Some(s.as_str()),
            ConfigValue::List(items) => items.first().map(String::as_str),
        }
    }
}

/// First anchor in the authored content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Raw `href` attribute, empty when absent.
    pub href: String,
    /// Visible text, tags stripped and whitespace collapsed.
    pub text: String,
}

/// Read-only view over an authored block's attributes and inner markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthoredBlock {
    attrs: Vec<(String, String)>,
    inner_html: String,
}

impl AuthoredBlock {
    pub fn new(attrs: Vec<(String, String)>, inner_html: impl Into<String>) -> Self {
        Self {
            attrs,
            inner_html: inner_html.into(),
        }
    }

    #[must_use]
    pub fn from_block(block: &Block) -> Self {
        Self::new(block.attrs().to_vec(), block.inner_html())
    }

    #[must_use]
    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    #[must_use]
    pub fn first_anchor(&self) -> Option<Anchor> {
        let caps = ANCHOR_RE.captures(&self.inner_html)?;
        let attrs = parse_attrs(caps.get(1).map_or("", |m| m.as_str()));
        let href = attr_value(&attrs, "href").unwrap_or_default().to_owned();
        let text = text_content(caps.get(2).map_or("", |m| m.as_str()));
        Some(Anchor { href, text })
    }

    /// `data-*` attributes of the block element, keyed like the DOM dataset
    /// (`data-cq-tags` → `cqTags`).
    #[must_use]
    pub fn dataset(&self) -> BTreeMap<String, String> {
        self.attrs
            .iter()
            .filter_map(|(name, value)| {
                name.strip_prefix("data-")
                    .map(|key| (dataset_key(key), value.clone()))
            })
            .collect()
    }

    /// Key-value configuration from the authored two-column table.
    ///
    /// Keys are trimmed, lowercased, inner whitespace turned into `-`. Rows
    /// with fewer than two cells are ignored; a later row wins over an
    /// earlier one with the same key.
    #[must_use]
    pub fn read_block_config(&self) -> BTreeMap<String, ConfigValue> {
        let mut config = BTreeMap::new();
        for row in child_divs(&self.inner_html) {
            let cells = child_divs(row);
            let [key_cell, value_cell, ..] = cells.as_slice() else {
                continue;
            };
            let key = config_key(key_cell);
            if key.is_empty() {
                continue;
            }
            config.insert(key, cell_value(value_cell));
        }
        config
    }
}

/// Reads a block element (`<div class="product-list">…</div>`) into a
/// container. Input that is not a single wrapping element is placed inside an
/// anonymous `div`.
#[must_use]
pub fn parse_block(html: &str) -> Block {
    let trimmed = html.trim();
    if let Some(caps) = START_TAG_RE.captures(trimmed) {
        let tag = caps[1].to_ascii_lowercase();
        let start_end = caps.get(0).map_or(0, |m| m.end());
        let attrs = parse_attrs(caps.get(2).map_or("", |m| m.as_str()));

        let inner_end = if tag == "div" {
            matching_div_close(trimmed, start_end)
                .filter(|&(_, outer_end)| outer_end == trimmed.len())
                .map(|(inner_end, _)| inner_end)
        } else {
            let closing = format!("</{tag}>");
            trimmed
                .to_ascii_lowercase()
                .ends_with(&closing)
                .then(|| trimmed.len() - closing.len())
                .filter(|&end| end >= start_end)
        };

        if let Some(inner_end) = inner_end {
            return Block::new(tag, attrs, trimmed[start_end..inner_end].trim());
        }
    }
    Block::new("div", Vec::new(), trimmed)
}

/// Every `<div>` in a page document whose class list contains
/// `block_class`, in document order. Blocks nested inside a matched block
/// are not reported separately.
#[must_use]
pub fn find_blocks(page_html: &str, block_class: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut resume_at = 0;

    for caps in DIV_TAG_RE.captures_iter(page_html) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() < resume_at || !caps[1].is_empty() {
            continue;
        }
        let attrs = parse_attrs(caps.get(2).map_or("", |m| m.as_str()));
        let is_block = attr_value(&attrs, "class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == block_class));
        if !is_block {
            continue;
        }
        let Some((inner_end, outer_end)) = matching_div_close(page_html, whole.end()) else {
            tracing::warn!(block_class, offset = whole.start(), "unterminated block element");
            break;
        };
        blocks.push(Block::new(
            "div",
            attrs,
            page_html[whole.end()..inner_end].trim(),
        ));
        resume_at = outer_end;
    }

    blocks
}

/// Inner markup of each top-level `<div>` child of a fragment.
fn child_divs(html: &str) -> Vec<&str> {
    let mut children = Vec::new();
    let mut depth = 0usize;
    let mut open: Option<usize> = None;

    for caps in DIV_TAG_RE.captures_iter(html) {
        let Some(whole) = caps.get(0) else { continue };
        let is_close = !caps[1].is_empty();
        if is_close {
            if depth == 0 {
                continue;
            }
            depth -= 1;
            if depth == 0 {
                if let Some(start) = open.take() {
                    children.push(&html[start..whole.start()]);
                }
            }
        } else {
            if depth == 0 {
                open = Some(whole.end());
            }
            depth += 1;
        }
    }

    children
}

/// Finds the `</div>` closing the element whose start tag ends at `from`.
/// Returns `(start of closing tag, end of closing tag)`.
fn matching_div_close(html: &str, from: usize) -> Option<(usize, usize)> {
    let mut depth = 1usize;
    for caps in DIV_TAG_RE.captures_iter(&html[from..]) {
        let whole = caps.get(0)?;
        if caps[1].is_empty() {
            depth += 1;
        } else {
            depth -= 1;
            if depth == 0 {
                return Some((from + whole.start(), from + whole.end()));
            }
        }
    }
    None
}

fn cell_value(cell: &str) -> ConfigValue {
    let hrefs: Vec<String> = ANCHOR_RE
        .captures_iter(cell)
        .filter_map(|caps| {
            let attrs = parse_attrs(caps.get(1).map_or("", |m| m.as_str()));
            attr_value(&attrs, "href").map(str::to_owned)
        })
        .collect();
    if !hrefs.is_empty() {
        return single_or_list(hrefs);
    }

    let paragraphs: Vec<String> = PARAGRAPH_RE
        .captures_iter(cell)
        .map(|caps| text_content(caps.get(1).map_or("", |m| m.as_str())))
        .collect();
    if paragraphs.len() > 1 {
        return ConfigValue::List(paragraphs);
    }

    ConfigValue::Single(text_content(cell))
}

fn single_or_list(mut items: Vec<String>) -> ConfigValue {
    if items.len() == 1 {
        ConfigValue::Single(items.remove(0))
    } else {
        ConfigValue::List(items)
    }
}

fn config_key(cell: &str) -> String {
    WHITESPACE_RE
        .replace_all(&text_content(cell).to_lowercase(), "-")
        .into_owned()
}

fn dataset_key(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    let mut upper_next = false;
    for ch in raw.chars() {
        if ch == '-' {
            upper_next = true;
        } else if upper_next && ch.is_ascii_lowercase() {
            key.push(ch.to_ascii_uppercase());
            upper_next = false;
        } else {
            if upper_next {
                key.push('-');
            }
            key.push(ch);
            upper_next = false;
        }
    }
    if upper_next {
        key.push('-');
    }
    key
}

fn parse_attrs(raw: &str) -> Vec<(String, String)> {
    ATTR_RE
        .captures_iter(raw)
        .map(|caps| {
            let name = caps[1].to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or(String::new(), |m| decode_entities(m.as_str()));
            (name, value)
        })
        .collect()
}

fn attr_value<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

/// Visible text of a fragment: tags removed, entities decoded, whitespace
/// collapsed and trimmed.
fn text_content(html: &str) -> String {
    let stripped = TAG_RE.replace_all(html, "");
    let decoded = decode_entities(&stripped);
    WHITESPACE_RE.replace_all(decoded.trim(), " ").into_owned()
}

fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[cfg(test)]
#[path = "markup_test.rs"]
mod tests;
