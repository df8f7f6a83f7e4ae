//! Authored block → [`ResolvedConfig`].
//!
//! Both lookups are ordered rule lists; the first rule yielding a non-empty
//! value wins. Nothing here fails: missing inputs degrade to an empty path
//! and no tags.

use std::collections::BTreeMap;

use prodgrid_core::{normalize_tag_list, normalize_tags, ResolvedConfig};

use crate::markup::{Anchor, AuthoredBlock, ConfigValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderRule {
    AnchorHref,
    AnchorText,
    ConfigKey(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRule {
    Dataset(&'static str),
    ConfigKey(&'static str),
}

pub const FOLDER_RULES: [FolderRule; 5] = [
    FolderRule::AnchorHref,
    FolderRule::AnchorText,
    FolderRule::ConfigKey("folder"),
    FolderRule::ConfigKey("reference"),
    FolderRule::ConfigKey("path"),
];

pub const TAG_RULES: [TagRule; 3] = [
    TagRule::Dataset("cqTags"),
    TagRule::ConfigKey("tags"),
    TagRule::ConfigKey("cq:tags"),
];

#[must_use]
pub fn resolve_config(block: &AuthoredBlock) -> ResolvedConfig {
    let config = block.read_block_config();
    let anchor = block.first_anchor();
    let dataset = block.dataset();

    let raw_folder = FOLDER_RULES
        .iter()
        .find_map(|rule| folder_candidate(*rule, anchor.as_ref(), &config))
        .unwrap_or_default();

    let tags = TAG_RULES
        .iter()
        .find_map(|rule| tag_candidate(*rule, &dataset, &config))
        .unwrap_or_default();

    ResolvedConfig::new(normalize_folder_reference(&raw_folder), tags)
}

fn folder_candidate(
    rule: FolderRule,
    anchor: Option<&Anchor>,
    config: &BTreeMap<String, ConfigValue>,
) -> Option<String> {
    let value = match rule {
        FolderRule::AnchorHref => anchor.map(|a| a.href.as_str()),
        FolderRule::AnchorText => anchor.map(|a| a.text.as_str()),
        FolderRule::ConfigKey(key) => config.get(key).and_then(ConfigValue::first),
    };
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

fn tag_candidate(
    rule: TagRule,
    dataset: &BTreeMap<String, String>,
    config: &BTreeMap<String, ConfigValue>,
) -> Option<Vec<String>> {
    let tags = match rule {
        TagRule::Dataset(key) => dataset.get(key).map(|v| normalize_tags(v))?,
        TagRule::ConfigKey(key) => match config.get(key)? {
            ConfigValue::Single(v) => normalize_tags(v),
            ConfigValue::List(items) => normalize_tag_list(items.iter().map(String::as_str)),
        },
    };
    (!tags.is_empty()).then_some(tags)
}

/// Reduces an authored folder reference to a site-relative path.
///
/// Absolute URLs keep only their path (a reference that fails to parse is
/// kept as written), then one trailing `.html` is removed.
#[must_use]
pub fn normalize_folder_reference(raw: &str) -> String {
    let mut path = raw.trim().to_owned();

    if path.starts_with("http") {
        match reqwest::Url::parse(&path) {
            Ok(url) => path = url.path().to_owned(),
            Err(e) => {
                tracing::debug!(reference = %path, error = %e, "folder reference is not a valid URL; using as-is");
            }
        }
    }

    if let Some(stripped) = path.strip_suffix(".html") {
        path = stripped.to_owned();
    }

    path
}
