//! The per-render configuration derived from an authored block.

/// Path segment marking the historical content root served by the legacy
/// query. Matches both `/content/dam/luma3/...` and `/dam/luma3/...`.
pub const LEGACY_ROOT_MARKER: &str = "/dam/luma3";

/// Resolved block configuration.
///
/// `folder_path` is site-relative (never an absolute URL, never
/// `.html`-suffixed by the time it gets here). `is_legacy_mode` is derived
/// from it once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedConfig {
    folder_path: String,
    is_legacy_mode: bool,
    filter_tags: Vec<String>,
}

impl ResolvedConfig {
    #[must_use]
    pub fn new(folder_path: impl Into<String>, filter_tags: Vec<String>) -> Self {
        let folder_path = folder_path.into();
        // Substring test only. A folder that merely contains the marker
        // outside the intended root is classified as legacy too.
        let is_legacy_mode = folder_path.contains(LEGACY_ROOT_MARKER);
        Self {
            folder_path,
            is_legacy_mode,
            filter_tags,
        }
    }

    #[must_use]
    pub fn folder_path(&self) -> &str {
        &self.folder_path
    }

    #[must_use]
    pub fn is_legacy_mode(&self) -> bool {
        self.is_legacy_mode
    }

    #[must_use]
    pub fn filter_tags(&self) -> &[String] {
        &self.filter_tags
    }
}

/// Splits a comma-separated tag string into trimmed, non-empty tags,
/// preserving order.
#[must_use]
pub fn normalize_tags(raw: &str) -> Vec<String> {
    normalize_tag_list(raw.split(','))
}

/// Trims an already-split tag sequence and drops blank entries.
pub fn normalize_tag_list<'a, I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    items
        .into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}
