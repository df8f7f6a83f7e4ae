//! Query strategy selection.

use prodgrid_core::ResolvedConfig;

/// Which persisted query a render uses. Exactly one runs per render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStrategy {
    /// Historical folder query: `_path` only, never filtered by tag.
    Legacy,
    /// Category query: `_path` plus an optional comma-joined `category`.
    Modern,
}

impl QueryStrategy {
    #[must_use]
    pub fn for_config(config: &ResolvedConfig) -> Self {
        if config.is_legacy_mode() {
            QueryStrategy::Legacy
        } else {
            QueryStrategy::Modern
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QueryStrategy::Legacy => "legacy",
            QueryStrategy::Modern => "modern",
        }
    }
}
