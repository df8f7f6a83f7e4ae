use crate::environment::Environment;

/// Default persisted-query path for folders under the legacy content root.
pub const DEFAULT_LEGACY_QUERY_PATH: &str = "/graphql/execute.json/luma3/productsByPath";

/// Default persisted-query path for category-tagged folders.
pub const DEFAULT_MODERN_QUERY_PATH: &str = "/graphql/execute.json/luma3/productsByCategory";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub author_origin: String,
    pub publish_origin: String,
    pub legacy_query_path: String,
    pub modern_query_path: String,
    /// `None` means "detect from the page host".
    pub env: Option<Environment>,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

