//! Fixed query endpoints, one origin per environment.

use prodgrid_core::{AppConfig, Environment};

use super::QueryStrategy;

/// The four values that make up both endpoint templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryEndpoints {
    pub author_origin: String,
    pub publish_origin: String,
    pub legacy_path: String,
    pub modern_path: String,
}

impl QueryEndpoints {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            author_origin: config.author_origin.clone(),
            publish_origin: config.publish_origin.clone(),
            legacy_path: config.legacy_query_path.clone(),
            modern_path: config.modern_query_path.clone(),
        }
    }

    /// Base URL (origin + query path) for a strategy in an environment.
    #[must_use]
    pub fn base_for(&self, strategy: QueryStrategy, env: Environment) -> String {
        let origin = match env {
            Environment::Author => &self.author_origin,
            Environment::Publish => &self.publish_origin,
        };
        let path = match strategy {
            QueryStrategy::Legacy => &self.legacy_path,
            QueryStrategy::Modern => &self.modern_path,
        };
        format!("{}{}", origin.trim_end_matches('/'), path)
    }
}
