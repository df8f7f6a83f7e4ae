//! HTTP client for the product persisted queries.

mod encode;
mod endpoints;
mod strategy;

use std::time::Duration;

use prodgrid_core::{Environment, ResolvedConfig};
use reqwest::Client;

use crate::error::ClientError;
use crate::types::{extract_items, RawProductRecord};

pub use encode::encode_query_value;
pub use endpoints::QueryEndpoints;
pub use strategy::QueryStrategy;

const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// HTTP client for the product query endpoints.
///
/// Every request carries no-cache headers so each render sees live
/// repository state. No retries are attempted; the only timeout is the one
/// configured on the underlying `reqwest::Client`.
pub struct ProductClient {
    client: Client,
    endpoints: QueryEndpoints,
}

impl ProductClient {
    /// Creates a `ProductClient` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        endpoints: QueryEndpoints,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, endpoints })
    }

    /// Fetches the product records for a resolved block configuration.
    ///
    /// The strategy is chosen solely by [`ResolvedConfig::is_legacy_mode`].
    /// A response without `data.productsModelList.items` is `Ok(vec![])`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidEndpoint`]: the configured endpoint cannot be parsed.
    /// - [`ClientError::Http`]: network or TLS failure.
    /// - [`ClientError::UnexpectedStatus`]: any non-2xx status.
    /// - [`ClientError::Deserialize`]: response body is not valid JSON.
    pub async fn fetch_products(
        &self,
        config: &ResolvedConfig,
        env: Environment,
    ) -> Result<Vec<RawProductRecord>, ClientError> {
        let strategy = QueryStrategy::for_config(config);
        let url = self.query_url(config, env)?;

        tracing::debug!(
            strategy = strategy.as_str(),
            %env,
            folder_path = config.folder_path(),
            url = %url,
            "fetching products"
        );

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::CACHE_CONTROL, NO_CACHE)
            .header(reqwest::header::PRAGMA, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<serde_json::Value>(&body).map_err(|e| {
            ClientError::Deserialize {
                context: format!("{} products query for {}", strategy.as_str(), config.folder_path()),
                source: e,
            }
        })?;

        let items = extract_items(&parsed);
        tracing::debug!(strategy = strategy.as_str(), count = items.len(), "products fetched");
        Ok(items)
    }

    /// Builds the request URL for a resolved configuration.
    ///
    /// Legacy folders get `_path` only; tags are ignored even when present.
    /// Modern folders get `_path` and, when at least one tag is present, a
    /// comma-joined `category`. Values are encoded like `encodeURIComponent`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidEndpoint`] if the configured origin and
    /// query path do not form a valid URL.
    pub fn query_url(
        &self,
        config: &ResolvedConfig,
        env: Environment,
    ) -> Result<reqwest::Url, ClientError> {
        let strategy = QueryStrategy::for_config(config);
        let base = self.endpoints.base_for(strategy, env);
        let mut url = reqwest::Url::parse(&base).map_err(|e| ClientError::InvalidEndpoint {
            endpoint: base.clone(),
            reason: e.to_string(),
        })?;

        let mut query = format!("_path={}", encode_query_value(config.folder_path()));
        if strategy == QueryStrategy::Modern && !config.filter_tags().is_empty() {
            query.push_str("&category=");
            query.push_str(&encode_query_value(&config.filter_tags().join(",")));
        }
        url.set_query(Some(&query));

        Ok(url)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
