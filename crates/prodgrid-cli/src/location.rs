//! Interpreting the `--location` argument.

use prodgrid_core::Environment;

/// Page location split into the parts the renderer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageLocation {
    pub host: Option<String>,
    pub path: String,
}

impl PageLocation {
    /// Accepts either a site path (`/us/en/men`) or a full page URL.
    pub(crate) fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match reqwest::Url::parse(raw) {
            Ok(url) if url.host_str().is_some() => Self {
                host: url.host_str().map(str::to_owned),
                path: url.path().to_owned(),
            },
            _ => Self {
                host: None,
                path: raw.to_owned(),
            },
        }
    }

    /// Explicit flag, then configured environment, then the page host.
    /// A bare path with nothing configured renders as published.
    pub(crate) fn environment(
        &self,
        flag: Option<Environment>,
        configured: Option<Environment>,
    ) -> Environment {
        flag.or(configured).unwrap_or_else(|| {
            self.host
                .as_deref()
                .map_or(Environment::Publish, Environment::detect_from_host)
        })
    }
}
