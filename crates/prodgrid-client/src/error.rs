use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid query endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

impl ClientError {
    /// `true` for failures of the transport or the remote endpoint, as opposed
    /// to a body that could not be read as JSON.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        !matches!(self, ClientError::Deserialize { .. })
    }
}
