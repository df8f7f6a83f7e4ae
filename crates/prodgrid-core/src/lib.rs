pub mod app_config;
pub mod config;
pub mod environment;
pub mod resolved;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use environment::Environment;
pub use resolved::{normalize_tag_list, normalize_tags, ResolvedConfig, LEGACY_ROOT_MARKER};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
