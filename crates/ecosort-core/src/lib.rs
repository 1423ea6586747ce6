pub mod app_config;
pub mod config;
pub mod discovery;
pub mod facility;
pub mod filters;

pub use app_config::AppConfig;
pub use config::{
    load_app_config, load_app_config_from_env, DEFAULT_MAX_RESULTS, DEFAULT_OVERPASS_URL,
    DEFAULT_QUERY_TIMEOUT_SECS, DEFAULT_SEARCH_RADIUS_M, DEFAULT_USER_AGENT,
};
pub use discovery::{DiscoverySession, DiscoveryStatus, ErrorKind, FacilitySource};
pub use facility::{Coordinate, FacilityId, FacilityRecord};
pub use filters::{load_filter_rules, FilterRule, FilterRules};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read filter rules file {path}: {source}")]
    FilterRulesIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse filter rules file: {0}")]
    FilterRulesParse(#[from] serde_yaml::Error),

    #[error("filter rules validation failed: {0}")]
    Validation(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
