//! Shared domain types, configuration, and request-flow state for tweetsense.

pub mod app_config;
pub mod config;
pub mod flow;
pub mod types;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use flow::{Flow, FlowState, Ticket};
pub use types::{
    DistributionEntry, LeaderboardEntry, MixEntry, SampleRow, SentimentClass, TweetId,
};

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
