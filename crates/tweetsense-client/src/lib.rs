//! HTTP client for the tweet sentiment prediction and analytics service.

pub mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::ClientError;
pub use types::{
    BatchPredictResponse, ExploreRequest, ExploreResponse, HealthResponse, MetaResponse,
    PredictResponse,
};
