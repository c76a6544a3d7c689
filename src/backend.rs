//! Recommendation backend abstraction
//!
//! Defines the Recommend trait consumed by the submission worker, the
//! RecommendError taxonomy, and the HTTP client that speaks the wire protocol.

use std::future::Future;

use thiserror::Error;

use crate::submission::Query;

pub mod client;

pub use client::{DEFAULT_BACKEND_URL, RecommendationClient};

/// Errors that can occur while asking the backend for recommendations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    /// The configured endpoint could not be used to build a client
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    /// Transport failure: unreachable host, timeout, connection reset
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status
    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    /// The response body was not the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Source of exercise suggestions for a query
///
/// Implementations must fail on any non-success outcome; callers never retry.
pub trait Recommend: Clone + Send + Sync + 'static {
    fn recommend(
        &self,
        query: Query,
    ) -> impl Future<Output = Result<Vec<String>, RecommendError>> + Send;
}
