use thiserror::Error;

use crate::backend::RecommendError;
use crate::submission::QueryError;

/// Custom error types for asanas
#[derive(Debug, Error)]
pub enum AsanasError {
    #[error(transparent)]
    Validation(#[from] QueryError),

    #[error(transparent)]
    Backend(#[from] RecommendError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
