//! HTTP client for the recommendation endpoint
//!
//! POSTs `{"content": "<query>"}` and expects `{"recommended_asans": [...]}`
//! back. Any non-2xx status or a body without that field is an error.

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::{Recommend, RecommendError};
use crate::submission::Query;

/// Endpoint used when neither the config file nor the command line set one
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Serialize)]
struct RecommendRequestBody<'a> {
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct RecommendResponseBody {
    recommended_asans: Vec<String>,
}

/// reqwest-backed recommendation client
#[derive(Debug, Clone)]
pub struct RecommendationClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl RecommendationClient {
    /// Create a client for the given endpoint URL
    ///
    /// A `timeout` of None leaves requests unbounded.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, RecommendError> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| RecommendError::InvalidUrl(format!("{endpoint}: {e}")))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| RecommendError::InvalidUrl(e.to_string()))?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn post(&self, query: &Query) -> Result<Vec<String>, RecommendError> {
        let body = RecommendRequestBody {
            content: query.as_str(),
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| RecommendError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RecommendError::Api {
                code: status.as_u16(),
                message,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RecommendError::Network(e.to_string()))?;

        let parsed: RecommendResponseBody =
            serde_json::from_slice(&bytes).map_err(|e| RecommendError::Parse(e.to_string()))?;

        Ok(parsed.recommended_asans)
    }
}

impl Recommend for RecommendationClient {
    async fn recommend(&self, query: Query) -> Result<Vec<String>, RecommendError> {
        log::debug!("POST {} for query {:?}", self.endpoint, query.as_str());
        self.post(&query).await
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;
