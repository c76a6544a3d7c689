//! Non-interactive mode: one query, one request, results on stdout

use crate::backend::{Recommend, RecommendationClient};
use crate::config::BackendConfig;
use crate::error::AsanasError;
use crate::submission::{Query, to_title_case};

/// Validate `raw`, ask the backend once and title-case the answer
///
/// No debounce applies here; there is exactly one request per call.
pub fn recommend_once(raw: &str, backend: &BackendConfig) -> Result<Vec<String>, AsanasError> {
    let query = Query::parse(raw)?;
    let client = RecommendationClient::new(&backend.url, backend.timeout())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let identifiers = runtime.block_on(client.recommend(query))?;
    Ok(identifiers.iter().map(|id| to_title_case(id)).collect())
}
