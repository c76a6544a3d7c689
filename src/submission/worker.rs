//! Recommendation worker thread
//!
//! Runs network calls on a background thread so the UI loop never blocks.
//! Receives tagged requests over a channel, runs each one as its own task on
//! a current-thread tokio runtime, and sends the tagged outcome back.

use std::io;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;

use super::Query;
use crate::backend::{Recommend, RecommendError};

/// Request sent from the controller to the worker
#[derive(Debug)]
pub struct RecommendRequest {
    pub query: Query,
    /// Generation of the submission that produced this request
    pub request_id: u64,
}

/// Outcome sent from the worker back to the controller
#[derive(Debug)]
pub struct RecommendResponse {
    pub request_id: u64,
    pub outcome: Result<Vec<String>, RecommendError>,
}

/// Spawn the recommendation worker thread
///
/// The worker runs until `cancel` fires or the request channel closes.
/// Requests are not serialized: a second request starts while the first
/// is still waiting on the backend.
pub fn spawn_worker<C: Recommend>(
    client: C,
    request_rx: UnboundedReceiver<RecommendRequest>,
    response_tx: Sender<RecommendResponse>,
    cancel: CancellationToken,
) -> io::Result<JoinHandle<()>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    std::thread::Builder::new()
        .name("asanas-worker".to_string())
        .spawn(move || {
            runtime.block_on(worker_loop(client, request_rx, response_tx, cancel));
            // Don't wait on resolver threads still busy with abandoned requests
            runtime.shutdown_background();
        })
}

/// Main worker loop - accepts requests until cancelled or disconnected
async fn worker_loop<C: Recommend>(
    client: C,
    mut request_rx: UnboundedReceiver<RecommendRequest>,
    response_tx: Sender<RecommendResponse>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                log::debug!("Recommendation worker cancelled");
                break;
            }
            request = request_rx.recv() => match request {
                Some(request) => {
                    log::debug!("Dispatching request {}", request.request_id);
                    tokio::spawn(handle_request(client.clone(), request, response_tx.clone()));
                }
                None => break,
            },
        }
    }

    log::debug!("Recommendation worker shutting down");
}

async fn handle_request<C: Recommend>(
    client: C,
    request: RecommendRequest,
    response_tx: Sender<RecommendResponse>,
) {
    let RecommendRequest { query, request_id } = request;
    let outcome = client.recommend(query).await;

    if response_tx
        .send(RecommendResponse {
            request_id,
            outcome,
        })
        .is_err()
    {
        log::debug!("Dropping response {} - controller is gone", request_id);
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
