//! Submission controller
//!
//! Owns the query text, the debounce slot and the submission state, and
//! drives the request lifecycle: validate, reset, debounce, dispatch, apply.
//! The UI thread calls `submit` on user action and `poll` on every loop
//! iteration; nothing else mutates the state.

use std::io;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};
use tokio_util::sync::CancellationToken;

use super::debouncer::Debouncer;
use super::query::Query;
use super::submission_state::{GENERIC_ERROR_MESSAGE, SubmissionSnapshot, SubmissionState};
use super::title_case::to_title_case;
use super::worker::{RecommendRequest, RecommendResponse, spawn_worker};
use crate::backend::Recommend;
use crate::config::StaleResponsePolicy;

/// A submission waiting for its debounce window to close
#[derive(Debug)]
struct PendingSubmission {
    query: Query,
    request_id: u64,
}

/// What happened during a single `poll`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollOutcome {
    /// The debounce timer fired and a request went out
    pub dispatched: bool,
    /// A successful response was applied
    pub succeeded: bool,
    /// A failure was applied
    pub failed: bool,
    /// Responses dropped because a newer submission exists
    pub discarded: usize,
}

pub struct SubmissionController {
    query_text: String,
    state: SubmissionState,
    /// What was on screen when the current `InputInvalid` began
    before_invalid: SubmissionState,
    debouncer: Debouncer<PendingSubmission>,
    stale_responses: StaleResponsePolicy,
    /// Generation of the most recent non-empty submit
    request_id: u64,
    in_flight: usize,
    request_tx: Option<UnboundedSender<RecommendRequest>>,
    response_rx: Option<Receiver<RecommendResponse>>,
    worker_cancel: Option<CancellationToken>,
    worker_thread: Option<JoinHandle<()>>,
    shut_down: bool,
}

impl SubmissionController {
    /// Create a controller with no worker attached
    ///
    /// Use `set_channels` to connect it, or `with_client` to spawn a worker.
    pub fn new(debounce_ms: u64, stale_responses: StaleResponsePolicy) -> Self {
        Self {
            query_text: String::new(),
            state: SubmissionState::Idle,
            before_invalid: SubmissionState::Idle,
            debouncer: Debouncer::new(debounce_ms),
            stale_responses,
            request_id: 0,
            in_flight: 0,
            request_tx: None,
            response_rx: None,
            worker_cancel: None,
            worker_thread: None,
            shut_down: false,
        }
    }

    /// Create a controller backed by a worker thread talking to `client`
    pub fn with_client<C: Recommend>(
        client: C,
        debounce_ms: u64,
        stale_responses: StaleResponsePolicy,
    ) -> io::Result<Self> {
        let (request_tx, request_rx) = unbounded_channel();
        let (response_tx, response_rx) = mpsc::channel();
        let cancel = CancellationToken::new();

        let handle = spawn_worker(client, request_rx, response_tx, cancel.clone())?;

        let mut controller = Self::new(debounce_ms, stale_responses);
        controller.set_channels(request_tx, response_rx, cancel);
        controller.worker_thread = Some(handle);
        Ok(controller)
    }

    /// Connect the controller to a worker
    pub fn set_channels(
        &mut self,
        request_tx: UnboundedSender<RecommendRequest>,
        response_rx: Receiver<RecommendResponse>,
        worker_cancel: CancellationToken,
    ) {
        self.request_tx = Some(request_tx);
        self.response_rx = Some(response_rx);
        self.worker_cancel = Some(worker_cancel);
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn query(&self) -> &str {
        &self.query_text
    }

    /// Mirror the text currently in the input field
    pub fn set_query(&mut self, text: &str) {
        if self.query_text != text {
            self.query_text = text.to_string();
        }
    }

    pub fn snapshot(&self) -> SubmissionSnapshot {
        if !self.state.is_input_invalid() {
            return SubmissionSnapshot::new(&self.query_text, &self.state);
        }

        // A rejected submit leaves results, error and spinner as they were
        let mut snapshot = SubmissionSnapshot::new(&self.query_text, &self.before_invalid);
        snapshot.is_input_invalid = true;
        snapshot.is_pending = self.debouncer.is_armed() || self.in_flight > 0;
        snapshot
    }

    pub fn has_pending_timer(&self) -> bool {
        self.debouncer.is_armed()
    }

    /// How long the event loop may sleep before the timer needs a poll
    pub fn time_until_dispatch(&self, now: Instant) -> Option<Duration> {
        self.debouncer.time_until_due(now)
    }

    pub fn submit(&mut self, raw: &str) {
        self.submit_at(raw, Instant::now());
    }

    /// Handle a submit action at time `now`
    ///
    /// Empty or whitespace-only text only flags the input as invalid. Any
    /// timer already armed is left alone in that case.
    pub fn submit_at(&mut self, raw: &str, now: Instant) {
        if self.shut_down {
            return;
        }
        self.set_query(raw);

        let query = match Query::parse(raw) {
            Ok(query) => query,
            Err(e) => {
                log::debug!("Rejected submit: {}", e);
                if !self.state.is_input_invalid() {
                    self.before_invalid =
                        std::mem::replace(&mut self.state, SubmissionState::InputInvalid);
                }
                return;
            }
        };

        self.state = SubmissionState::Pending;
        self.before_invalid = SubmissionState::Idle;
        self.request_id = self.request_id.wrapping_add(1);
        let request_id = self.request_id;

        let pending = PendingSubmission { query, request_id };
        if let Some(cancelled) = self.debouncer.schedule(now, pending) {
            log::debug!("Cancelled debounce timer for request {}", cancelled.request_id);
        }
        log::debug!(
            "Armed debounce timer for request {} ({:?})",
            request_id,
            self.debouncer.delay()
        );
    }

    pub fn poll(&mut self) -> PollOutcome {
        self.poll_at(Instant::now())
    }

    /// Fire the debounce timer if due and apply any responses that arrived
    pub fn poll_at(&mut self, now: Instant) -> PollOutcome {
        let mut outcome = PollOutcome::default();
        if self.shut_down {
            return outcome;
        }

        if let Some(pending) = self.debouncer.fire_if_due(now) {
            self.dispatch(pending, &mut outcome);
        }

        while let Some(response) = self.next_response() {
            self.apply_response(response, &mut outcome);
        }

        outcome
    }

    fn next_response(&mut self) -> Option<RecommendResponse> {
        let rx = self.response_rx.as_ref()?;
        match rx.try_recv() {
            Ok(response) => Some(response),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                log::debug!("Response channel closed");
                self.response_rx = None;
                None
            }
        }
    }

    fn dispatch(&mut self, pending: PendingSubmission, outcome: &mut PollOutcome) {
        let PendingSubmission { query, request_id } = pending;

        let sent = match &self.request_tx {
            Some(tx) => tx.send(RecommendRequest { query, request_id }).is_ok(),
            None => false,
        };

        if sent {
            log::debug!("Sent request {}", request_id);
            self.in_flight += 1;
            outcome.dispatched = true;
        } else {
            log::warn!(
                "Request {} not sent: recommendation worker is not running",
                request_id
            );
            self.state = SubmissionState::Failed(GENERIC_ERROR_MESSAGE.to_string());
            outcome.failed = true;
        }
    }

    fn apply_response(&mut self, response: RecommendResponse, outcome: &mut PollOutcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let RecommendResponse {
            request_id,
            outcome: result,
        } = response;

        if self.stale_responses == StaleResponsePolicy::Discard && request_id != self.request_id {
            log::debug!(
                "Discarding response {} (latest is {})",
                request_id,
                self.request_id
            );
            outcome.discarded += 1;
            return;
        }

        match result {
            Ok(identifiers) => {
                let results = identifiers.iter().map(|id| to_title_case(id)).collect();
                log::debug!("Applied response {}", request_id);
                self.state = SubmissionState::Success(results);
                self.query_text.clear();
                outcome.succeeded = true;
            }
            Err(e) => {
                log::warn!("Recommendation request {} failed: {}", request_id, e);
                self.state = SubmissionState::Failed(GENERIC_ERROR_MESSAGE.to_string());
                outcome.failed = true;
            }
        }
    }

    /// Cancel the pending timer and stop the worker
    ///
    /// Safe to call more than once. After this, `submit` and `poll` do nothing.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;

        if let Some(cancelled) = self.debouncer.cancel() {
            log::debug!(
                "Cancelled debounce timer for request {} on shutdown",
                cancelled.request_id
            );
        }
        if let Some(cancel) = self.worker_cancel.take() {
            cancel.cancel();
        }
        self.request_tx = None;
        self.response_rx = None;
        // The worker exits on its own once cancelled; no need to block on it
        self.worker_thread = None;
    }
}

impl Drop for SubmissionController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
