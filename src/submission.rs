//! Submission workflow
//!
//! Turns a user-initiated submit into exactly one debounced request to the
//! recommendation backend and exposes the resulting state for rendering.

pub mod controller;
pub mod debouncer;
pub mod query;
pub mod submission_state;
pub mod title_case;
pub mod worker;

// Re-export public types
pub use controller::{PollOutcome, SubmissionController};
pub use debouncer::Debouncer;
pub use query::{Query, QueryError};
pub use submission_state::{GENERIC_ERROR_MESSAGE, SubmissionSnapshot, SubmissionState};
pub use title_case::to_title_case;
