//! asanas: suggest yoga asanas for a described symptom or disease
//!
//! The core is [`submission::SubmissionController`], which validates input,
//! debounces submits, hands requests to a background worker and exposes a
//! [`submission::SubmissionSnapshot`] for the terminal front end in [`app`].

pub mod app;
pub mod backend;
pub mod config;
pub mod error;
pub mod oneshot;
pub mod scroll;
pub mod submission;
