mod app_events;
mod app_render;
mod app_state;

// Re-export public types
pub use app_render::{RESULTS_HEADING, TITLE, WAITING_TEXT};
pub use app_state::{App, FRAME_INTERVAL};
