use std::time::{Duration, Instant};

use ratatui::style::Style;
use tui_textarea::{CursorMove, TextArea};

use crate::backend::RecommendationClient;
use crate::config::Config;
use crate::error::AsanasError;
use crate::scroll::ScrollState;
use crate::submission::{PollOutcome, SubmissionController};

/// Upper bound on how long the loop waits for input, keeps the spinner moving
pub const FRAME_INTERVAL: Duration = Duration::from_millis(80);

/// Application state
pub struct App {
    pub input: TextArea<'static>,
    pub controller: SubmissionController,
    pub results_scroll: ScrollState,
    pub frame_count: u64,
    /// Problem found while loading the config file, shown in the status bar
    pub config_warning: Option<String>,
    pub should_quit: bool,
}

impl App {
    /// Create a new App around an existing controller
    pub fn new(controller: SubmissionController, config_warning: Option<String>) -> Self {
        Self {
            input: new_input(),
            controller,
            results_scroll: ScrollState::new(),
            frame_count: 0,
            config_warning,
            should_quit: false,
        }
    }

    /// Build the HTTP client and worker described by `config`
    pub fn from_config(
        config: &Config,
        config_warning: Option<String>,
    ) -> Result<Self, AsanasError> {
        let client = RecommendationClient::new(&config.backend.url, config.backend.timeout())?;
        log::info!("Recommendation endpoint: {}", client.endpoint());
        let controller = SubmissionController::with_client(
            client,
            config.submission.debounce_ms,
            config.submission.stale_responses,
        )?;
        Ok(Self::new(controller, config_warning))
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Get the current query text
    pub fn query(&self) -> &str {
        self.input.lines().first().map(String::as_str).unwrap_or("")
    }

    /// Submit whatever is in the input field
    pub fn submit(&mut self) {
        let text = self.query().to_string();
        self.controller.submit(&text);
        self.results_scroll.reset();
    }

    /// Advance timers and pick up responses; call once per loop iteration
    pub fn tick(&mut self) -> PollOutcome {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> PollOutcome {
        self.frame_count = self.frame_count.wrapping_add(1);
        let outcome = self.controller.poll_at(now);

        if outcome.succeeded {
            self.results_scroll.reset();
        }
        // The controller clears its query on success; mirror that into the field.
        // Text typed while the request was in flight is dropped along with it.
        if self.controller.query() != self.query() {
            let text = self.controller.query().to_string();
            self.set_input_text(&text);
        }

        outcome
    }

    /// How long the event loop may block waiting for input
    pub fn next_poll_timeout(&self, now: Instant) -> Duration {
        match self.controller.time_until_dispatch(now) {
            Some(until_dispatch) => until_dispatch.min(FRAME_INTERVAL),
            None => FRAME_INTERVAL,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
        self.controller.shutdown();
    }

    pub(crate) fn set_input_text(&mut self, text: &str) {
        self.input.move_cursor(CursorMove::End);
        self.input.delete_line_by_head();
        self.input.insert_str(text);
    }
}

/// Border is set at render time, it depends on validation state
fn new_input() -> TextArea<'static> {
    let mut textarea = TextArea::default();

    // Remove default underline from cursor line
    textarea.set_cursor_line_style(Style::default());
    textarea.set_placeholder_text("Enter Disease");

    textarea
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod app_state_tests;
