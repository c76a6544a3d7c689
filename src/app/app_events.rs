use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app_state::App;

impl App {
    /// Wait up to `timeout` for a terminal event and handle it
    pub fn handle_events(&mut self, timeout: Duration) -> io::Result<()> {
        if !event::poll(timeout)? {
            return Ok(());
        }

        match event::read()? {
            // Check that it's a key press event to avoid duplicates
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event);
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle key press events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.quit(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),

            KeyCode::Enter => self.submit(),
            // The textarea would insert a newline for these; the field is single-line
            KeyCode::Char('m') | KeyCode::Char('j')
                if key.modifiers.contains(KeyModifiers::CONTROL) => {}

            // Results navigation
            KeyCode::Up => self.results_scroll.scroll_up(1),
            KeyCode::Down => self.results_scroll.scroll_down(1),
            KeyCode::PageUp => self.results_scroll.page_up(),
            KeyCode::PageDown => self.results_scroll.page_down(),

            // Everything else edits the input field
            _ => {
                if self.input.input(key) {
                    self.sync_query();
                }
            }
        }
    }

    fn sync_query(&mut self) {
        let text = self.query().to_string();
        self.controller.set_query(&text);
    }
}

#[cfg(test)]
#[path = "app_events_tests.rs"]
mod app_events_tests;
