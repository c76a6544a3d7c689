use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::app_state::App;
use crate::submission::{QueryError, SubmissionSnapshot};

pub const TITLE: &str = "Asana Suggester";
pub const RESULTS_HEADING: &str = "Recommended Asanas:";
pub const WAITING_TEXT: &str = "Please wait...";

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const HELP_TEXT: &str = "Enter: submit  ↑/↓ PgUp/PgDn: scroll  Esc: quit";

impl App {
    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let snapshot = self.controller.snapshot();

        let [title_area, input_area, message_area, body_area, status_area] = Layout::vertical([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Input field
            Constraint::Length(1), // Validation message
            Constraint::Min(3),    // Results, spinner, error
            Constraint::Length(1), // Status bar
        ])
        .areas(frame.area());

        render_title(frame, title_area);
        self.render_input(frame, input_area, &snapshot);
        render_validation(frame, message_area, &snapshot);
        self.render_body(frame, body_area, &snapshot);
        self.render_status(frame, status_area);
    }

    fn render_input(&mut self, frame: &mut Frame, area: Rect, snapshot: &SubmissionSnapshot) {
        let border_color = if snapshot.is_input_invalid {
            Color::Red
        } else {
            Color::Cyan
        };

        self.input.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Disease ")
                .border_style(Style::default().fg(border_color)),
        );

        frame.render_widget(&self.input, area);
    }

    fn render_body(&mut self, frame: &mut Frame, area: Rect, snapshot: &SubmissionSnapshot) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Results ")
            .border_style(Style::default().fg(Color::DarkGray));

        let inner_width = area.width.saturating_sub(2) as usize;
        let inner_height = area.height.saturating_sub(2);
        let lines = body_lines(snapshot, inner_width, self.frame_count);

        self.results_scroll.update_bounds(lines.len(), inner_height);

        let content = Paragraph::new(lines)
            .block(block)
            .scroll((self.results_scroll.offset, 0));

        frame.render_widget(content, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.config_warning {
            Some(warning) => Line::styled(
                truncate_to_width(warning, area.width as usize),
                Style::default().fg(Color::Yellow),
            ),
            None => Line::styled(HELP_TEXT, Style::default().fg(Color::DarkGray)),
        };

        frame.render_widget(Paragraph::new(line), area);
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(TITLE)
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(title, area);
}

fn render_validation(frame: &mut Frame, area: Rect, snapshot: &SubmissionSnapshot) {
    if !snapshot.is_input_invalid {
        return;
    }

    let message =
        Paragraph::new(QueryError::Empty.to_string()).style(Style::default().fg(Color::Red));
    frame.render_widget(message, area);
}

/// Lines for the results pane: result list, then spinner, then error
pub(crate) fn body_lines(
    snapshot: &SubmissionSnapshot,
    max_width: usize,
    frame_count: u64,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if !snapshot.results.is_empty() {
        lines.push(Line::styled(
            RESULTS_HEADING,
            Style::default().add_modifier(Modifier::BOLD),
        ));
        for result in &snapshot.results {
            let item = format!("  • {result}");
            lines.push(Line::from(truncate_to_width(&item, max_width)));
        }
    }

    if snapshot.is_pending {
        let spinner = SPINNER_FRAMES[(frame_count % SPINNER_FRAMES.len() as u64) as usize];
        lines.push(Line::from(vec![
            Span::styled(spinner, Style::default().fg(Color::Cyan)),
            Span::raw(" "),
            Span::raw(WAITING_TEXT),
        ]));
    }

    if let Some(error) = &snapshot.error_message {
        lines.push(Line::styled(error.clone(), Style::default().fg(Color::Red)));
    }

    lines
}

/// Cut `text` to at most `max_width` display columns, marking the cut with '…'
pub(crate) fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > budget {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out.push('…');
    out
}

#[cfg(test)]
#[path = "app_render_tests.rs"]
mod app_render_tests;
