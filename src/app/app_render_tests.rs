//! Tests for UI rendering

use super::*;
use crate::backend::RecommendError;
use crate::submission::GENERIC_ERROR_MESSAGE;
use crate::submission::worker::RecommendResponse;
use crate::test_utils::test_helpers::{buffer_text, render_app, test_app, wired_app};
use std::time::{Duration, Instant};

const TEST_WIDTH: u16 = 80;
const TEST_HEIGHT: u16 = 24;

fn snapshot_with(results: &[&str], pending: bool, error: Option<&str>) -> SubmissionSnapshot {
    SubmissionSnapshot {
        query_text: String::new(),
        is_input_invalid: false,
        is_pending: pending,
        results: results.iter().map(|s| s.to_string()).collect(),
        error_message: error.map(str::to_string),
    }
}

fn line_text(line: &Line) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

#[test]
fn test_idle_screen() {
    let mut app = test_app();
    let text = buffer_text(&render_app(&mut app, TEST_WIDTH, TEST_HEIGHT));

    assert!(text.contains(TITLE));
    assert!(text.contains("Enter Disease"));
    assert!(text.contains("Esc: quit"));
    assert!(!text.contains(RESULTS_HEADING));
    assert!(!text.contains(WAITING_TEXT));
}

#[test]
fn test_invalid_input_shows_message_and_red_border() {
    let mut app = test_app();
    app.submit();

    let buffer = render_app(&mut app, TEST_WIDTH, TEST_HEIGHT);
    let text = buffer_text(&buffer);

    assert!(text.contains("Please enter the disease name"));
    // Input box starts below the 3-line title
    assert_eq!(buffer[(0, 3)].fg, Color::Red);
}

#[test]
fn test_valid_input_border_is_not_red() {
    let mut app = test_app();
    let buffer = render_app(&mut app, TEST_WIDTH, TEST_HEIGHT);
    assert_eq!(buffer[(0, 3)].fg, Color::Cyan);
}

#[test]
fn test_pending_shows_spinner() {
    let mut app = test_app();
    app.set_input_text("back pain");
    app.submit();

    let text = buffer_text(&render_app(&mut app, TEST_WIDTH, TEST_HEIGHT));

    assert!(text.contains(WAITING_TEXT));
    assert!(text.contains(SPINNER_FRAMES[0]));
}

#[test]
fn test_results_are_listed() {
    let mut wired = wired_app();
    let start = Instant::now();
    wired.app.controller.submit_at("back pain", start);
    wired.app.tick_at(start + Duration::from_millis(500));
    wired
        .responses
        .send(RecommendResponse {
            request_id: 1,
            outcome: Ok(vec!["downward dog".to_string(), "WARRIOR POSE".to_string()]),
        })
        .unwrap();
    wired.app.tick_at(start + Duration::from_millis(600));

    let text = buffer_text(&render_app(&mut wired.app, TEST_WIDTH, TEST_HEIGHT));

    assert!(text.contains(RESULTS_HEADING));
    assert!(text.contains("• Downward Dog"));
    assert!(text.contains("• Warrior Pose"));
    assert!(!text.contains(WAITING_TEXT));
}

#[test]
fn test_failure_shows_generic_message_only() {
    let mut wired = wired_app();
    let start = Instant::now();
    wired.app.controller.submit_at("back pain", start);
    wired.app.tick_at(start + Duration::from_millis(500));
    wired
        .responses
        .send(RecommendResponse {
            request_id: 1,
            outcome: Err(RecommendError::Api {
                code: 502,
                message: "upstream exploded".to_string(),
            }),
        })
        .unwrap();
    wired.app.tick_at(start + Duration::from_millis(600));

    let text = buffer_text(&render_app(&mut wired.app, TEST_WIDTH, TEST_HEIGHT));

    assert!(text.contains(GENERIC_ERROR_MESSAGE));
    assert!(!text.contains("upstream exploded"));
    assert!(!text.contains("502"));
}

#[test]
fn test_config_warning_replaces_help() {
    let mut app = test_app();
    app.config_warning = Some("Invalid config file; using defaults".to_string());

    let text = buffer_text(&render_app(&mut app, TEST_WIDTH, TEST_HEIGHT));

    assert!(text.contains("Invalid config file; using defaults"));
    assert!(!text.contains("Esc: quit"));
}

#[test]
fn test_render_updates_scroll_bounds() {
    let mut app = test_app();
    render_app(&mut app, TEST_WIDTH, TEST_HEIGHT);
    // 24 rows - title 3 - input 3 - message 1 - status 1 - borders 2
    assert_eq!(app.results_scroll.viewport_height, 14);
    assert_eq!(app.results_scroll.max_offset, 0);
}

#[test]
fn test_body_lines_order() {
    let snapshot = snapshot_with(&["Tree Pose"], true, Some(GENERIC_ERROR_MESSAGE));
    let lines = body_lines(&snapshot, 80, 0);
    let texts: Vec<String> = lines.iter().map(line_text).collect();

    assert_eq!(texts[0], RESULTS_HEADING);
    assert_eq!(texts[1], "  • Tree Pose");
    assert!(texts[2].ends_with(WAITING_TEXT));
    assert_eq!(texts[3], GENERIC_ERROR_MESSAGE);
}

#[test]
fn test_body_lines_empty_when_idle() {
    let snapshot = snapshot_with(&[], false, None);
    assert!(body_lines(&snapshot, 80, 0).is_empty());
}

#[test]
fn test_spinner_cycles_with_frame_count() {
    let snapshot = snapshot_with(&[], true, None);
    let first = line_text(&body_lines(&snapshot, 80, 0)[0]);
    let second = line_text(&body_lines(&snapshot, 80, 1)[0]);
    let wrapped = line_text(&body_lines(&snapshot, 80, SPINNER_FRAMES.len() as u64)[0]);

    assert_ne!(first, second);
    assert_eq!(first, wrapped);
}

#[test]
fn test_long_results_are_truncated() {
    let long = "a".repeat(100);
    let snapshot = snapshot_with(&[&long], false, None);
    let lines = body_lines(&snapshot, 20, 0);

    let item = line_text(&lines[1]);
    assert_eq!(item.width(), 20);
    assert!(item.ends_with('…'));
}

#[test]
fn test_truncate_to_width() {
    assert_eq!(truncate_to_width("short", 10), "short");
    assert_eq!(truncate_to_width("exactly10!", 10), "exactly10!");
    assert_eq!(truncate_to_width("abcdefghijk", 5), "abcd…");
    assert_eq!(truncate_to_width("abc", 0), "");
}

#[test]
fn test_truncate_counts_display_width() {
    // Each CJK character is two columns wide
    let result = truncate_to_width("日本語のポーズ", 6);
    assert_eq!(result, "日本…");
    assert!(result.width() <= 6);
}
