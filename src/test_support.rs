//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::state::{App, SearchSettings};

/// Creates a test App over the mock catalog with default settings.
pub fn test_app() -> App {
    App::with_mock_catalog(SearchSettings {
        trip_dates: vec!["2025-09-01".to_string(), "2025-09-02".to_string()],
        ..Default::default()
    })
}

/// Flatten a rendered test buffer into one string for `contains` checks.
pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect()
}
