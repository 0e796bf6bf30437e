// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.
//!
//! `JW_API_URL` and `JW_QUEUE` are read through clap so the global flags can
//! override them; everything else is read here.

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";

/// Filter directive for `tracing-subscriber` (default `warn`)
pub fn log_filter() -> String {
    std::env::var("JW_LOG").ok().filter(|s| !s.is_empty()).unwrap_or_else(|| "warn".to_string())
}

/// Bearer token sent with every queue request.
pub fn api_token() -> Option<String> {
    std::env::var("JW_API_TOKEN").ok().filter(|s| !s.is_empty())
}

/// Per-request timeout (default 10s)
pub fn request_timeout() -> Duration {
    millis("JW_TIMEOUT_MS").unwrap_or(Duration::from_secs(10))
}

/// Refresh interval for `jw watch` (default 5s)
pub fn poll_interval() -> Duration {
    millis("JW_POLL_MS").unwrap_or(Duration::from_secs(5))
}

/// Maximum jobs fetched per listing (default 100)
pub fn list_limit() -> usize {
    std::env::var("JW_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(jw_engine::DEFAULT_LIMIT)
}

fn millis(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
