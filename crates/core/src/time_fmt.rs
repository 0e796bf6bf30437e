// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Time formatting for listings.

use chrono::{DateTime, NaiveDateTime};

/// Format a number of elapsed seconds as a compact age ("5s", "2m", "1h", "3d").
pub fn format_elapsed(secs: u64) -> String {
    match secs {
        0..=59 => format!("{}s", secs),
        60..=3599 => format!("{}m", secs / 60),
        3600..=86_399 => format!("{}h", secs / 3600),
        _ => format!("{}d", secs / 86_400),
    }
}

/// Render a queue-supplied completion timestamp as `MM/DD/YYYY HH:MM:SS` (UTC).
///
/// RFC 3339 and offset-less ISO 8601 values are reformatted; anything else is
/// shown verbatim. Absent timestamps render as `-`.
pub fn format_completed_at(raw: Option<&str>) -> String {
    const OUT: &str = "%m/%d/%Y %H:%M:%S";
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return "-".to_string();
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.naive_utc().format(OUT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(OUT).to_string();
    }
    raw.to_string()
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
