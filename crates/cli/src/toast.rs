// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Toasts rendered on stderr so stdout stays clean for tables and JSON.

use async_trait::async_trait;
use jw_adapters::{LogNotifyAdapter, NotifyAdapter, Severity, Toast};

use crate::color;
use crate::output::OutputFormat;

#[derive(Clone, Copy, Debug)]
pub struct TerminalNotifyAdapter {
    log: LogNotifyAdapter,
    format: OutputFormat,
    show_failures: bool,
}

impl TerminalNotifyAdapter {
    pub fn new(format: OutputFormat) -> Self {
        Self { log: LogNotifyAdapter, format, show_failures: true }
    }

    /// One-shot commands report failures through their exit status instead.
    pub fn without_failures(mut self) -> Self {
        self.show_failures = false;
        self
    }

    fn shows(&self, toast: &Toast) -> bool {
        let failure = matches!(toast.severity, Severity::Warning | Severity::Error);
        self.format == OutputFormat::Text && (self.show_failures || !failure)
    }
}

/// One-line rendering of a toast, e.g. `✓ Job retried: 3f2a...`.
pub fn render(toast: &Toast) -> String {
    let marker = match toast.severity {
        Severity::Info => color::context("·"),
        Severity::Success => color::status(jw_core::StatusColor::Green, "✓"),
        Severity::Warning => color::status(jw_core::StatusColor::Yellow, "!"),
        Severity::Error => color::status(jw_core::StatusColor::Red, "✗"),
    };
    if toast.description.is_empty() {
        format!("{} {}", marker, toast.title)
    } else {
        format!("{} {}: {}", marker, toast.title, color::muted(&toast.description))
    }
}

#[async_trait]
impl NotifyAdapter for TerminalNotifyAdapter {
    async fn notify(&self, toast: &Toast) {
        self.log.notify(toast).await;
        if self.shows(toast) {
            eprintln!("{}", render(toast));
        }
    }
}

#[cfg(test)]
#[path = "toast_tests.rs"]
mod tests;
