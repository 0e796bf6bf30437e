// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Display descriptors for job statuses.

use crate::job::JobStatus;
use serde::Serialize;

/// Badge emphasis for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeVariant {
    Default,
    Secondary,
    Destructive,
}

/// Palette slot for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    Yellow,
    Blue,
    Green,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusDescriptor {
    pub label: &'static str,
    pub variant: BadgeVariant,
    pub color: StatusColor,
}

impl StatusDescriptor {
    pub fn for_status(status: JobStatus) -> Self {
        let (label, variant, color) = match status {
            JobStatus::Pending => ("Pending", BadgeVariant::Secondary, StatusColor::Yellow),
            JobStatus::Running => ("Running", BadgeVariant::Default, StatusColor::Blue),
            JobStatus::Completed => ("Completed", BadgeVariant::Default, StatusColor::Green),
            JobStatus::Failed => ("Failed", BadgeVariant::Destructive, StatusColor::Red),
        };
        Self { label, variant, color }
    }
}

#[cfg(test)]
#[path = "descriptor_tests.rs"]
mod tests;
