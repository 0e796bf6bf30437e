// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only projection of a single job for the detail view.

use jw_core::{ActionSet, DisplayedStatus, JobAction, JobRecord, MessageId, StatusDescriptor};
use serde::Serialize;

/// Everything known about one job, as of the snapshot it was projected from.
///
/// Holds no state of its own; reopen it from the latest snapshot rather
/// than keeping one around.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDetail {
    pub message_id: MessageId,
    pub queue: String,
    pub status: DisplayedStatus,
    pub descriptor: StatusDescriptor,
    pub completed_at: Option<String>,
    pub actions: ActionSet,
    /// Opaque payload fields, sorted by key.
    pub fields: Vec<(String, serde_json::Value)>,
}

impl JobDetail {
    pub fn project(record: &JobRecord) -> Self {
        let mut fields: Vec<_> =
            record.payload.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        fields.sort_by(|(a, _), (b, _)| a.cmp(b));
        Self {
            message_id: record.message_id.clone(),
            queue: record.queue.clone(),
            status: record.status.clone(),
            descriptor: record.status.descriptor(),
            completed_at: record.completed_at.clone(),
            actions: record.allowed_actions(),
            fields,
        }
    }

    /// Whether the detail view's retry control is enabled. Gated the same
    /// way as the row action.
    pub fn can_retry(&self) -> bool {
        self.actions.contains(JobAction::Retry)
    }
}

#[cfg(test)]
#[path = "inspector_tests.rs"]
mod tests;
