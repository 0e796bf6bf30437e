// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Monitor error taxonomy. Every variant is recoverable.

use jw_adapters::RemoteError;
use jw_core::{JobAction, MessageId, PreconditionViolation};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonitorError {
    /// Listing jobs or queues failed; the previous snapshot is still shown.
    #[error("failed to load {what}: {source}")]
    RemoteRead { what: &'static str, source: RemoteError },
    /// The queue refused or never answered a retry/cancel.
    #[error("failed to {action} job {message_id}: {source}")]
    RemoteMutation { action: JobAction, message_id: MessageId, source: RemoteError },
    /// The job's last known status does not permit the action.
    #[error(transparent)]
    PreconditionViolation(#[from] PreconditionViolation),
    /// The job is not in the current snapshot.
    #[error("job {0} is not in the current listing")]
    NotFound(MessageId),
    #[error("queue name must not be empty")]
    EmptyQueueName,
}

impl MonitorError {
    /// Expected races and stale-UI rejections: handled as no-ops, never toasted.
    pub fn is_silent(&self) -> bool {
        matches!(self, MonitorError::NotFound(_) | MonitorError::PreconditionViolation(_))
    }

    /// Text for the operator: the queue's own reason when it gave one.
    pub fn operator_message(&self) -> String {
        match self {
            MonitorError::RemoteMutation { source, .. } | MonitorError::RemoteRead { source, .. } => {
                match source.reason() {
                    Some(reason) => reason.to_string(),
                    None => generic_message(source).to_string(),
                }
            }
            other => other.to_string(),
        }
    }
}

fn generic_message(err: &RemoteError) -> &'static str {
    match err {
        RemoteError::Timeout => "The job queue did not respond in time.",
        RemoteError::Transport(_) => "Could not reach the job queue.",
        RemoteError::Rejected { .. } => "The job queue rejected the request.",
        RemoteError::Decode(_) => "The job queue sent an unexpected response.",
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
