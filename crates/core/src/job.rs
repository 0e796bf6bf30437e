// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job record and status state machine.

use crate::actions::{ActionSet, JobAction};
use crate::descriptor::StatusDescriptor;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

crate::define_id! {
    /// Identifier the queue assigned to a job message.
    ///
    /// Stable for the job's lifetime and unique within a queue at any
    /// observed snapshot.
    pub struct MessageId;
}

/// Lifecycle status of a job as reported by the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

crate::simple_display! {
    JobStatus {
        Pending => "pending",
        Running => "running",
        Completed => "completed",
        Failed => "failed",
    }
}

/// What the queue does when an operator action is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The job is withdrawn from the queue.
    Cancelled,
    /// A new attempt is enqueued in the given status. The terminal record
    /// is not mutated in place.
    Requeued(JobStatus),
}

impl JobStatus {
    pub const ALL: [JobStatus; 4] =
        [JobStatus::Pending, JobStatus::Running, JobStatus::Completed, JobStatus::Failed];

    /// Completed and failed jobs see no further automatic transition.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    /// The transition an operator action requests from this status, if any.
    pub fn transition(self, action: JobAction) -> Option<Transition> {
        match (self, action) {
            (JobStatus::Pending, JobAction::Cancel) => Some(Transition::Cancelled),
            (JobStatus::Failed, JobAction::Retry) => Some(Transition::Requeued(JobStatus::Pending)),
            (JobStatus::Pending, JobAction::Retry)
            | (JobStatus::Running, _)
            | (JobStatus::Completed, _)
            | (JobStatus::Failed, JobAction::Cancel) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown job status: {0:?}")]
pub struct StatusParseError(pub String);

impl FromStr for JobStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(JobStatus::Pending),
            "running" => Ok(JobStatus::Running),
            "completed" => Ok(JobStatus::Completed),
            "failed" => Ok(JobStatus::Failed),
            other => Err(StatusParseError(other.to_string())),
        }
    }
}

/// Status as it arrived on the wire.
///
/// Unknown strings are kept rather than coerced so they can never be
/// mistaken for a real status: they look like `pending` but permit no action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DisplayedStatus {
    Known(JobStatus),
    Unrecognized(String),
}

impl DisplayedStatus {
    pub fn known(&self) -> Option<JobStatus> {
        match self {
            DisplayedStatus::Known(s) => Some(*s),
            DisplayedStatus::Unrecognized(_) => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.known().is_some_and(JobStatus::is_terminal)
    }

    pub fn descriptor(&self) -> StatusDescriptor {
        StatusDescriptor::for_status(self.known().unwrap_or(JobStatus::Pending))
    }

    pub fn allowed_actions(&self) -> ActionSet {
        crate::actions::allowed_actions(self)
    }
}

impl From<JobStatus> for DisplayedStatus {
    fn from(s: JobStatus) -> Self {
        DisplayedStatus::Known(s)
    }
}

impl From<String> for DisplayedStatus {
    fn from(s: String) -> Self {
        match s.parse::<JobStatus>() {
            Ok(status) => DisplayedStatus::Known(status),
            Err(_) => DisplayedStatus::Unrecognized(s),
        }
    }
}

impl From<DisplayedStatus> for String {
    fn from(s: DisplayedStatus) -> Self {
        s.to_string()
    }
}

impl std::fmt::Display for DisplayedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayedStatus::Known(s) => write!(f, "{}", s),
            DisplayedStatus::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

/// One job as listed by the queue.
///
/// Decoding enforces that `completed_at` is only carried by terminal jobs.
/// Fields the monitor does not interpret are kept verbatim in `payload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireJobRecord")]
pub struct JobRecord {
    pub message_id: MessageId,
    pub queue: String,
    pub status: DisplayedStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(flatten)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct WireJobRecord {
    message_id: MessageId,
    #[serde(default, alias = "queue_name")]
    queue: String,
    #[serde(default)]
    status: serde_json::Value,
    #[serde(default)]
    completed_at: Option<String>,
    #[serde(flatten)]
    payload: serde_json::Map<String, serde_json::Value>,
}

impl From<WireJobRecord> for JobRecord {
    fn from(w: WireJobRecord) -> Self {
        JobRecord {
            message_id: w.message_id,
            queue: w.queue,
            status: wire_status(w.status),
            completed_at: w.completed_at,
            payload: w.payload,
        }
        .normalized()
    }
}

/// A missing or non-string status is unrecognized for this record only.
fn wire_status(raw: serde_json::Value) -> DisplayedStatus {
    match raw {
        serde_json::Value::String(s) => DisplayedStatus::from(s),
        other => DisplayedStatus::Unrecognized(other.to_string()),
    }
}

impl JobRecord {
    /// Drop a `completed_at` the queue reported for a job still in flight.
    pub fn normalized(mut self) -> Self {
        let in_flight = matches!(
            self.status,
            DisplayedStatus::Known(JobStatus::Pending | JobStatus::Running)
        );
        if in_flight && self.completed_at.is_some() {
            self.completed_at = None;
        }
        self
    }

    pub fn allowed_actions(&self) -> ActionSet {
        self.status.allowed_actions()
    }
}

crate::builder! {
    pub struct JobRecordBuilder => JobRecord {
        into {
            message_id: MessageId = "job-1",
            queue: String = "default",
        }
        set {
            status: DisplayedStatus = DisplayedStatus::Known(JobStatus::Pending),
            payload: serde_json::Map<String, serde_json::Value> = serde_json::Map::new(),
        }
        option {
            completed_at: String,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
