// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator actions and the gate that decides which are legal.

use crate::job::DisplayedStatus;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A state-changing request an operator can send to the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobAction {
    Retry,
    Cancel,
}

crate::simple_display! {
    JobAction {
        Retry => "retry",
        Cancel => "cancel",
    }
}

impl JobAction {
    pub const ALL: [JobAction; 2] = [JobAction::Retry, JobAction::Cancel];

    /// Past-tense verb for confirmations ("Job retried").
    pub fn past_tense(self) -> &'static str {
        match self {
            JobAction::Retry => "retried",
            JobAction::Cancel => "cancelled",
        }
    }
}

/// Set of actions enabled for a job. Serializes as a list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionSet {
    retry: bool,
    cancel: bool,
}

impl ActionSet {
    pub const EMPTY: ActionSet = ActionSet { retry: false, cancel: false };

    pub fn only(action: JobAction) -> Self {
        Self::EMPTY.with(action)
    }

    pub fn with(mut self, action: JobAction) -> Self {
        match action {
            JobAction::Retry => self.retry = true,
            JobAction::Cancel => self.cancel = true,
        }
        self
    }

    pub fn contains(&self, action: JobAction) -> bool {
        match action {
            JobAction::Retry => self.retry,
            JobAction::Cancel => self.cancel,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = JobAction> + '_ {
        JobAction::ALL.into_iter().filter(|a| self.contains(*a))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        !self.retry && !self.cancel
    }
}

impl Serialize for ActionSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl std::fmt::Display for ActionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        let names: Vec<String> = self.iter().map(|a| a.to_string()).collect();
        f.write_str(&names.join(","))
    }
}

/// Actions the queue accepts for a job in `status`.
///
/// Derived from [`crate::JobStatus::transition`]; an unrecognized status permits
/// nothing until a real status is observed.
pub fn allowed_actions(status: &DisplayedStatus) -> ActionSet {
    let Some(status) = status.known() else {
        return ActionSet::EMPTY;
    };
    JobAction::ALL
        .into_iter()
        .filter(|a| status.transition(*a).is_some())
        .fold(ActionSet::EMPTY, ActionSet::with)
}

/// An action was requested against a status that does not permit it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot {action} a job that is {status}")]
pub struct PreconditionViolation {
    pub action: JobAction,
    pub status: DisplayedStatus,
}

/// Re-validate `action` against the last known `status` before dispatch.
pub fn check_action(status: &DisplayedStatus, action: JobAction) -> Result<(), PreconditionViolation> {
    if allowed_actions(status).contains(action) {
        Ok(())
    } else {
        Err(PreconditionViolation { action, status: status.clone() })
    }
}

#[cfg(test)]
#[path = "actions_tests.rs"]
mod tests;
