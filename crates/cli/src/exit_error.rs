// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! so `main()` owns process termination.

use std::fmt;

use jw_engine::MonitorError;

/// The queue or transport failed.
pub const EXIT_REMOTE: i32 = 1;
/// The action is not permitted for the job's current status.
pub const EXIT_PRECONDITION: i32 = 2;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl From<MonitorError> for ExitError {
    fn from(err: MonitorError) -> Self {
        match &err {
            MonitorError::PreconditionViolation(_) | MonitorError::EmptyQueueName => {
                Self::new(EXIT_PRECONDITION, err.to_string())
            }
            MonitorError::NotFound(id) => Self::new(EXIT_PRECONDITION, format!("Job not found: {}", id)),
            MonitorError::RemoteRead { .. } | MonitorError::RemoteMutation { .. } => {
                Self::new(EXIT_REMOTE, format!("{} ({})", err.operator_message(), err))
            }
        }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
