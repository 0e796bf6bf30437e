// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jw-core: job records, the status state machine, and the action gate

pub mod macros;

pub mod actions;
pub mod clock;
pub mod descriptor;
pub mod id;
pub mod job;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use actions::{allowed_actions, check_action, ActionSet, JobAction, PreconditionViolation};
pub use clock::{Clock, FakeClock, SystemClock};
pub use descriptor::{BadgeVariant, StatusColor, StatusDescriptor};
pub use id::short;
#[cfg(any(test, feature = "test-support"))]
pub use job::JobRecordBuilder;
pub use job::{DisplayedStatus, JobRecord, JobStatus, MessageId, StatusParseError, Transition};
pub use time_fmt::{format_completed_at, format_elapsed};
