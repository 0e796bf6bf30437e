// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jw-engine: the job monitor and its detail projection

mod error;
mod inspector;
mod monitor;

pub use error::MonitorError;
pub use inspector::JobDetail;
pub use monitor::{
    ActionReceipt, JobMonitor, MonitorConfig, Snapshot, DEFAULT_LIMIT, DEFAULT_QUEUE,
};
