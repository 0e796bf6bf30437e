// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jw-adapters: seams to the remote job queue and the notification sink

pub mod http;
pub mod notify;
pub mod queue;

pub use http::{HttpConfig, HttpJobQueue};
pub use notify::{LogNotifyAdapter, NotifyAdapter, Severity, Toast};
pub use queue::{JobQueueAdapter, RemoteError};

#[cfg(any(test, feature = "test-support"))]
pub use notify::FakeNotifyAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use queue::{FakeJobQueue, QueueCall};
