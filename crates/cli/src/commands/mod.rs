// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub(crate) mod job_display;
pub mod jobs;
pub mod queues;
pub mod watch;
