// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{DisplayedStatus, JobRecord, JobStatus};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for job status and record types.
pub mod strategies {
    use crate::job::{DisplayedStatus, JobRecord, JobStatus};
    use proptest::prelude::*;

    pub fn arb_job_status() -> impl Strategy<Value = JobStatus> {
        prop_oneof![
            Just(JobStatus::Pending),
            Just(JobStatus::Running),
            Just(JobStatus::Completed),
            Just(JobStatus::Failed),
        ]
    }

    /// Any wire status, including strings the queue may invent later.
    pub fn arb_displayed_status() -> impl Strategy<Value = DisplayedStatus> {
        prop_oneof![
            3 => arb_job_status().prop_map(DisplayedStatus::Known),
            1 => "[a-z_]{0,12}".prop_map(DisplayedStatus::from),
        ]
    }

    pub fn arb_job_record() -> impl Strategy<Value = JobRecord> {
        (
            "[0-9a-f]{8}-[0-9a-f]{4}",
            "[a-z]{1,8}",
            arb_displayed_status(),
            proptest::option::of(Just("2026-01-02T03:04:05Z".to_string())),
        )
            .prop_map(|(id, queue, status, completed_at)| {
                JobRecord {
                    message_id: id.into(),
                    queue,
                    status,
                    completed_at,
                    payload: serde_json::Map::new(),
                }
                .normalized()
            })
    }
}

// ── Record factories ────────────────────────────────────────────────────

/// A record in `queue` with the given id and status.
///
/// Terminal records get a fixed `completed_at`.
pub fn job(queue: &str, id: &str, status: JobStatus) -> JobRecord {
    let builder = JobRecord::builder().message_id(id).queue(queue).status(status.into());
    if status.is_terminal() {
        builder.completed_at("2026-01-02T03:04:05Z").build()
    } else {
        builder.build()
    }
}

/// A record whose wire status is not one this crate knows.
pub fn job_with_raw_status(queue: &str, id: &str, raw: &str) -> JobRecord {
    JobRecord::builder()
        .message_id(id)
        .queue(queue)
        .status(DisplayedStatus::from(raw.to_string()))
        .build()
}
