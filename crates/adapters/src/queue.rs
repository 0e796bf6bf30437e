// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The remote job queue the monitor reads from and sends actions to.

use async_trait::async_trait;
use jw_core::{JobRecord, MessageId};
use thiserror::Error;

/// Errors from remote queue operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request timed out")]
    Timeout,
    #[error("rejected with status {status}: {}", .reason.as_deref().unwrap_or("no reason given"))]
    Rejected { status: u16, reason: Option<String> },
    #[error("invalid response: {0}")]
    Decode(String),
}

impl RemoteError {
    /// The queue's own explanation, when it sent one.
    pub fn reason(&self) -> Option<&str> {
        match self {
            RemoteError::Rejected { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }
}

/// Adapter for the remote job queue.
///
/// Every call is a non-blocking request; timeouts and aborts surface as
/// ordinary errors.
#[async_trait]
pub trait JobQueueAdapter: Clone + Send + Sync + 'static {
    /// Names of all queues.
    async fn list_queues(&self) -> Result<Vec<String>, RemoteError>;

    /// Up to `limit` jobs in `queue`, in the queue's order. An unknown queue
    /// lists as empty.
    async fn list_jobs(&self, queue: &str, limit: usize) -> Result<Vec<JobRecord>, RemoteError>;

    /// Re-enqueue a failed job as a new attempt.
    async fn retry_job(&self, message_id: &MessageId) -> Result<(), RemoteError>;

    /// Withdraw a pending job.
    async fn cancel_job(&self, message_id: &MessageId) -> Result<(), RemoteError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{JobQueueAdapter, RemoteError};
    use async_trait::async_trait;
    use jw_core::{DisplayedStatus, JobRecord, JobStatus, MessageId};
    use parking_lot::Mutex;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Arc;

    /// Recorded queue call
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum QueueCall {
        ListQueues,
        ListJobs { queue: String, limit: usize },
        Retry(MessageId),
        Cancel(MessageId),
    }

    impl QueueCall {
        pub fn is_mutation(&self) -> bool {
            matches!(self, QueueCall::Retry(_) | QueueCall::Cancel(_))
        }
    }

    #[derive(Default)]
    struct FakeQueueState {
        queues: Vec<String>,
        jobs: HashMap<String, Vec<JobRecord>>,
        calls: Vec<QueueCall>,
        read_failures: VecDeque<RemoteError>,
        mutation_failures: VecDeque<RemoteError>,
        ignore_limit: bool,
    }

    /// In-memory queue that behaves like the real one for retry and cancel.
    ///
    /// Retrying a failed job turns it back into a pending attempt; cancelling
    /// a pending job removes it. Anything else is rejected with 409.
    #[derive(Clone, Default)]
    pub struct FakeJobQueue {
        inner: Arc<Mutex<FakeQueueState>>,
    }

    impl FakeJobQueue {
        pub fn new() -> Self {
            Self::default()
        }

        /// Replace the contents of `queue`, registering it if new.
        pub fn set_jobs(&self, queue: &str, jobs: Vec<JobRecord>) {
            let mut state = self.inner.lock();
            if !state.queues.iter().any(|q| q == queue) {
                state.queues.push(queue.to_string());
            }
            state.jobs.insert(queue.to_string(), jobs);
        }

        pub fn with_jobs(self, queue: &str, jobs: Vec<JobRecord>) -> Self {
            self.set_jobs(queue, jobs);
            self
        }

        /// Return every job in the queue regardless of the requested limit.
        pub fn ignoring_limit(self) -> Self {
            self.inner.lock().ignore_limit = true;
            self
        }

        /// Fail the next list (jobs or queues) with `err`.
        pub fn fail_next_read(&self, err: RemoteError) {
            self.inner.lock().read_failures.push_back(err);
        }

        /// Fail the next retry or cancel with `err`.
        pub fn fail_next_mutation(&self, err: RemoteError) {
            self.inner.lock().mutation_failures.push_back(err);
        }

        pub fn calls(&self) -> Vec<QueueCall> {
            self.inner.lock().calls.clone()
        }

        pub fn list_job_calls(&self) -> usize {
            self.inner.lock().calls.iter().filter(|c| matches!(c, QueueCall::ListJobs { .. })).count()
        }

        pub fn mutation_calls(&self) -> usize {
            self.inner.lock().calls.iter().filter(|c| c.is_mutation()).count()
        }

        pub fn clear_calls(&self) {
            self.inner.lock().calls.clear();
        }
    }

    fn conflict(reason: &str) -> RemoteError {
        RemoteError::Rejected { status: 409, reason: Some(reason.to_string()) }
    }

    fn not_found(id: &MessageId) -> RemoteError {
        RemoteError::Rejected { status: 404, reason: Some(format!("job {} not found", id)) }
    }

    #[async_trait]
    impl JobQueueAdapter for FakeJobQueue {
        async fn list_queues(&self) -> Result<Vec<String>, RemoteError> {
            let mut state = self.inner.lock();
            state.calls.push(QueueCall::ListQueues);
            if let Some(err) = state.read_failures.pop_front() {
                return Err(err);
            }
            Ok(state.queues.clone())
        }

        async fn list_jobs(&self, queue: &str, limit: usize) -> Result<Vec<JobRecord>, RemoteError> {
            let mut state = self.inner.lock();
            state.calls.push(QueueCall::ListJobs { queue: queue.to_string(), limit });
            if let Some(err) = state.read_failures.pop_front() {
                return Err(err);
            }
            let take = if state.ignore_limit { usize::MAX } else { limit };
            Ok(state
                .jobs
                .get(queue)
                .map(|jobs| jobs.iter().take(take).cloned().collect())
                .unwrap_or_default())
        }

        async fn retry_job(&self, message_id: &MessageId) -> Result<(), RemoteError> {
            let mut state = self.inner.lock();
            state.calls.push(QueueCall::Retry(message_id.clone()));
            if let Some(err) = state.mutation_failures.pop_front() {
                return Err(err);
            }
            let job = state
                .jobs
                .values_mut()
                .flat_map(|jobs| jobs.iter_mut())
                .find(|j| j.message_id == *message_id)
                .ok_or_else(|| not_found(message_id))?;
            if job.status != DisplayedStatus::Known(JobStatus::Failed) {
                return Err(conflict("job is not failed"));
            }
            job.status = DisplayedStatus::Known(JobStatus::Pending);
            job.completed_at = None;
            Ok(())
        }

        async fn cancel_job(&self, message_id: &MessageId) -> Result<(), RemoteError> {
            let mut state = self.inner.lock();
            state.calls.push(QueueCall::Cancel(message_id.clone()));
            if let Some(err) = state.mutation_failures.pop_front() {
                return Err(err);
            }
            for jobs in state.jobs.values_mut() {
                if let Some(pos) = jobs.iter().position(|j| j.message_id == *message_id) {
                    if jobs[pos].status != DisplayedStatus::Known(JobStatus::Pending) {
                        return Err(conflict("job is not pending"));
                    }
                    jobs.remove(pos);
                    return Ok(());
                }
            }
            Err(not_found(message_id))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeJobQueue, QueueCall};

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
