// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job lifecycle monitor.
//!
//! Holds the last job listing for the selected queue and mediates operator
//! actions against it. The queue is the only source of truth: after every
//! accepted retry or cancel the monitor re-reads the listing instead of
//! patching its copy, since a retry produces a new attempt whose fields are
//! not predictable here.
//!
//! All methods take `&self`; fetches and mutations may be in flight at the
//! same time. The snapshot is replaced whole under a short lock that is never
//! held across an await.

use std::sync::Arc;
use std::time::Duration;

use jw_adapters::{JobQueueAdapter, NotifyAdapter, Severity, Toast};
use jw_core::{check_action, ActionSet, Clock, JobAction, JobRecord, MessageId};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::MonitorError;
use crate::inspector::JobDetail;

pub const DEFAULT_QUEUE: &str = "default";
pub const DEFAULT_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    queue: String,
    limit: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self { queue: DEFAULT_QUEUE.to_string(), limit: DEFAULT_LIMIT }
    }
}

impl MonitorConfig {
    jw_core::setters! {
        into {
            queue: String,
        }
        set {
            limit: usize,
        }
    }
}

/// Jobs as last read from one queue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub queue: String,
    pub jobs: Vec<JobRecord>,
    /// When the listing was read; `None` until the first successful fetch.
    pub fetched_at_ms: Option<u64>,
}

impl Snapshot {
    fn empty(queue: &str) -> Self {
        Self { queue: queue.to_string(), jobs: Vec::new(), fetched_at_ms: None }
    }

    pub fn get(&self, message_id: &str) -> Option<&JobRecord> {
        self.jobs.iter().find(|j| j.message_id == message_id)
    }
}

/// An accepted retry or cancel and the listing read back afterwards.
#[derive(Debug, Clone)]
pub struct ActionReceipt {
    pub action: JobAction,
    pub message_id: MessageId,
    pub snapshot: Arc<Snapshot>,
    /// False when the follow-up read failed and `snapshot` is the old one.
    pub reconciled: bool,
}

struct MonitorState {
    selected_queue: String,
    snapshot: Arc<Snapshot>,
    queues: Vec<String>,
    /// Job open in the detail view.
    detail: Option<MessageId>,
    /// Sequence number handed to the most recently dispatched fetch.
    last_dispatched: u64,
    /// Sequence number of the fetch the snapshot came from.
    last_applied: u64,
}

pub struct JobMonitor<Q, N, C> {
    queue: Q,
    notifier: N,
    clock: C,
    limit: usize,
    state: Mutex<MonitorState>,
}

impl<Q, N, C> JobMonitor<Q, N, C>
where
    Q: JobQueueAdapter,
    N: NotifyAdapter,
    C: Clock,
{
    pub fn new(queue: Q, notifier: N, clock: C, config: MonitorConfig) -> Self {
        let state = MonitorState {
            snapshot: Arc::new(Snapshot::empty(&config.queue)),
            selected_queue: config.queue,
            queues: Vec::new(),
            detail: None,
            last_dispatched: 0,
            last_applied: 0,
        };
        Self { queue, notifier, clock, limit: config.limit, state: Mutex::new(state) }
    }

    pub fn selected_queue(&self) -> String {
        self.state.lock().selected_queue.clone()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.state.lock().snapshot)
    }

    /// Queue names from the last successful [`Self::refresh_queues`].
    pub fn queues(&self) -> Vec<String> {
        self.state.lock().queues.clone()
    }

    /// Switch to `name` and load its jobs. An unknown queue lists as empty.
    pub async fn select_queue(&self, name: &str) -> Result<Arc<Snapshot>, MonitorError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MonitorError::EmptyQueueName);
        }
        {
            let mut state = self.state.lock();
            if state.selected_queue != name {
                state.selected_queue = name.to_string();
                state.detail = None;
            }
        }
        debug!(queue = name, "queue selected");
        self.refresh().await
    }

    /// Read up to `limit` jobs from `queue` without touching the snapshot.
    ///
    /// Rows past `limit` are dropped even if the remote sends them.
    pub async fn list_jobs(&self, queue: &str, limit: usize) -> Result<Vec<JobRecord>, MonitorError> {
        debug!(queue, limit, "listing jobs");
        let mut jobs = self
            .queue
            .list_jobs(queue, limit)
            .await
            .map_err(|source| MonitorError::RemoteRead { what: "jobs", source })?;
        if jobs.len() > limit {
            debug!(queue, limit, received = jobs.len(), "remote ignored limit, truncating");
            jobs.truncate(limit);
        }
        Ok(jobs)
    }

    /// Re-read the selected queue and replace the snapshot.
    ///
    /// On failure the previous snapshot stays in place and the operator is
    /// notified.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>, MonitorError> {
        let (queue, seq) = self.begin_fetch();
        match self.list_jobs(&queue, self.limit).await {
            Ok(jobs) => Ok(self.apply_fetch(seq, &queue, jobs)),
            Err(err) => {
                warn!(queue = %queue, error = %err, "job refresh failed, keeping previous listing");
                self.toast(Severity::Warning, "Could not refresh jobs", err.operator_message()).await;
                Err(err)
            }
        }
    }

    pub(crate) fn begin_fetch(&self) -> (String, u64) {
        let mut state = self.state.lock();
        state.last_dispatched += 1;
        (state.selected_queue.clone(), state.last_dispatched)
    }

    /// Install a completed fetch unless a newer one already landed or the
    /// operator has since moved to another queue.
    pub(crate) fn apply_fetch(&self, seq: u64, queue: &str, jobs: Vec<JobRecord>) -> Arc<Snapshot> {
        let mut state = self.state.lock();
        if seq <= state.last_applied || state.selected_queue != queue {
            debug!(queue, seq, applied = state.last_applied, "discarding stale fetch");
            return Arc::clone(&state.snapshot);
        }
        state.last_applied = seq;
        state.snapshot = Arc::new(Snapshot {
            queue: queue.to_string(),
            jobs,
            fetched_at_ms: Some(self.clock.epoch_ms()),
        });
        Arc::clone(&state.snapshot)
    }

    /// Reload the list of queue names, keeping the previous list on failure.
    pub async fn refresh_queues(&self) -> Result<Vec<String>, MonitorError> {
        match self.queue.list_queues().await {
            Ok(queues) => {
                self.state.lock().queues = queues.clone();
                Ok(queues)
            }
            Err(source) => {
                let err = MonitorError::RemoteRead { what: "queues", source };
                warn!(error = %err, "queue refresh failed");
                self.toast(Severity::Warning, "Could not load queues", err.operator_message()).await;
                Err(err)
            }
        }
    }

    /// Actions enabled for a row; empty when the job is not in the snapshot.
    pub fn allowed_actions(&self, message_id: &str) -> ActionSet {
        self.state.lock().snapshot.get(message_id).map(JobRecord::allowed_actions).unwrap_or_default()
    }

    /// Open the detail view for a job in the current snapshot.
    ///
    /// A job that has aged out of the listing yields `None` and leaves the
    /// view as it was.
    pub fn view_details(&self, message_id: &str) -> Option<JobDetail> {
        let mut state = self.state.lock();
        let detail = state.snapshot.get(message_id).map(JobDetail::project)?;
        state.detail = Some(detail.message_id.clone());
        Some(detail)
    }

    /// The open detail view, projected from the latest snapshot.
    pub fn detail(&self) -> Option<JobDetail> {
        let state = self.state.lock();
        let id = state.detail.as_ref()?;
        state.snapshot.get(id).map(JobDetail::project)
    }

    pub fn close_details(&self) {
        self.state.lock().detail = None;
    }

    pub async fn retry(&self, message_id: &str) -> Result<ActionReceipt, MonitorError> {
        self.dispatch(JobAction::Retry, message_id).await
    }

    pub async fn cancel(&self, message_id: &str) -> Result<ActionReceipt, MonitorError> {
        self.dispatch(JobAction::Cancel, message_id).await
    }

    /// Retry the job open in the detail view. `Ok(None)` when nothing is open.
    pub async fn retry_detail(&self) -> Result<Option<ActionReceipt>, MonitorError> {
        let open = self.state.lock().detail.clone();
        match open {
            Some(id) => self.retry(&id).await.map(Some),
            None => Ok(None),
        }
    }

    async fn dispatch(&self, action: JobAction, message_id: &str) -> Result<ActionReceipt, MonitorError> {
        let status = self.state.lock().snapshot.get(message_id).map(|j| j.status.clone());
        let Some(status) = status else {
            debug!(%action, message_id, "job not in listing, ignoring action");
            return Err(MonitorError::NotFound(MessageId::new(message_id)));
        };
        if let Err(violation) = check_action(&status, action) {
            warn!(%action, message_id, %status, "action not permitted for last known status");
            return Err(violation.into());
        }

        let id = MessageId::new(message_id);
        let sent = match action {
            JobAction::Retry => self.queue.retry_job(&id).await,
            JobAction::Cancel => self.queue.cancel_job(&id).await,
        };
        if let Err(source) = sent {
            let err = MonitorError::RemoteMutation { action, message_id: id, source };
            warn!(error = %err, "job action failed");
            self.toast(Severity::Error, format!("Failed to {} job", action), err.operator_message())
                .await;
            return Err(err);
        }

        info!(%action, message_id = %id, "job action accepted");
        self.toast(Severity::Success, format!("Job {}", action.past_tense()), id.to_string()).await;

        let (snapshot, reconciled) = match self.refresh().await {
            Ok(snapshot) => (snapshot, true),
            Err(_) => (self.snapshot(), false),
        };
        Ok(ActionReceipt { action, message_id: id, snapshot, reconciled })
    }

    /// Refresh the selected queue every `interval` until `cancel` fires.
    ///
    /// The first refresh happens immediately. A failed tick only notifies.
    pub async fn poll(&self, interval: Duration, cancel: CancellationToken) {
        self.poll_with(interval, cancel, |_| {}).await;
    }

    /// Like [`Self::poll`], handing each tick's outcome to `on_tick`.
    pub async fn poll_with<F>(&self, interval: Duration, cancel: CancellationToken, mut on_tick: F)
    where
        F: FnMut(Result<Arc<Snapshot>, MonitorError>),
    {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => on_tick(self.refresh().await),
            }
        }
        debug!("polling stopped");
    }

    async fn toast(&self, severity: Severity, title: impl Into<String>, description: impl Into<String>) {
        self.notifier.notify(&Toast::new(severity, title, description)).await;
    }
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
