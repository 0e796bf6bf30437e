// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jw_adapters::{FakeJobQueue, FakeNotifyAdapter, QueueCall, RemoteError};
use jw_core::test_support::{job, job_with_raw_status};
use jw_core::{DisplayedStatus, FakeClock, JobStatus};

type TestMonitor = JobMonitor<FakeJobQueue, FakeNotifyAdapter, FakeClock>;

struct Harness {
    monitor: TestMonitor,
    queue: FakeJobQueue,
    notifier: FakeNotifyAdapter,
    clock: FakeClock,
}

/// Queue "default" holding a (failed), b (pending), c (running).
fn harness() -> Harness {
    let queue = FakeJobQueue::new().with_jobs(
        "default",
        vec![
            job("default", "a", JobStatus::Failed),
            job("default", "b", JobStatus::Pending),
            job("default", "c", JobStatus::Running),
        ],
    );
    let notifier = FakeNotifyAdapter::new();
    let clock = FakeClock::new();
    let monitor =
        JobMonitor::new(queue.clone(), notifier.clone(), clock.clone(), MonitorConfig::default());
    Harness { monitor, queue, notifier, clock }
}

/// Harness with the initial listing already loaded and the call log cleared.
async fn loaded() -> Harness {
    let h = harness();
    h.monitor.refresh().await.unwrap();
    h.queue.clear_calls();
    h
}

fn ids(snapshot: &Snapshot) -> Vec<&str> {
    snapshot.jobs.iter().map(|j| j.message_id.as_str()).collect()
}

#[tokio::test]
async fn starts_empty_until_first_fetch() {
    let h = harness();
    let snapshot = h.monitor.snapshot();
    assert_eq!(snapshot.queue, "default");
    assert!(snapshot.jobs.is_empty());
    assert_eq!(snapshot.fetched_at_ms, None);
    assert!(h.queue.calls().is_empty());
}

#[tokio::test]
async fn refresh_loads_selected_queue_with_limit() {
    let h = harness();
    let snapshot = h.monitor.refresh().await.unwrap();

    assert_eq!(ids(&snapshot), ["a", "b", "c"]);
    assert_eq!(snapshot.fetched_at_ms, Some(h.clock.epoch_ms()));
    assert_eq!(
        h.queue.calls(),
        vec![QueueCall::ListJobs { queue: "default".into(), limit: DEFAULT_LIMIT }]
    );
}

#[tokio::test]
async fn configured_limit_is_sent() {
    let queue = FakeJobQueue::new();
    let monitor = JobMonitor::new(
        queue.clone(),
        FakeNotifyAdapter::new(),
        FakeClock::new(),
        MonitorConfig::default().queue("emails").limit(5),
    );
    monitor.refresh().await.unwrap();
    assert_eq!(monitor.limit(), 5);
    assert_eq!(queue.calls(), vec![QueueCall::ListJobs { queue: "emails".into(), limit: 5 }]);
}

#[tokio::test]
async fn listing_is_bounded_even_when_remote_overshoots() {
    let five = (0..5).map(|i| job("default", &format!("j{}", i), JobStatus::Pending)).collect();
    let queue = FakeJobQueue::new().with_jobs("default", five).ignoring_limit();
    let monitor = JobMonitor::new(
        queue,
        FakeNotifyAdapter::new(),
        FakeClock::new(),
        MonitorConfig::default().limit(2),
    );

    let listed = monitor.list_jobs("default", 2).await.unwrap();
    assert_eq!(listed.len(), 2);

    let snapshot = monitor.refresh().await.unwrap();
    assert_eq!(ids(&snapshot), ["j0", "j1"]);
}

#[tokio::test]
async fn row_actions_follow_status() {
    let h = loaded().await;
    assert_eq!(h.monitor.allowed_actions("a"), ActionSet::only(JobAction::Retry));
    assert_eq!(h.monitor.allowed_actions("b"), ActionSet::only(JobAction::Cancel));
    assert!(h.monitor.allowed_actions("c").is_empty());
    assert!(h.monitor.allowed_actions("zzz").is_empty());
}

#[tokio::test]
async fn cancel_of_failed_job_is_rejected_without_network_call() {
    let h = loaded().await;
    let before = h.monitor.snapshot();

    let err = h.monitor.cancel("a").await.unwrap_err();

    assert!(matches!(err, MonitorError::PreconditionViolation(_)));
    assert!(err.is_silent());
    assert!(h.queue.calls().is_empty());
    assert!(h.notifier.calls().is_empty());
    assert!(Arc::ptr_eq(&before, &h.monitor.snapshot()));
}

#[yare::parameterized(
    retry_pending   = { "b", JobAction::Retry },
    retry_running   = { "c", JobAction::Retry },
    cancel_running  = { "c", JobAction::Cancel },
    cancel_failed   = { "a", JobAction::Cancel },
)]
#[test_macro(tokio::test)]
async fn gated_actions_never_reach_the_queue(id: &str, action: JobAction) {
    let h = loaded().await;
    let result = match action {
        JobAction::Retry => h.monitor.retry(id).await,
        JobAction::Cancel => h.monitor.cancel(id).await,
    };
    assert!(matches!(result, Err(MonitorError::PreconditionViolation(_))));
    assert_eq!(h.queue.mutation_calls(), 0);
}

#[tokio::test]
async fn retry_refetches_once_and_reports_new_status() {
    let h = loaded().await;

    let receipt = h.monitor.retry("a").await.unwrap();

    assert_eq!(receipt.action, JobAction::Retry);
    assert_eq!(receipt.message_id, "a");
    assert!(receipt.reconciled);
    assert_eq!(h.queue.mutation_calls(), 1);
    assert_eq!(h.queue.list_job_calls(), 1);

    let a = receipt.snapshot.get("a").unwrap();
    assert_eq!(a.status, DisplayedStatus::Known(JobStatus::Pending));
    assert_eq!(a.completed_at, None);
    assert_eq!(h.monitor.allowed_actions("a"), ActionSet::only(JobAction::Cancel));
    assert!(Arc::ptr_eq(&receipt.snapshot, &h.monitor.snapshot()));

    let toasts = h.notifier.calls();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].severity, Severity::Success);
    assert_eq!(toasts[0].title, "Job retried");
    assert_eq!(toasts[0].description, "a");
}

#[tokio::test]
async fn cancel_removes_pending_job_after_refetch() {
    let h = loaded().await;

    let receipt = h.monitor.cancel("b").await.unwrap();

    assert_eq!(ids(&receipt.snapshot), ["a", "c"]);
    assert_eq!(h.queue.calls(), vec![
        QueueCall::Cancel("b".into()),
        QueueCall::ListJobs { queue: "default".into(), limit: DEFAULT_LIMIT },
    ]);
    assert_eq!(h.notifier.calls()[0].title, "Job cancelled");
}

#[tokio::test]
async fn mutation_failure_keeps_snapshot_and_surfaces_reason() {
    let h = loaded().await;
    let before = h.monitor.snapshot();
    h.queue.fail_next_mutation(RemoteError::Rejected {
        status: 409,
        reason: Some("Job a is no longer failed".into()),
    });

    let err = h.monitor.retry("a").await.unwrap_err();

    assert!(matches!(err, MonitorError::RemoteMutation { action: JobAction::Retry, .. }));
    assert!(!err.is_silent());
    assert_eq!(h.queue.list_job_calls(), 0);
    assert!(Arc::ptr_eq(&before, &h.monitor.snapshot()));

    let toasts = h.notifier.calls();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].severity, Severity::Error);
    assert_eq!(toasts[0].title, "Failed to retry job");
    assert_eq!(toasts[0].description, "Job a is no longer failed");
}

#[tokio::test]
async fn timeout_uses_generic_message() {
    let h = loaded().await;
    h.queue.fail_next_mutation(RemoteError::Timeout);

    h.monitor.cancel("b").await.unwrap_err();

    assert_eq!(h.notifier.calls()[0].description, "The job queue did not respond in time.");
}

#[tokio::test]
async fn accepted_action_with_failed_refetch_is_unreconciled() {
    let h = loaded().await;
    let before = h.monitor.snapshot();
    h.queue.fail_next_read(RemoteError::Transport("connection reset".into()));

    let receipt = h.monitor.retry("a").await.unwrap();

    assert!(!receipt.reconciled);
    assert!(Arc::ptr_eq(&before, &receipt.snapshot));
    // Still shows the old failed row until the next successful read.
    assert_eq!(h.monitor.allowed_actions("a"), ActionSet::only(JobAction::Retry));

    let severities: Vec<Severity> = h.notifier.calls().iter().map(|t| t.severity).collect();
    assert_eq!(severities, [Severity::Success, Severity::Warning]);
}

#[tokio::test]
async fn read_failure_keeps_previous_snapshot() {
    let h = loaded().await;
    let before = h.monitor.snapshot();
    h.clock.advance(Duration::from_secs(30));
    h.queue.fail_next_read(RemoteError::Rejected { status: 500, reason: None });

    let err = h.monitor.refresh().await.unwrap_err();

    assert!(matches!(err, MonitorError::RemoteRead { what: "jobs", .. }));
    let after = h.monitor.snapshot();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(ids(&after), ["a", "b", "c"]);

    let toasts = h.notifier.calls();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].severity, Severity::Warning);
    assert_eq!(toasts[0].description, "The job queue rejected the request.");
}

#[tokio::test]
async fn action_on_absent_job_is_silent_no_op() {
    let h = loaded().await;

    let err = h.monitor.retry("gone").await.unwrap_err();

    assert_eq!(err, MonitorError::NotFound("gone".into()));
    assert!(err.is_silent());
    assert!(h.queue.calls().is_empty());
    assert!(h.notifier.calls().is_empty());
}

#[tokio::test]
async fn unrecognized_status_permits_nothing() {
    let h = harness();
    h.queue.set_jobs("default", vec![job_with_raw_status("default", "q", "queued")]);
    h.monitor.refresh().await.unwrap();

    assert!(h.monitor.allowed_actions("q").is_empty());
    let err = h.monitor.retry("q").await.unwrap_err();
    assert!(matches!(err, MonitorError::PreconditionViolation(_)));
    assert_eq!(h.queue.mutation_calls(), 0);
}

#[tokio::test]
async fn select_unknown_queue_lists_empty() {
    let h = loaded().await;

    let snapshot = h.monitor.select_queue("nonexistent-queue").await.unwrap();

    assert_eq!(snapshot.queue, "nonexistent-queue");
    assert!(snapshot.jobs.is_empty());
    assert_eq!(h.monitor.selected_queue(), "nonexistent-queue");
    assert!(h.notifier.calls().is_empty());
}

#[tokio::test]
async fn select_empty_queue_name_is_rejected() {
    let h = loaded().await;
    assert_eq!(h.monitor.select_queue("  ").await.unwrap_err(), MonitorError::EmptyQueueName);
    assert_eq!(h.monitor.selected_queue(), "default");
    assert!(h.queue.calls().is_empty());
}

#[tokio::test]
async fn failed_queue_switch_keeps_old_listing_visible() {
    let h = loaded().await;
    h.queue.fail_next_read(RemoteError::Timeout);

    h.monitor.select_queue("emails").await.unwrap_err();

    let snapshot = h.monitor.snapshot();
    assert_eq!(snapshot.queue, "default");
    assert_eq!(ids(&snapshot), ["a", "b", "c"]);
    assert_eq!(h.monitor.selected_queue(), "emails");
}

#[tokio::test]
async fn newer_fetch_wins_over_late_older_one() {
    let h = loaded().await;
    let (queue, first) = h.monitor.begin_fetch();
    let (_, second) = h.monitor.begin_fetch();

    h.monitor.apply_fetch(second, &queue, vec![job("default", "new", JobStatus::Pending)]);
    let after_late = h.monitor.apply_fetch(first, &queue, vec![job("default", "old", JobStatus::Failed)]);

    assert_eq!(ids(&after_late), ["new"]);
    assert_eq!(ids(&h.monitor.snapshot()), ["new"]);
}

#[tokio::test]
async fn fetch_for_previous_queue_is_discarded() {
    let h = loaded().await;
    let (queue, seq) = h.monitor.begin_fetch();
    h.queue.set_jobs("emails", vec![job("emails", "e1", JobStatus::Pending)]);
    h.monitor.select_queue("emails").await.unwrap();

    let snapshot = h.monitor.apply_fetch(seq, &queue, vec![job("default", "late", JobStatus::Failed)]);

    assert_eq!(snapshot.queue, "emails");
    assert_eq!(ids(&snapshot), ["e1"]);
}

#[tokio::test]
async fn view_details_of_absent_job_is_none() {
    let h = loaded().await;
    assert_eq!(h.monitor.view_details("z"), None);
    assert_eq!(h.monitor.detail(), None);
}

#[tokio::test]
async fn detail_tracks_latest_snapshot() {
    let h = loaded().await;
    let opened = h.monitor.view_details("a").unwrap();
    assert!(opened.can_retry());

    h.monitor.retry("a").await.unwrap();

    let detail = h.monitor.detail().unwrap();
    assert_eq!(detail.status, DisplayedStatus::Known(JobStatus::Pending));
    assert!(!detail.can_retry());
    assert_eq!(detail.actions, ActionSet::only(JobAction::Cancel));
}

#[tokio::test]
async fn detail_closes_when_job_leaves_listing() {
    let h = loaded().await;
    h.monitor.view_details("b").unwrap();
    h.monitor.cancel("b").await.unwrap();
    assert_eq!(h.monitor.detail(), None);
}

#[tokio::test]
async fn switching_queue_closes_detail() {
    let h = loaded().await;
    h.monitor.view_details("a").unwrap();
    h.monitor.select_queue("emails").await.unwrap();
    h.monitor.select_queue("default").await.unwrap();
    assert_eq!(h.monitor.detail(), None);
}

#[tokio::test]
async fn retry_detail_retries_open_job() {
    let h = loaded().await;
    assert!(h.monitor.retry_detail().await.unwrap().is_none());

    h.monitor.view_details("a").unwrap();
    let receipt = h.monitor.retry_detail().await.unwrap().unwrap();

    assert_eq!(receipt.message_id, "a");
    assert_eq!(h.queue.mutation_calls(), 1);
}

#[tokio::test]
async fn close_details_clears_view() {
    let h = loaded().await;
    h.monitor.view_details("c").unwrap();
    h.monitor.close_details();
    assert_eq!(h.monitor.detail(), None);
}

#[tokio::test]
async fn refresh_queues_keeps_previous_list_on_failure() {
    let h = harness();
    h.queue.set_jobs("emails", Vec::new());

    assert_eq!(h.monitor.refresh_queues().await.unwrap(), ["default", "emails"]);

    h.queue.fail_next_read(RemoteError::Transport("refused".into()));
    let err = h.monitor.refresh_queues().await.unwrap_err();

    assert!(matches!(err, MonitorError::RemoteRead { what: "queues", .. }));
    assert_eq!(h.monitor.queues(), ["default", "emails"]);
    assert_eq!(h.notifier.calls()[0].title, "Could not load queues");
}

#[tokio::test]
async fn list_jobs_does_not_touch_snapshot() {
    let h = loaded().await;
    let before = h.monitor.snapshot();
    let jobs = h.monitor.list_jobs("default", 1).await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert!(Arc::ptr_eq(&before, &h.monitor.snapshot()));
}

#[tokio::test(start_paused = true)]
async fn poll_refreshes_each_tick_until_cancelled() {
    let h = harness();
    let cancel = CancellationToken::new();
    let stop = async {
        tokio::time::sleep(Duration::from_millis(2_500)).await;
        cancel.cancel();
    };

    tokio::join!(h.monitor.poll(Duration::from_secs(1), cancel.clone()), stop);

    // Ticks at 0s, 1s and 2s.
    assert_eq!(h.queue.list_job_calls(), 3);
    assert_eq!(ids(&h.monitor.snapshot()), ["a", "b", "c"]);
}

#[tokio::test(start_paused = true)]
async fn poll_survives_failed_ticks() {
    let h = harness();
    h.queue.fail_next_read(RemoteError::Timeout);
    let cancel = CancellationToken::new();
    let stop = async {
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        cancel.cancel();
    };

    tokio::join!(h.monitor.poll(Duration::from_secs(1), cancel.clone()), stop);

    assert_eq!(h.queue.list_job_calls(), 2);
    assert_eq!(ids(&h.monitor.snapshot()), ["a", "b", "c"]);
    assert_eq!(h.notifier.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn poll_with_reports_each_outcome() {
    let h = harness();
    h.queue.fail_next_read(RemoteError::Timeout);
    let cancel = CancellationToken::new();
    let mut outcomes = Vec::new();
    let stop = async {
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        cancel.cancel();
    };

    tokio::join!(
        h.monitor.poll_with(Duration::from_secs(1), cancel.clone(), |r| outcomes.push(r.is_ok())),
        stop
    );

    assert_eq!(outcomes, [false, true]);
}
