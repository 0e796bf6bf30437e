// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jw watch` - redraw the job table on every poll until Ctrl-C

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use jw_adapters::{JobQueueAdapter, NotifyAdapter};
use jw_core::Clock;
use jw_engine::{JobMonitor, Snapshot};
use tokio_util::sync::CancellationToken;

use super::job_display::{format_job_list, JobRow};
use crate::color;
use crate::output::{format_time_ago, OutputFormat};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Args)]
pub struct WatchArgs {
    /// Refresh interval in milliseconds (default: JW_POLL_MS or 5000)
    #[arg(long, value_name = "MS")]
    pub interval: Option<u64>,
}

pub async fn handle<Q, N, C>(
    args: WatchArgs,
    monitor: &JobMonitor<Q, N, C>,
    clock: &C,
    format: OutputFormat,
) -> Result<()>
where
    Q: JobQueueAdapter,
    N: NotifyAdapter,
    C: Clock,
{
    let interval = args
        .interval
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or_else(crate::env::poll_interval);

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        on_ctrl_c.cancel();
    });

    let clear = format == OutputFormat::Text && color::should_colorize();
    monitor
        .poll_with(interval, cancel, |outcome| {
            // Failed ticks were already reported by the notifier.
            let Ok(snapshot) = outcome else { return };
            let mut stdout = io::stdout().lock();
            if clear {
                let _ = write!(stdout, "{}", CLEAR_SCREEN);
            }
            if let Err(e) = render_frame(&mut stdout, &snapshot, clock.epoch_ms(), interval, format) {
                tracing::debug!(error = %e, "failed to draw watch frame");
            }
            let _ = stdout.flush();
        })
        .await;
    Ok(())
}

/// One redraw: a status line plus the job table, or one JSON line per tick.
pub(crate) fn render_frame(
    out: &mut dyn Write,
    snapshot: &Snapshot,
    now_ms: u64,
    interval: Duration,
    format: OutputFormat,
) -> io::Result<()> {
    let rows: Vec<JobRow<'_>> = snapshot.jobs.iter().map(JobRow::new).collect();
    match format {
        OutputFormat::Json => {
            let frame = serde_json::json!({
                "queue": snapshot.queue,
                "fetched_at_ms": snapshot.fetched_at_ms,
                "jobs": rows,
            });
            writeln!(out, "{}", frame)
        }
        OutputFormat::Text => {
            let age = format_time_ago(now_ms, snapshot.fetched_at_ms.unwrap_or(0));
            writeln!(
                out,
                "{} {}  {}",
                color::header("Queue:"),
                snapshot.queue,
                color::muted(&format!(
                    "{} jobs, updated {} ago, every {}s",
                    rows.len(),
                    age,
                    interval.as_secs_f64()
                ))
            )?;
            writeln!(out)?;
            if rows.is_empty() {
                writeln!(out, "No jobs")
            } else {
                format_job_list(out, &rows)
            }
        }
    }
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
