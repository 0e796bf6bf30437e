// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jw jobs` - inspect and act on jobs in the selected queue

use std::io::Write;

use anyhow::Result;
use clap::{Args, Subcommand};
use jw_adapters::{JobQueueAdapter, NotifyAdapter};
use jw_core::{Clock, DisplayedStatus, JobAction, MessageId};
use jw_engine::{ActionReceipt, JobMonitor};
use serde::Serialize;

use super::job_display::{format_job_detail, format_job_list, status_label, JobRow};
use crate::color;
use crate::exit_error::ExitError;
use crate::output::{format_or_json, handle_list, OutputFormat};

#[derive(Args)]
pub struct JobsArgs {
    #[command(subcommand)]
    pub command: JobsCommand,
}

#[derive(Subcommand)]
pub enum JobsCommand {
    /// List jobs in the selected queue
    List {
        /// Only show jobs with this status (e.g. "failed", "pending")
        #[arg(long)]
        status: Option<String>,

        /// Maximum number of jobs to fetch (default: JW_LIMIT or 100)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Show every field of a job
    Show {
        /// Message ID
        id: String,
    },
    /// Re-enqueue a failed job
    Retry {
        /// Message ID
        id: String,
    },
    /// Withdraw a pending job
    Cancel {
        /// Message ID
        id: String,
    },
}

/// Outcome of `jw jobs retry|cancel` as emitted by `--output json`.
#[derive(Serialize)]
struct ActionReport<'a> {
    action: JobAction,
    message_id: &'a MessageId,
    reconciled: bool,
    /// The job as re-read after the action; absent once cancelled.
    job: Option<JobRow<'a>>,
}

pub async fn handle<Q, N, C>(
    command: JobsCommand,
    monitor: &JobMonitor<Q, N, C>,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()>
where
    Q: JobQueueAdapter,
    N: NotifyAdapter,
    C: Clock,
{
    match command {
        JobsCommand::List { status, limit } => {
            let queue = monitor.selected_queue();
            let mut jobs = match limit {
                Some(n) => monitor.list_jobs(&queue, n).await.map_err(ExitError::from)?,
                None => monitor.refresh().await.map_err(ExitError::from)?.jobs.clone(),
            };
            if let Some(wanted) = status {
                let wanted = DisplayedStatus::from(wanted.trim().to_lowercase());
                jobs.retain(|j| j.status == wanted);
            }
            let rows: Vec<JobRow<'_>> = jobs.iter().map(JobRow::new).collect();
            handle_list(out, format, &rows, &format!("No jobs in queue '{}'", queue), |items, out| {
                format_job_list(out, items)
            })?;
        }
        JobsCommand::Show { id } => {
            monitor.refresh().await.map_err(ExitError::from)?;
            let detail = monitor.view_details(&id);
            format_or_json(out, format, &detail, |out| match &detail {
                Some(detail) => format_job_detail(out, detail),
                None => writeln!(out, "Job not found"),
            })?;
        }
        JobsCommand::Retry { id } => {
            monitor.refresh().await.map_err(ExitError::from)?;
            let receipt = monitor.retry(&id).await.map_err(ExitError::from)?;
            print_receipt(out, format, &receipt)?;
        }
        JobsCommand::Cancel { id } => {
            monitor.refresh().await.map_err(ExitError::from)?;
            let receipt = monitor.cancel(&id).await.map_err(ExitError::from)?;
            print_receipt(out, format, &receipt)?;
        }
    }
    Ok(())
}

fn print_receipt(out: &mut dyn Write, format: OutputFormat, receipt: &ActionReceipt) -> Result<()> {
    let job = receipt.snapshot.get(receipt.message_id.as_str());
    let report = ActionReport {
        action: receipt.action,
        message_id: &receipt.message_id,
        reconciled: receipt.reconciled,
        job: job.map(JobRow::new),
    };
    format_or_json(out, format, &report, |out| {
        writeln!(
            out,
            "Job {} {}",
            color::header(receipt.message_id.as_str()),
            receipt.action.past_tense()
        )?;
        if !receipt.reconciled {
            writeln!(out, "{}", color::muted("(listing could not be refreshed; showing last known state)"))?;
        }
        match job {
            Some(job) => writeln!(
                out,
                "  {} {}",
                color::context("Status:"),
                color::status(job.status.descriptor().color, &status_label(&job.status))
            ),
            None => writeln!(out, "  {}", color::context("No longer listed")),
        }
    })
}

#[cfg(test)]
#[path = "jobs_tests.rs"]
mod tests;
