// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Display helpers for job commands.

use std::io::{self, Write};

use jw_core::{format_completed_at, ActionSet, DisplayedStatus, JobRecord};
use jw_engine::JobDetail;
use serde::Serialize;

use crate::color;
use crate::table::{Column, Table};

const SHORT_ID_LEN: usize = 8;

/// First eight characters of a message id followed by an ellipsis.
///
/// The ellipsis is always shown so a listed id never reads as complete.
pub(crate) fn short_id(id: &str) -> String {
    format!("{}...", jw_core::short(id, SHORT_ID_LEN))
}

/// Status label as shown to operators.
///
/// An unrecognized status reads as pending with its raw text alongside, so
/// a wire value such as `"FAILED"` never passes for a real failure.
pub(crate) fn status_label(status: &DisplayedStatus) -> String {
    let label = status.descriptor().label;
    match status {
        DisplayedStatus::Known(_) => label.to_string(),
        DisplayedStatus::Unrecognized(raw) => format!("{} (unknown: {})", label, raw),
    }
}

/// Row menu entries: `view` is always offered.
pub(crate) fn row_actions(actions: ActionSet) -> String {
    std::iter::once("view".to_string())
        .chain(actions.iter().map(|a| a.to_string()))
        .collect::<Vec<_>>()
        .join(",")
}

/// A listed job as emitted by `--output json`.
#[derive(Serialize)]
pub(crate) struct JobRow<'a> {
    #[serde(flatten)]
    pub record: &'a JobRecord,
    pub actions: ActionSet,
}

impl<'a> JobRow<'a> {
    pub fn new(record: &'a JobRecord) -> Self {
        Self { record, actions: record.allowed_actions() }
    }
}

pub(crate) fn format_job_list(out: &mut dyn Write, jobs: &[JobRow<'_>]) -> io::Result<()> {
    let mut table = Table::new(vec![
        Column::muted("ID"),
        Column::left("QUEUE").with_max(24),
        Column::status("STATUS"),
        Column::left("COMPLETED"),
        Column::left("ACTIONS"),
    ]);
    for row in jobs {
        let job = row.record;
        table.row(
            vec![
                short_id(job.message_id.as_str()),
                job.queue.clone(),
                status_label(&job.status),
                format_completed_at(job.completed_at.as_deref()),
                row_actions(row.actions),
            ],
            Some(job.status.descriptor().color),
        );
    }
    table.render(out)
}

pub(crate) fn format_job_detail(out: &mut dyn Write, detail: &JobDetail) -> io::Result<()> {
    writeln!(out, "{} {}", color::header("Job:"), detail.message_id)?;
    writeln!(out, "  {} {}", color::context("Queue:"), detail.queue)?;
    writeln!(
        out,
        "  {} {}",
        color::context("Status:"),
        color::status(detail.descriptor.color, &status_label(&detail.status))
    )?;
    writeln!(
        out,
        "  {} {}",
        color::context("Completed:"),
        format_completed_at(detail.completed_at.as_deref())
    )?;
    writeln!(out, "  {} {}", color::context("Actions:"), detail.actions)?;

    if !detail.fields.is_empty() {
        writeln!(out)?;
        writeln!(out, "  {}", color::header("Fields:"))?;
        let width = detail.fields.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
        for (key, value) in &detail.fields {
            writeln!(out, "    {:<width$}  {}", key, format_field(value), width = width)?;
        }
    }
    Ok(())
}

/// Strings print bare; everything else as compact JSON.
pub(crate) fn format_field(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.replace('\n', "\\n"),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "job_display_tests.rs"]
mod tests;
