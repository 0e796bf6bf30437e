// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jw queues` - list queue names

use std::io::Write;

use anyhow::Result;
use jw_adapters::{JobQueueAdapter, NotifyAdapter};
use jw_core::Clock;
use jw_engine::JobMonitor;

use crate::color;
use crate::exit_error::ExitError;
use crate::output::{handle_list, OutputFormat};

pub async fn handle<Q, N, C>(monitor: &JobMonitor<Q, N, C>, format: OutputFormat, out: &mut dyn Write) -> Result<()>
where
    Q: JobQueueAdapter,
    N: NotifyAdapter,
    C: Clock,
{
    let queues = monitor.refresh_queues().await.map_err(ExitError::from)?;
    let selected = monitor.selected_queue();
    handle_list(out, format, &queues, "No queues", |items, out| {
        for name in items {
            if *name == selected {
                writeln!(out, "{} {}", name, color::muted("(selected)"))?;
            } else {
                writeln!(out, "{}", name)?;
            }
        }
        Ok(())
    })
}

#[cfg(test)]
#[path = "queues_tests.rs"]
mod tests;
