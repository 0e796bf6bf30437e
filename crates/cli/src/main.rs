// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jw: watch a background job queue and retry or cancel its jobs

mod color;
mod commands;
mod env;
mod exit_error;
mod output;
mod table;
mod toast;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use jw_adapters::{HttpConfig, HttpJobQueue};
use jw_core::SystemClock;
use jw_engine::{JobMonitor, MonitorConfig, MonitorError};
use tracing_subscriber::EnvFilter;

use crate::commands::jobs::JobsArgs;
use crate::commands::watch::WatchArgs;
use crate::exit_error::{ExitError, EXIT_REMOTE};
use crate::output::OutputFormat;
use crate::toast::TerminalNotifyAdapter;

type CliMonitor = JobMonitor<HttpJobQueue, TerminalNotifyAdapter, SystemClock>;

#[derive(Parser)]
#[command(name = "jw", version, about = "Monitor a background job queue", styles = color::styles())]
struct Cli {
    /// Base URL of the job queue API
    #[arg(long, global = true, env = "JW_API_URL", default_value = env::DEFAULT_API_URL)]
    api_url: String,

    /// Queue to operate on
    #[arg(short = 'q', long, global = true, env = "JW_QUEUE", default_value = jw_engine::DEFAULT_QUEUE)]
    queue: String,

    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, default_value_t)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List queue names
    Queues,
    /// List, inspect, retry and cancel jobs
    Jobs(JobsArgs),
    /// Redraw the job table on an interval until Ctrl-C
    Watch(WatchArgs),
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        let code = match err.downcast_ref::<ExitError>() {
            Some(exit) => {
                eprintln!("error: {}", exit.message);
                exit.code
            }
            None => {
                eprintln!("error: {:#}", err);
                EXIT_REMOTE
            }
        };
        std::process::exit(code);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_new(env::log_filter()).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let format = cli.output;
    let notifier = match command {
        Commands::Watch(_) => TerminalNotifyAdapter::new(format),
        _ => TerminalNotifyAdapter::new(format).without_failures(),
    };
    let monitor = connect(&cli.api_url, &cli.queue, notifier)?;
    let mut stdout = std::io::stdout();
    match command {
        Commands::Queues => commands::queues::handle(&monitor, format, &mut stdout).await,
        Commands::Jobs(args) => commands::jobs::handle(args.command, &monitor, format, &mut stdout).await,
        Commands::Watch(args) => commands::watch::handle(args, &monitor, &SystemClock, format).await,
    }
}

fn connect(api_url: &str, queue: &str, notifier: TerminalNotifyAdapter) -> Result<CliMonitor> {
    let queue = queue.trim();
    if queue.is_empty() {
        return Err(ExitError::from(MonitorError::EmptyQueueName).into());
    }

    let mut http = HttpConfig::new(api_url).timeout(env::request_timeout());
    if let Some(token) = env::api_token() {
        http = http.token(token);
    }
    let client = HttpJobQueue::new(http).map_err(|e| ExitError::new(EXIT_REMOTE, e.to_string()))?;
    tracing::debug!(api_url, queue, "connecting to job queue");

    let config = MonitorConfig::default().queue(queue).limit(env::list_limit());
    Ok(JobMonitor::new(client, notifier, SystemClock, config))
}
