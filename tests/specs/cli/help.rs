//! CLI help output specs

use crate::prelude::*;

#[test]
fn jw_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn jw_help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("queues")
        .stdout_has("jobs")
        .stdout_has("watch")
        .stdout_has("--api-url")
        .stdout_has("--output");
}

#[test]
fn jw_jobs_help_shows_subcommands() {
    cli()
        .args(&["jobs", "--help"])
        .passes()
        .stdout_has("list")
        .stdout_has("show")
        .stdout_has("retry")
        .stdout_has("cancel");
}

#[test]
fn jw_watch_help_shows_interval() {
    cli().args(&["watch", "--help"]).passes().stdout_has("--interval");
}

#[test]
fn jw_version() {
    cli().args(&["--version"]).passes().stdout_has("jw 0.1.0");
}

#[test]
fn unknown_output_format_is_a_usage_error() {
    cli().args(&["--output", "yaml", "queues"]).exits_with(2).stderr_has("yaml");
}
