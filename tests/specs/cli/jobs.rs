//! Job command specs against an unreachable queue

use crate::prelude::*;

#[test]
fn list_against_dead_api_exits_1() {
    cli()
        .args(&["--api-url", DEAD_API, "jobs", "list"])
        .exits_with(1)
        .stdout_is_empty()
        .stderr_has("Could not reach the job queue.");
}

#[test]
fn json_list_failure_keeps_stdout_clean() {
    cli()
        .args(&["--api-url", DEAD_API, "--output", "json", "jobs", "list"])
        .exits_with(1)
        .stdout_is_empty();
}

#[test]
fn api_url_from_env() {
    cli()
        .env("JW_API_URL", DEAD_API)
        .args(&["queues"])
        .exits_with(1)
        .stderr_has("failed to load queues");
}

#[test]
fn retry_against_dead_api_exits_1_without_claiming_success() {
    cli()
        .args(&["--api-url", DEAD_API, "jobs", "retry", "abc"])
        .exits_with(1)
        .stdout_lacks("retried");
}

#[test]
fn empty_queue_name_is_refused() {
    cli()
        .args(&["--api-url", DEAD_API, "--queue", " ", "jobs", "list"])
        .exits_with(2)
        .stderr_has("queue name must not be empty");
}

#[test]
fn invalid_api_url_exits_1() {
    cli().args(&["--api-url", "not a url", "queues"]).exits_with(1).stderr_has("invalid API URL");
}
