// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fluent helpers for running `jw` in specs.

use std::path::PathBuf;
use std::sync::OnceLock;

use assert_cmd::Command;

/// An API address nothing listens on.
pub const DEAD_API: &str = "http://127.0.0.1:9/api";

/// Path to the `jw` binary, built once per test run.
///
/// Specs live in the root package, which does not own the binary, so cargo
/// never sets `CARGO_BIN_EXE_jw` for them. The binary sits in the same
/// profile directory as this test executable (`target/<profile>/deps/..`).
fn jw_binary() -> &'static PathBuf {
    static BINARY: OnceLock<PathBuf> = OnceLock::new();
    BINARY.get_or_init(|| {
        let exe = std::env::current_exe().expect("test executable path");
        let profile_dir = exe
            .parent()
            .and_then(|deps| deps.parent())
            .expect("test executable under target/<profile>/deps")
            .to_path_buf();
        let release = profile_dir.file_name().is_some_and(|name| name == "release");

        let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
        let mut build = std::process::Command::new(cargo);
        build.current_dir(env!("CARGO_MANIFEST_DIR")).args(["build", "-p", "jw", "--bin", "jw"]);
        if release {
            build.arg("--release");
        }
        let status = build.status().expect("cargo runs");
        assert!(status.success(), "building jw failed");

        let binary = profile_dir.join(format!("jw{}", std::env::consts::EXE_SUFFIX));
        assert!(binary.exists(), "jw binary missing at {}", binary.display());
        binary
    })
}

/// `jw` with a clean environment: no color, no inherited `JW_*` settings.
pub fn cli() -> Cli {
    let mut cmd = Command::new(jw_binary());
    cmd.env("NO_COLOR", "1")
        .env_remove("COLOR")
        .env_remove("JW_API_URL")
        .env_remove("JW_API_TOKEN")
        .env_remove("JW_QUEUE")
        .env_remove("JW_LIMIT")
        .env_remove("JW_LOG")
        .env("JW_TIMEOUT_MS", "2000");
    Cli { cmd }
}

pub struct Cli {
    cmd: Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and require exit status 0.
    pub fn passes(self) -> Output {
        self.exits_with(0)
    }

    /// Run and require the given exit status.
    pub fn exits_with(mut self, code: i32) -> Output {
        let out = self.cmd.output().expect("jw runs");
        let output = Output {
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        };
        assert_eq!(
            out.status.code(),
            Some(code),
            "unexpected exit status\nstdout:\n{}\nstderr:\n{}",
            output.stdout,
            output.stderr
        );
        output
    }
}

pub struct Output {
    stdout: String,
    stderr: String,
}

impl Output {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout lacks {:?}:\n{}", needle, self.stdout);
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout has {:?}:\n{}", needle, self.stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr lacks {:?}:\n{}", needle, self.stderr);
        self
    }

    pub fn stdout_is_empty(self) -> Self {
        assert!(self.stdout.is_empty(), "stdout not empty:\n{}", self.stdout);
        self
    }
}
