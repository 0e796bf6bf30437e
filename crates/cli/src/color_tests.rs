// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn force_color() {
    std::env::set_var("COLOR", "1");
    std::env::remove_var("NO_COLOR");
}

fn disable_color() {
    std::env::set_var("NO_COLOR", "1");
    std::env::remove_var("COLOR");
}

#[yare::parameterized(
    pending   = { StatusColor::Yellow, 179 },
    running   = { StatusColor::Blue,   75 },
    completed = { StatusColor::Green,  114 },
    failed    = { StatusColor::Red,    167 },
)]
fn status_palette(color: StatusColor, code: u8) {
    assert_eq!(status_code(color), code);
}

#[test]
#[serial]
fn styles_follow_color_setting() {
    let plain = format!("{:?}", Styles::plain());

    force_color();
    assert_ne!(format!("{:?}", styles()), plain);

    disable_color();
    assert_eq!(format!("{:?}", styles()), plain);
}

#[yare::parameterized(
    header_color  = { header,  "\x1b[38;5;74m" },
    context_color = { context, "\x1b[38;5;245m" },
    muted_color   = { muted,   "\x1b[38;5;240m" },
)]
#[serial]
fn helpers_wrap_text_when_color_forced(paint: fn(&str) -> String, prefix: &str) {
    force_color();
    let result = paint("foo");
    assert!(result.starts_with(prefix), "got {:?}", result);
    assert!(result.contains("foo"));
    assert!(result.ends_with("\x1b[0m"));
}

#[test]
#[serial]
fn status_is_colored_by_palette_slot() {
    force_color();
    assert_eq!(status(StatusColor::Red, "Failed"), "\x1b[38;5;167mFailed\x1b[0m");
}

#[test]
#[serial]
fn helpers_plain_when_no_color() {
    disable_color();
    assert_eq!(header("foo"), "foo");
    assert_eq!(context("baz"), "baz");
    assert_eq!(muted("dim"), "dim");
    assert_eq!(status(StatusColor::Green, "Completed"), "Completed");
}

#[test]
#[serial]
fn no_color_overrides_color_force() {
    std::env::set_var("NO_COLOR", "1");
    std::env::set_var("COLOR", "1");
    assert!(!should_colorize());
}
