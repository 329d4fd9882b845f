// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Build scripts are expected to panic on failure.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fmt::Write as _;

/// Environment variables read at runtime; each becomes a `&str` constant.
const ENV_VARS: &[&str] = &["XHRMOCK_STUB", "XHRMOCK_CAPTURE", "XHRMOCK_LOG"];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let mut out = String::new();
    for name in ENV_VARS {
        writeln!(out, "pub const {name}: &str = \"{name}\";").unwrap();
    }

    let out_dir = std::env::var("OUT_DIR").unwrap();
    std::fs::write(std::path::Path::new(&out_dir).join("env_names.rs"), out).unwrap();
}
