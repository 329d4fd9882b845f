// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by xhrmock are defined here.
//! Use these accessors instead of calling `std::env::var()` directly.

/// Generated env var name constants.
mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

pub use names::*;

use std::path::PathBuf;

/// Default log filter when `XHRMOCK_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// `XHRMOCK_STUB`: Stub file applied by the replay binary.
pub fn stub_path() -> Option<PathBuf> {
    var_path(names::XHRMOCK_STUB)
}

/// `XHRMOCK_CAPTURE`: JSONL file mirroring the capture log.
pub fn capture_path() -> Option<PathBuf> {
    var_path(names::XHRMOCK_CAPTURE)
}

/// `XHRMOCK_LOG`: `tracing` filter directive for the binary.
pub fn log_filter() -> String {
    std::env::var(names::XHRMOCK_LOG)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

fn var_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
