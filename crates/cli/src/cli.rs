// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing for the replay binary.

use clap::Parser;
use std::path::PathBuf;

/// Replay a request against a stubbed mock transport
#[derive(Parser, Debug, Clone)]
#[command(name = "xhrmock", version, about = "Replay a request against a stubbed mock transport")]
pub struct Cli {
    /// Request URL
    #[arg(value_name = "URL")]
    pub url: String,

    /// Request method
    #[arg(short = 'X', long, default_value = "GET")]
    pub method: String,

    /// Request header as 'Name: value' (can be specified multiple times)
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Request body
    #[arg(short = 'd', long)]
    pub data: Option<String>,

    /// Stub file (TOML or JSON); falls back to XHRMOCK_STUB
    #[arg(long, value_name = "PATH")]
    pub stub: Option<PathBuf>,

    /// Mirror the capture log to a JSONL file; falls back to XHRMOCK_CAPTURE
    #[arg(long, value_name = "PATH")]
    pub capture: Option<PathBuf>,

    /// Open the request in synchronous mode
    #[arg(long)]
    pub sync: bool,

    /// User for `open`
    #[arg(short = 'u', long)]
    pub user: Option<String>,

    /// Password for `open`
    #[arg(long)]
    pub password: Option<String>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
