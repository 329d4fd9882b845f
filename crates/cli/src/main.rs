// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Replay binary entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use xhrmock::cli::Cli;
use xhrmock::env;
use xhrmock::replay;

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::new(env::log_filter()))
        .init();

    match replay::run(&cli).and_then(|report| replay::render(&report)) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
