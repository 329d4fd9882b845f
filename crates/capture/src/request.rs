// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Captured request data types.

use super::elapsed_micros;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

/// Captured request record
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CapturedRequest {
    /// Sequence number
    pub seq: u64,

    /// Wall-clock timestamp
    pub timestamp: SystemTime,

    /// Elapsed time since capture started
    #[serde(rename = "elapsed_us", with = "elapsed_micros")]
    pub elapsed: Duration,

    /// Request as issued by the code under test
    pub request: CapturedArgs,

    /// Response handed back (or abort)
    pub outcome: CapturedOutcome,
}

/// What the code under test passed to `open`, `set_request_header` and `send`
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapturedArgs {
    pub method: String,
    pub url: String,
    pub asynchronous: bool,
    pub user: Option<String>,
    /// Request headers in the order they were first set
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// Captured outcome
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CapturedOutcome {
    Response {
        status: u16,
        status_text: String,
        content_type: String,
        body: Option<String>,
    },
    Aborted,
}

impl CapturedOutcome {
    /// Status code for responses, `None` for aborted requests
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            Self::Aborted => None,
        }
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
