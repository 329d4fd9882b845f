// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory record of mock exchanges, optionally mirrored to JSONL.

use crate::request::{CapturedArgs, CapturedOutcome, CapturedRequest};
use parking_lot::Mutex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::{Instant, SystemTime};

struct Inner {
    requests: Vec<CapturedRequest>,
    next_seq: u64,
    mirror: Option<BufWriter<File>>,
}

/// Shared log of what mocks were asked to do.
///
/// Clones share the same records. Sequence numbers keep counting across
/// [`CaptureLog::clear`], so mirrored lines stay unique per log.
#[derive(Clone)]
pub struct CaptureLog {
    start: Instant,
    inner: Arc<Mutex<Inner>>,
}

impl CaptureLog {
    pub fn new() -> Self {
        Self::from_mirror(None)
    }

    /// Create a log that also appends every record to `path` as JSONL
    pub fn with_file(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::from_mirror(Some(BufWriter::new(file))))
    }

    fn from_mirror(mirror: Option<BufWriter<File>>) -> Self {
        Self {
            start: Instant::now(),
            inner: Arc::new(Mutex::new(Inner {
                requests: Vec::new(),
                next_seq: 0,
                mirror,
            })),
        }
    }

    /// Record an exchange and return its sequence number.
    ///
    /// A mirror that fails to write is dropped; in-memory recording continues.
    pub fn record(&self, request: CapturedArgs, outcome: CapturedOutcome) -> u64 {
        let mut inner = self.inner.lock();
        let seq = inner.next_seq;
        inner.next_seq += 1;

        let captured = CapturedRequest {
            seq,
            timestamp: SystemTime::now(),
            elapsed: self.start.elapsed(),
            request,
            outcome,
        };

        if let Some(mirror) = inner.mirror.as_mut() {
            let written = serde_json::to_string(&captured)
                .map_err(std::io::Error::from)
                .and_then(|line| {
                    writeln!(mirror, "{}", line)?;
                    mirror.flush()
                });
            if written.is_err() {
                inner.mirror = None;
            }
        }

        inner.requests.push(captured);
        seq
    }

    /// Every exchange since the last clear, oldest first
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.inner.lock().requests.clone()
    }

    /// The last `n` exchanges, oldest first
    pub fn last(&self, n: usize) -> Vec<CapturedRequest> {
        let inner = self.inner.lock();
        let skip = inner.requests.len().saturating_sub(n);
        inner.requests[skip..].to_vec()
    }

    pub fn most_recent(&self) -> Option<CapturedRequest> {
        self.inner.lock().requests.last().cloned()
    }

    pub fn count(&self, pred: impl Fn(&CapturedRequest) -> bool) -> usize {
        self.inner.lock().requests.iter().filter(|r| pred(r)).count()
    }

    /// Exchanges whose url contains `pattern`
    pub fn find_by_url(&self, pattern: &str) -> Vec<CapturedRequest> {
        self.select(|r| r.request.url.contains(pattern))
    }

    /// Exchanges by method, ignoring ASCII case
    pub fn find_by_method(&self, method: &str) -> Vec<CapturedRequest> {
        self.select(|r| r.request.method.eq_ignore_ascii_case(method))
    }

    /// Exchanges answered with `status`
    pub fn find_by_status(&self, status: u16) -> Vec<CapturedRequest> {
        self.select(|r| r.outcome.status() == Some(status))
    }

    pub fn find_responses(&self) -> Vec<CapturedRequest> {
        self.select(|r| matches!(r.outcome, CapturedOutcome::Response { .. }))
    }

    /// Exchanges aborted after `open`
    pub fn find_aborted(&self) -> Vec<CapturedRequest> {
        self.select(|r| matches!(r.outcome, CapturedOutcome::Aborted))
    }

    pub fn len(&self) -> usize {
        self.inner.lock().requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().requests.is_empty()
    }

    /// Forget recorded exchanges. The mirror file is left untouched.
    pub fn clear(&self) {
        self.inner.lock().requests.clear();
    }

    fn select(&self, pred: impl Fn(&CapturedRequest) -> bool) -> Vec<CapturedRequest> {
        self.inner
            .lock()
            .requests
            .iter()
            .filter(|r| pred(r))
            .cloned()
            .collect()
    }
}

impl Default for CaptureLog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CaptureLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("CaptureLog")
            .field("len", &inner.requests.len())
            .field("next_seq", &inner.next_seq)
            .field("mirrored", &inner.mirror.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
