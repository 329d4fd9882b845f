// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Request capture and recording for test assertions.
//!
//! Every exchange completed by a mock transport is recorded here so specs can
//! assert on what was sent, independent of the transport instance itself.

mod elapsed_micros;
mod log;
mod request;

pub use log::CaptureLog;
pub use request::{CapturedArgs, CapturedOutcome, CapturedRequest};
