// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! XMLHttpRequest Mock
//!
//! A deterministic stand-in for an `XMLHttpRequest`-style transport object.
//! Specs install the mock, stub a response, and exercise code that issues
//! requests without real I/O. The mock reproduces the observable lifecycle
//! of the real object: ready states, header semantics and handler timing.
//!
//! ```
//! use xhrmock::{SpecLifecycle, Transport};
//!
//! SpecLifecycle::ambient().run(|registry| {
//!     registry.install().and_return(Some("bar"), "text/plain", 200);
//!
//!     let mut xhr = registry.create();
//!     xhr.open("GET", "/path").unwrap();
//!     xhr.send(None).unwrap();
//!
//!     assert_eq!(xhr.status_text(), "OK");
//!     assert_eq!(xhr.response_text(), Some("bar"));
//! });
//! ```

/// Re-exported capture types from xhrmock-capture crate.
pub mod capture {
    pub use xhrmock_capture::{CaptureLog, CapturedArgs, CapturedOutcome, CapturedRequest};
}
pub mod cli;
pub mod config;
pub mod descriptor;
pub mod env;
pub mod headers;
pub mod lifecycle;
pub mod mock;
pub mod registry;
#[doc(hidden)]
pub mod replay;
pub mod status_text;
pub mod stub;
pub mod transport;

pub use descriptor::ResponseDescriptor;
pub use headers::HeaderStore;
pub use lifecycle::{SpecGuard, SpecLifecycle};
pub use mock::MockTransport;
pub use registry::{ambient, create, install, restore, TransportRegistry};
pub use status_text::reason_phrase;
pub use stub::StubBuilder;
pub use transport::{
    OfflineTransport, OpenOptions, ReadyState, ReadyStateHandler, Transport, TransportConstructor,
    TransportError,
};
