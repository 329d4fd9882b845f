// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The transport object surface shared by real and mock implementations.
//!
//! Mirrors the `XMLHttpRequest` lifecycle: construct, `open`, optionally
//! `set_request_header`, `send`, then read `status`, `status_text`, the
//! response body and response headers. Instances are built through a
//! [`TransportConstructor`], which is what a registry binds and rebinds.

use crate::mock::MockTransport;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Lifecycle phase of a transport instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReadyState {
    Unsent = 0,
    Opened = 1,
    /// Never entered by the mock; send resolves straight to `Done`.
    HeadersReceived = 2,
    /// Never entered by the mock; send resolves straight to `Done`.
    Loading = 3,
    Done = 4,
}

impl ReadyState {
    /// Numeric value as exposed by `readyState`
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ReadyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unsent => "UNSENT",
            Self::Opened => "OPENED",
            Self::HeadersReceived => "HEADERS_RECEIVED",
            Self::Loading => "LOADING",
            Self::Done => "DONE",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by transport operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Operation invoked in a state that forbids it
    #[error("InvalidState: cannot {operation} while {state}: {reason}")]
    InvalidState {
        operation: &'static str,
        state: ReadyState,
        reason: &'static str,
    },

    /// A request reached a transport with no network behind it
    #[error("Offline: {method} {url} was sent without a mock installed")]
    Offline { method: String, url: String },
}

impl TransportError {
    pub fn invalid_state(operation: &'static str, state: ReadyState, reason: &'static str) -> Self {
        Self::InvalidState {
            operation,
            state,
            reason,
        }
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }
}

/// Optional arguments to `open`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenOptions {
    pub asynchronous: bool,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl OpenOptions {
    /// Synchronous open with no credentials
    pub fn sync() -> Self {
        Self {
            asynchronous: false,
            ..Self::default()
        }
    }

    pub fn with_user(mut self, user: &str) -> Self {
        self.user = Some(user.to_string());
        self
    }

    pub fn with_password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string());
        self
    }

    pub fn with_credentials(self, user: &str, password: &str) -> Self {
        self.with_user(user).with_password(password)
    }
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            asynchronous: true,
            user: None,
            password: None,
        }
    }
}

/// `onreadystatechange` handler; receives the instance whose state changed.
pub type ReadyStateHandler = Box<dyn FnMut(&dyn Transport)>;

/// An `XMLHttpRequest`-style transport object.
pub trait Transport {
    fn ready_state(&self) -> ReadyState;

    /// Open a request with explicit mode and credentials
    fn open_with(
        &mut self,
        method: &str,
        url: &str,
        options: OpenOptions,
    ) -> Result<(), TransportError>;

    /// Open an asynchronous request without credentials
    fn open(&mut self, method: &str, url: &str) -> Result<(), TransportError> {
        self.open_with(method, url, OpenOptions::default())
    }

    fn set_request_header(&mut self, name: &str, value: &str) -> Result<(), TransportError>;

    fn send(&mut self, data: Option<&str>) -> Result<(), TransportError>;

    /// Return to `Unsent` without notifying the handler
    fn abort(&mut self);

    fn status(&self) -> u16;

    fn status_text(&self) -> &str;

    /// Response body; `None` before completion and for `HEAD` requests
    fn response_text(&self) -> Option<&str>;

    fn get_response_header(&self, name: &str) -> Option<String>;

    fn get_all_response_headers(&self) -> String;

    fn set_on_ready_state_change(&mut self, handler: Option<ReadyStateHandler>);

    /// Downcast to the mock for request-side inspection
    fn as_mock(&self) -> Option<&MockTransport> {
        None
    }
}

struct ConstructorInner {
    name: String,
    make: Box<dyn Fn() -> Box<dyn Transport> + Send + Sync>,
}

/// A bindable constructor for transport instances.
///
/// Clones share identity; [`TransportConstructor::same_as`] compares by
/// reference, not by behavior.
#[derive(Clone)]
pub struct TransportConstructor {
    inner: Arc<ConstructorInner>,
}

impl TransportConstructor {
    pub fn new(
        name: impl Into<String>,
        make: impl Fn() -> Box<dyn Transport> + Send + Sync + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(ConstructorInner {
                name: name.into(),
                make: Box::new(make),
            }),
        }
    }

    /// Constructor for [`OfflineTransport`]
    pub fn offline() -> Self {
        Self::new(OfflineTransport::NAME, || Box::new(OfflineTransport::new()))
    }

    pub fn construct(&self) -> Box<dyn Transport> {
        (self.inner.make)()
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Reference identity
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for TransportConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportConstructor")
            .field("name", &self.inner.name)
            .finish_non_exhaustive()
    }
}

/// Stand-in for the real transport when no network is available.
///
/// Follows the open/header state rules of the real object but refuses to
/// send, so traffic that escapes the mock fails loudly.
pub struct OfflineTransport {
    ready_state: ReadyState,
    method: String,
    url: String,
    on_ready_state_change: Option<ReadyStateHandler>,
}

impl OfflineTransport {
    pub const NAME: &'static str = "offline";

    pub fn new() -> Self {
        Self {
            ready_state: ReadyState::Unsent,
            method: String::new(),
            url: String::new(),
            on_ready_state_change: None,
        }
    }
}

impl Default for OfflineTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for OfflineTransport {
    fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    fn open_with(
        &mut self,
        method: &str,
        url: &str,
        _options: OpenOptions,
    ) -> Result<(), TransportError> {
        if method.trim().is_empty() {
            return Err(TransportError::invalid_state(
                "open",
                self.ready_state,
                "method is required",
            ));
        }
        if url.trim().is_empty() {
            return Err(TransportError::invalid_state(
                "open",
                self.ready_state,
                "url is required",
            ));
        }
        self.method = method.to_string();
        self.url = url.to_string();
        self.ready_state = ReadyState::Opened;
        if let Some(mut handler) = self.on_ready_state_change.take() {
            handler(&*self);
            self.on_ready_state_change = Some(handler);
        }
        Ok(())
    }

    fn set_request_header(&mut self, _name: &str, _value: &str) -> Result<(), TransportError> {
        if self.ready_state != ReadyState::Opened {
            return Err(TransportError::invalid_state(
                "set_request_header",
                self.ready_state,
                "open must be called first",
            ));
        }
        Ok(())
    }

    fn send(&mut self, _data: Option<&str>) -> Result<(), TransportError> {
        if self.ready_state != ReadyState::Opened {
            return Err(TransportError::invalid_state(
                "send",
                self.ready_state,
                "open must be called first",
            ));
        }
        tracing::warn!(method = %self.method, url = %self.url, "request sent without a mock installed");
        Err(TransportError::Offline {
            method: self.method.clone(),
            url: self.url.clone(),
        })
    }

    fn abort(&mut self) {
        self.ready_state = ReadyState::Unsent;
    }

    fn status(&self) -> u16 {
        0
    }

    fn status_text(&self) -> &str {
        ""
    }

    fn response_text(&self) -> Option<&str> {
        None
    }

    fn get_response_header(&self, _name: &str) -> Option<String> {
        None
    }

    fn get_all_response_headers(&self) -> String {
        String::new()
    }

    fn set_on_ready_state_change(&mut self, handler: Option<ReadyStateHandler>) {
        self.on_ready_state_change = handler;
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
