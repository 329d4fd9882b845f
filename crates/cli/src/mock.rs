// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic mock transport.
//!
//! The mock resolves synchronously: `send` moves straight from `Opened` to
//! `Done`, so handlers observe states 1 and 4 only. Each instance reads the
//! descriptor active in its registry at the moment `send` is called.

use crate::capture::{CapturedArgs, CapturedOutcome};
use crate::descriptor::ResponseDescriptor;
use crate::headers::HeaderStore;
use crate::registry::StubSource;
use crate::status_text::reason_phrase;
use crate::transport::{OpenOptions, ReadyState, ReadyStateHandler, Transport, TransportError};
use std::fmt;

/// Mock transport instance
pub struct MockTransport {
    source: Option<StubSource>,
    ready_state: ReadyState,
    history: Vec<ReadyState>,
    method: Option<String>,
    url: Option<String>,
    asynchronous: bool,
    user: Option<String>,
    password: Option<String>,
    request_body: Option<String>,
    request_headers: HeaderStore,
    response_headers: HeaderStore,
    status: u16,
    status_text: String,
    response_body: Option<String>,
    on_ready_state_change: Option<ReadyStateHandler>,
}

impl MockTransport {
    pub const NAME: &'static str = "mock";

    /// Create a mock that is not attached to any registry.
    ///
    /// Detached mocks always answer with the default descriptor.
    pub fn new() -> Self {
        Self::with_source(None)
    }

    pub(crate) fn with_source(source: Option<StubSource>) -> Self {
        Self {
            source,
            ready_state: ReadyState::Unsent,
            history: vec![ReadyState::Unsent],
            method: None,
            url: None,
            asynchronous: true,
            user: None,
            password: None,
            request_body: None,
            request_headers: HeaderStore::new(),
            response_headers: HeaderStore::new(),
            status: 0,
            status_text: String::new(),
            response_body: None,
            on_ready_state_change: None,
        }
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_async(&self) -> bool {
        self.asynchronous
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn request_body(&self) -> Option<&str> {
        self.request_body.as_deref()
    }

    pub fn request_headers(&self) -> &HeaderStore {
        &self.request_headers
    }

    pub fn response_headers(&self) -> &HeaderStore {
        &self.response_headers
    }

    /// Every state this instance has been in, oldest first
    pub fn ready_state_history(&self) -> &[ReadyState] {
        &self.history
    }

    fn is_head(&self) -> bool {
        self.method
            .as_deref()
            .is_some_and(|m| m.eq_ignore_ascii_case("HEAD"))
    }

    fn transition(&mut self, state: ReadyState) {
        self.ready_state = state;
        self.history.push(state);
    }

    fn notify(&mut self) {
        // Handlers only see `&dyn Transport`, so they cannot replace themselves.
        if let Some(mut handler) = self.on_ready_state_change.take() {
            handler(&*self);
            self.on_ready_state_change = Some(handler);
        }
    }

    fn reset_response(&mut self) {
        self.response_headers.clear();
        self.status = 0;
        self.status_text.clear();
        self.response_body = None;
    }

    fn captured_args(&self) -> CapturedArgs {
        CapturedArgs {
            method: self.method.clone().unwrap_or_default(),
            url: self.url.clone().unwrap_or_default(),
            asynchronous: self.asynchronous,
            user: self.user.clone(),
            headers: self.request_headers.to_pairs(),
            body: self.request_body.clone(),
        }
    }

    fn apply(&mut self, descriptor: &ResponseDescriptor) {
        let content_length = descriptor.content_length().to_string();
        self.response_headers
            .set("Content-Type", &descriptor.content_type);
        self.response_headers.set("Content-Length", &content_length);
        for (name, value) in &descriptor.headers {
            self.response_headers.set(name, value);
        }
        // Set last: extras never override the body length.
        self.response_headers.set("Content-Length", &content_length);
        self.status = descriptor.status;
        self.status_text = reason_phrase(descriptor.status).to_string();
        self.response_body = if self.is_head() {
            None
        } else {
            descriptor.body.clone()
        };
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockTransport")
            .field("ready_state", &self.ready_state)
            .field("method", &self.method)
            .field("url", &self.url)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl Transport for MockTransport {
    fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    fn open_with(
        &mut self,
        method: &str,
        url: &str,
        options: OpenOptions,
    ) -> Result<(), TransportError> {
        if self.ready_state == ReadyState::Opened {
            return Err(TransportError::invalid_state(
                "open",
                self.ready_state,
                "a request is already open",
            ));
        }
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

        self.reset_response();
        self.request_headers.clear();
        self.request_body = None;
        self.method = Some(method.to_string());
        self.url = Some(url.to_string());
        self.asynchronous = options.asynchronous;
        self.user = options.user;
        self.password = options.password;

        tracing::debug!(method, url, asynchronous = self.asynchronous, "mock transport opened");
        self.transition(ReadyState::Opened);
        self.notify();
        Ok(())
    }

    fn set_request_header(&mut self, name: &str, value: &str) -> Result<(), TransportError> {
        if self.ready_state != ReadyState::Opened {
            return Err(TransportError::invalid_state(
                "set_request_header",
                self.ready_state,
                "open must be called first",
            ));
        }
        self.request_headers.set(name, value);
        Ok(())
    }

    fn send(&mut self, data: Option<&str>) -> Result<(), TransportError> {
        if self.ready_state != ReadyState::Opened {
            return Err(TransportError::invalid_state(
                "send",
                self.ready_state,
                "open must be called first",
            ));
        }
        self.request_body = data.map(str::to_string);

        let descriptor = self
            .source
            .as_ref()
            .and_then(StubSource::active_descriptor)
            .unwrap_or_default();
        self.apply(&descriptor);
        self.transition(ReadyState::Done);

        tracing::debug!(
            method = self.method.as_deref().unwrap_or_default(),
            url = self.url.as_deref().unwrap_or_default(),
            status = self.status,
            "mock transport resolved"
        );

        if let Some(source) = &self.source {
            source.record(
                self.captured_args(),
                CapturedOutcome::Response {
                    status: self.status,
                    status_text: self.status_text.clone(),
                    content_type: descriptor.content_type.clone(),
                    body: self.response_body.clone(),
                },
            );
        }

        self.notify();
        Ok(())
    }

    fn abort(&mut self) {
        if self.ready_state == ReadyState::Opened {
            if let Some(source) = &self.source {
                source.record(self.captured_args(), CapturedOutcome::Aborted);
            }
            tracing::debug!(url = self.url.as_deref().unwrap_or_default(), "mock transport aborted");
        }
        self.reset_response();
        if self.ready_state != ReadyState::Unsent {
            self.transition(ReadyState::Unsent);
        }
    }

    fn status(&self) -> u16 {
        self.status
    }

    fn status_text(&self) -> &str {
        &self.status_text
    }

    fn response_text(&self) -> Option<&str> {
        self.response_body.as_deref()
    }

    fn get_response_header(&self, name: &str) -> Option<String> {
        if self.ready_state != ReadyState::Done {
            return None;
        }
        self.response_headers.get(name).map(str::to_string)
    }

    fn get_all_response_headers(&self) -> String {
        if self.ready_state != ReadyState::Done {
            return String::new();
        }
        self.response_headers.to_raw()
    }

    fn set_on_ready_state_change(&mut self, handler: Option<ReadyStateHandler>) {
        self.on_ready_state_change = handler;
    }

    fn as_mock(&self) -> Option<&MockTransport> {
        Some(self)
    }
}

#[cfg(test)]
#[path = "mock_tests.rs"]
mod tests;
