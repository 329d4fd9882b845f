// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot request replay against a mock, used by the binary.

use crate::cli::Cli;
use crate::config::{ConfigError, StubConfig};
use crate::env;
use crate::lifecycle::SpecLifecycle;
use crate::registry::TransportRegistry;
use crate::transport::{OpenOptions, Transport, TransportConstructor, TransportError};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Errors that can occur while replaying a request
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Transport(#[from] TransportError),

    #[error("Invalid header '{0}': expected 'Name: value'")]
    Header(String),

    #[error("Failed to open capture file: {0}")]
    Capture(#[from] std::io::Error),

    #[error("Failed to render report: {0}")]
    Render(#[from] serde_json::Error),
}

/// A request to replay
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub data: Option<String>,
    pub options: OpenOptions,
}

impl ReplayRequest {
    pub fn from_cli(cli: &Cli) -> Result<Self, ReplayError> {
        let headers = cli
            .headers
            .iter()
            .map(|raw| parse_header(raw))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            method: cli.method.clone(),
            url: cli.url.clone(),
            headers,
            data: cli.data.clone(),
            options: OpenOptions {
                asynchronous: !cli.sync,
                user: cli.user.clone(),
                password: cli.password.clone(),
            },
        })
    }
}

/// Response header as reported
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportHeader {
    pub name: String,
    pub value: String,
}

/// What the mock handed back
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayReport {
    /// States observed: the initial state, then every handler notification
    pub ready_states: Vec<u8>,
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<ReportHeader>,
    pub body: Option<String>,
}

/// Split a `Name: value` header argument
pub fn parse_header(raw: &str) -> Result<(String, String), ReplayError> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| ReplayError::Header(raw.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(ReplayError::Header(raw.to_string()));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Install a mock on `registry`, apply `stub`, and run `request` through it.
///
/// The registry is restored before returning.
pub fn replay(
    registry: &TransportRegistry,
    stub: Option<&StubConfig>,
    request: &ReplayRequest,
) -> Result<ReplayReport, ReplayError> {
    SpecLifecycle::new(registry.clone()).run(|registry| -> Result<ReplayReport, ReplayError> {
        let builder = registry.install();
        if let Some(stub) = stub {
            tracing::debug!(name = %stub.name, "applying stub");
            builder.and_return_descriptor(stub.descriptor());
        }

        let mut xhr = registry.create();
        let states = Rc::new(RefCell::new(vec![xhr.ready_state().as_u8()]));
        let sink = Rc::clone(&states);
        xhr.set_on_ready_state_change(Some(Box::new(move |t: &dyn Transport| {
            sink.borrow_mut().push(t.ready_state().as_u8());
        })));

        xhr.open_with(&request.method, &request.url, request.options.clone())?;
        for (name, value) in &request.headers {
            xhr.set_request_header(name, value)?;
        }
        xhr.send(request.data.as_deref())?;
        xhr.set_on_ready_state_change(None);

        let headers = xhr
            .as_mock()
            .map(|mock| {
                mock.response_headers()
                    .iter()
                    .map(|(name, value)| ReportHeader {
                        name: name.to_string(),
                        value: value.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let ready_states = states.borrow().clone();
        Ok(ReplayReport {
            ready_states,
            status: xhr.status(),
            status_text: xhr.status_text().to_string(),
            headers,
            body: xhr.response_text().map(str::to_string),
        })
    })
}

/// Resolve stub and capture paths from arguments or environment, then replay
pub fn run(cli: &Cli) -> Result<ReplayReport, ReplayError> {
    let request = ReplayRequest::from_cli(cli)?;

    let stub = cli
        .stub
        .clone()
        .or_else(env::stub_path)
        .map(|path| StubConfig::load(&path))
        .transpose()?;

    let registry = match cli.capture.clone().or_else(env::capture_path) {
        Some(path) => TransportRegistry::with_capture_file(TransportConstructor::offline(), &path)?,
        None => TransportRegistry::default(),
    };

    replay(&registry, stub.as_ref(), &request)
}

/// Render a report as pretty JSON
pub fn render(report: &ReplayReport) -> Result<String, ReplayError> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
#[path = "replay_tests.rs"]
mod tests;
