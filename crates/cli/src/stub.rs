// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Builder returned by `install` for declaring what mocks answer with.

use crate::config::{ConfigError, StubConfig};
use crate::descriptor::{ResponseDescriptor, DEFAULT_CONTENT_TYPE, DEFAULT_STATUS};
use crate::registry::TransportRegistry;
use std::path::Path;

/// Configures the response of mocks created by a registry.
///
/// Each call replaces the previous stub. Mocks read the stub when they are
/// sent, so reconfiguring mid-spec affects instances not yet sent.
#[derive(Clone, Debug)]
pub struct StubBuilder {
    registry: TransportRegistry,
}

impl StubBuilder {
    pub(crate) fn new(registry: TransportRegistry) -> Self {
        Self { registry }
    }

    /// Answer with `body`, `content_type` and `status`
    pub fn and_return(&self, body: Option<&str>, content_type: &str, status: u16) {
        self.and_return_descriptor(ResponseDescriptor::new(body, content_type, status));
    }

    /// Answer with `body` as `text/plain` and status 200
    pub fn and_return_body(&self, body: &str) {
        self.and_return(Some(body), DEFAULT_CONTENT_TYPE, DEFAULT_STATUS);
    }

    pub fn and_return_descriptor(&self, descriptor: ResponseDescriptor) {
        tracing::debug!(
            status = descriptor.status,
            content_type = %descriptor.content_type,
            "mock response stubbed"
        );
        self.registry.set_active(descriptor);
    }

    /// Answer with the response described by a TOML or JSON stub file
    pub fn and_return_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let config = StubConfig::load(path.as_ref())?;
        self.and_return_descriptor(config.descriptor());
        Ok(())
    }

    /// The registry this builder configures
    pub fn registry(&self) -> &TransportRegistry {
        &self.registry
    }
}

#[cfg(test)]
#[path = "stub_tests.rs"]
mod tests;
