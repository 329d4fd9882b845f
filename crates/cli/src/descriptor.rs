// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Stubbed response descriptors.

/// Content type used when a stub does not name one.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";
/// Status used when a stub does not name one.
pub const DEFAULT_STATUS: u16 = 200;

/// The response mock transports hand back once sent.
///
/// Descriptors are immutable once stored in a registry; configuring a new
/// stub replaces the whole descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseDescriptor {
    pub body: Option<String>,
    pub content_type: String,
    pub status: u16,
    /// Extra response headers, applied after `content-type`.
    ///
    /// A `content-length` entry here is ignored; the body length always wins.
    pub headers: Vec<(String, String)>,
}

impl ResponseDescriptor {
    pub fn new(body: Option<&str>, content_type: &str, status: u16) -> Self {
        Self {
            body: body.map(str::to_string),
            content_type: content_type.to_string(),
            status,
            headers: Vec::new(),
        }
    }

    /// Descriptor with a body and default content type and status
    pub fn with_body(body: &str) -> Self {
        Self::new(Some(body), DEFAULT_CONTENT_TYPE, DEFAULT_STATUS)
    }

    /// Add an extra response header
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Byte length of the body, zero when absent
    pub fn content_length(&self) -> usize {
        self.body.as_ref().map_or(0, String::len)
    }
}

impl Default for ResponseDescriptor {
    fn default() -> Self {
        Self::new(None, DEFAULT_CONTENT_TYPE, DEFAULT_STATUS)
    }
}

#[cfg(test)]
#[path = "descriptor_tests.rs"]
mod tests;
