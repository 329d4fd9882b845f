// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Stub file configuration (TOML or JSON).
//!
//! ```toml
//! name = "users endpoint"
//!
//! [response]
//! body_file = "fixtures/users.xml"
//! content_type = "text/xml"
//! status = 200
//!
//! [response.headers]
//! X-Request-Id = "abc"
//! ```

use crate::descriptor::{ResponseDescriptor, DEFAULT_CONTENT_TYPE, DEFAULT_STATUS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a stub file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read stub file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to resolve body_file '{path}': {source}")]
    FileReference {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level stub file
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StubConfig {
    /// Name for logging/debugging
    #[serde(default)]
    pub name: String,

    /// Response mocks answer with (default descriptor when absent)
    #[serde(default)]
    pub response: Option<ResponseSpec>,
}

/// Stubbed response
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseSpec {
    /// Inline body
    #[serde(default)]
    pub body: Option<String>,

    /// Body read from a file, relative to the stub file's directory
    #[serde(default)]
    pub body_file: Option<String>,

    /// Content type (default: "text/plain")
    #[serde(default)]
    pub content_type: Option<String>,

    /// Status code (default: 200)
    #[serde(default)]
    pub status: Option<u16>,

    /// Extra response headers
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl StubConfig {
    /// Load a stub from a TOML or JSON file (chosen by extension)
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let config = if is_json {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };
        let base_dir = path.parent().unwrap_or(Path::new("."));
        Self::finish(config, base_dir)
    }

    /// Parse a TOML stub; `body_file` resolves against the working directory
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Self::finish(toml::from_str(content)?, Path::new("."))
    }

    /// Parse a JSON stub; `body_file` resolves against the working directory
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Self::finish(serde_json::from_str(content)?, Path::new("."))
    }

    fn finish(mut config: Self, base_dir: &Path) -> Result<Self, ConfigError> {
        config.validate()?;
        config.resolve_body_file(base_dir)?;
        Ok(config)
    }

    /// Check field combinations and ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(response) = &self.response else {
            return Ok(());
        };
        if response.body.is_some() && response.body_file.is_some() {
            return Err(ConfigError::Validation(
                "response.body and response.body_file are mutually exclusive".to_string(),
            ));
        }
        if response
            .headers
            .keys()
            .any(|name| name.trim().eq_ignore_ascii_case("content-length"))
        {
            return Err(ConfigError::Validation(
                "response.headers must not set Content-Length; it is computed from the body"
                    .to_string(),
            ));
        }
        if let Some(status) = response.status {
            if !(100..=999).contains(&status) {
                return Err(ConfigError::Validation(format!(
                    "Invalid status {}: must be between 100 and 999",
                    status
                )));
            }
        }
        Ok(())
    }

    fn resolve_body_file(&mut self, base_dir: &Path) -> Result<(), ConfigError> {
        let Some(response) = self.response.as_mut() else {
            return Ok(());
        };
        let Some(file) = response.body_file.take() else {
            return Ok(());
        };
        let path = base_dir.join(&file);
        let body = std::fs::read_to_string(&path)
            .map_err(|source| ConfigError::FileReference { path: file, source })?;
        response.body = Some(body);
        Ok(())
    }

    /// The descriptor this stub configures
    pub fn descriptor(&self) -> ResponseDescriptor {
        let Some(response) = &self.response else {
            return ResponseDescriptor::default();
        };
        let mut descriptor = ResponseDescriptor::new(
            response.body.as_deref(),
            response
                .content_type
                .as_deref()
                .unwrap_or(DEFAULT_CONTENT_TYPE),
            response.status.unwrap_or(DEFAULT_STATUS),
        );
        descriptor.headers = response
            .headers
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        descriptor
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
