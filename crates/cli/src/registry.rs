// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport registry: the binding that `new XMLHttpRequest()` resolves to.
//!
//! A registry starts bound to an original constructor. [`TransportRegistry::install`]
//! captures that constructor (once) and rebinds to the mock;
//! [`TransportRegistry::restore`] puts the original back. Every change to the
//! binding goes through these two operations.
//!
//! Code that cannot take a registry as a parameter uses the ambient registry
//! ([`ambient`], [`install`], [`restore`], [`create`]). It is thread-local, so
//! each test thread gets its own isolated binding.

use crate::capture::{CaptureLog, CapturedArgs, CapturedOutcome};
use crate::descriptor::ResponseDescriptor;
use crate::mock::MockTransport;
use crate::stub::StubBuilder;
use crate::transport::{Transport, TransportConstructor};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::{Arc, Weak};

struct RegistryState {
    original: Option<TransportConstructor>,
    binding: TransportConstructor,
    active: Option<ResponseDescriptor>,
    installed: bool,
}

/// What a mock instance needs from the registry that built it
#[derive(Clone)]
pub(crate) struct StubSource {
    state: Arc<Mutex<RegistryState>>,
    capture: CaptureLog,
}

impl StubSource {
    pub(crate) fn active_descriptor(&self) -> Option<ResponseDescriptor> {
        self.state.lock().active.clone()
    }

    pub(crate) fn record(&self, request: CapturedArgs, outcome: CapturedOutcome) {
        self.capture.record(request, outcome);
    }
}

/// Holder of the original and currently bound transport constructors.
///
/// Clones share state.
#[derive(Clone)]
pub struct TransportRegistry {
    state: Arc<Mutex<RegistryState>>,
    mock: TransportConstructor,
    capture: CaptureLog,
}

impl TransportRegistry {
    /// Create a registry bound to `binding`
    pub fn new(binding: TransportConstructor) -> Self {
        Self::with_capture(binding, CaptureLog::new())
    }

    /// Create a registry whose capture log is mirrored to a JSONL file
    pub fn with_capture_file(binding: TransportConstructor, path: &Path) -> std::io::Result<Self> {
        Ok(Self::with_capture(binding, CaptureLog::with_file(path)?))
    }

    fn with_capture(binding: TransportConstructor, capture: CaptureLog) -> Self {
        let state = Arc::new(Mutex::new(RegistryState {
            original: None,
            binding,
            active: None,
            installed: false,
        }));
        let mock = mock_constructor(Arc::downgrade(&state), capture.clone());
        Self {
            state,
            mock,
            capture,
        }
    }

    /// Bind the mock constructor and return a builder for its responses.
    ///
    /// The current binding is captured as the original on first install only;
    /// installing again just hands out a fresh builder.
    pub fn install(&self) -> StubBuilder {
        let mut state = self.state.lock();
        if state.original.is_none() {
            state.original = Some(state.binding.clone());
        }
        if !state.installed {
            state.binding = self.mock.clone();
            state.installed = true;
            tracing::debug!("mock transport installed");
        }
        drop(state);
        StubBuilder::new(self.clone())
    }

    /// Rebind the original constructor and forget the active stub.
    ///
    /// Safe to call any number of times; does nothing unless installed.
    pub fn restore(&self) {
        let mut state = self.state.lock();
        if !state.installed {
            return;
        }
        if let Some(original) = state.original.clone() {
            state.binding = original;
        }
        state.active = None;
        state.installed = false;
        drop(state);
        self.capture.clear();
        tracing::debug!("mock transport restored");
    }

    /// Construct a transport through the current binding
    pub fn create(&self) -> Box<dyn Transport> {
        let binding = self.binding();
        binding.construct()
    }

    /// The constructor currently bound
    pub fn binding(&self) -> TransportConstructor {
        self.state.lock().binding.clone()
    }

    /// The constructor captured by the first install, if any
    pub fn original(&self) -> Option<TransportConstructor> {
        self.state.lock().original.clone()
    }

    /// The mock constructor this registry binds on install
    pub fn mock_constructor(&self) -> &TransportConstructor {
        &self.mock
    }

    pub fn is_installed(&self) -> bool {
        self.state.lock().installed
    }

    /// Whether the current binding is this registry's mock constructor
    pub fn is_mocked(&self) -> bool {
        self.state.lock().binding.same_as(&self.mock)
    }

    /// The stub new sends will answer with; `None` means the default descriptor
    pub fn active_descriptor(&self) -> Option<ResponseDescriptor> {
        self.state.lock().active.clone()
    }

    /// Exchanges completed by this registry's mocks since the last restore
    pub fn requests(&self) -> &CaptureLog {
        &self.capture
    }

    pub(crate) fn set_active(&self, descriptor: ResponseDescriptor) {
        let mut state = self.state.lock();
        if !state.installed {
            tracing::warn!("stub configured while no mock is installed; ignoring");
            return;
        }
        state.active = Some(descriptor);
    }
}

impl Default for TransportRegistry {
    fn default() -> Self {
        Self::new(TransportConstructor::offline())
    }
}

impl std::fmt::Debug for TransportRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("TransportRegistry")
            .field("binding", &state.binding)
            .field("original", &state.original)
            .field("installed", &state.installed)
            .field("active", &state.active)
            .finish()
    }
}

fn mock_constructor(state: Weak<Mutex<RegistryState>>, capture: CaptureLog) -> TransportConstructor {
    TransportConstructor::new(MockTransport::NAME, move || {
        let source = state.upgrade().map(|state| StubSource {
            state,
            capture: capture.clone(),
        });
        Box::new(MockTransport::with_source(source))
    })
}

thread_local! {
    static AMBIENT: TransportRegistry = TransportRegistry::default();
}

/// The ambient registry for the current thread.
///
/// Each thread has its own ambient registry. Installing on one thread does
/// not mock transports created on threads it spawns; share a
/// [`TransportRegistry`] clone with those threads instead.
pub fn ambient() -> TransportRegistry {
    AMBIENT.with(TransportRegistry::clone)
}

/// Install the mock on the ambient registry
pub fn install() -> StubBuilder {
    ambient().install()
}

/// Restore the ambient registry's original binding
pub fn restore() {
    ambient().restore();
}

/// Construct a transport through the ambient binding
pub fn create() -> Box<dyn Transport> {
    ambient().create()
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
