// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Spec runner integration.
//!
//! The runner calls [`SpecLifecycle::before_each`] and
//! [`SpecLifecycle::after_each`] around every spec body. Rust test code can
//! instead hold a [`SpecGuard`], which restores on drop, including when the
//! spec panics.

use crate::registry::{self, TransportRegistry};

/// Before/after hooks that keep mocks from leaking between specs
#[derive(Clone, Debug)]
pub struct SpecLifecycle {
    registry: TransportRegistry,
}

impl SpecLifecycle {
    pub fn new(registry: TransportRegistry) -> Self {
        Self { registry }
    }

    /// Hooks for the current thread's ambient registry
    pub fn ambient() -> Self {
        Self::new(registry::ambient())
    }

    pub fn registry(&self) -> &TransportRegistry {
        &self.registry
    }

    /// Ensure the spec starts against the original binding
    pub fn before_each(&self) {
        if self.registry.is_installed() {
            tracing::warn!("mock transport still installed from a previous spec; restoring");
            self.registry.restore();
        }
    }

    /// Restore unconditionally, whether or not the spec did
    pub fn after_each(&self) {
        self.registry.restore();
    }

    /// Run `before_each` now and `after_each` when the guard drops
    pub fn guard(&self) -> SpecGuard {
        self.before_each();
        SpecGuard {
            lifecycle: self.clone(),
        }
    }

    /// Run a spec body between the hooks
    pub fn run<R>(&self, spec: impl FnOnce(&TransportRegistry) -> R) -> R {
        let _guard = self.guard();
        spec(&self.registry)
    }
}

impl Default for SpecLifecycle {
    fn default() -> Self {
        Self::ambient()
    }
}

/// Restores the registry when dropped
#[must_use = "the registry is restored when the guard is dropped"]
#[derive(Debug)]
pub struct SpecGuard {
    lifecycle: SpecLifecycle,
}

impl SpecGuard {
    pub fn registry(&self) -> &TransportRegistry {
        self.lifecycle.registry()
    }
}

impl Drop for SpecGuard {
    fn drop(&mut self) {
        self.lifecycle.after_each();
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
