// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::transport::{OfflineTransport, ReadyState};

#[test]
fn test_new_registry_is_bound_to_original() {
    let original = TransportConstructor::offline();
    let registry = TransportRegistry::new(original.clone());

    assert!(registry.binding().same_as(&original));
    assert!(registry.original().is_none());
    assert!(!registry.is_installed());
    assert!(!registry.is_mocked());
}

#[test]
fn test_install_rebinds_to_mock() {
    let original = TransportConstructor::offline();
    let registry = TransportRegistry::new(original.clone());
    registry.install();

    assert!(registry.is_installed());
    assert!(registry.is_mocked());
    assert!(registry.binding().same_as(registry.mock_constructor()));
    assert!(registry.original().unwrap().same_as(&original));

    let xhr = registry.create();
    assert!(xhr.as_mock().is_some());
    assert_eq!(xhr.ready_state(), ReadyState::Unsent);
}

#[test]
fn test_install_is_idempotent() {
    let original = TransportConstructor::offline();
    let registry = TransportRegistry::new(original.clone());
    registry.install();
    registry.install();

    assert!(registry.original().unwrap().same_as(&original));
    registry.restore();
    assert!(registry.binding().same_as(&original));
}

#[test]
fn test_restore_rebinds_original() {
    let original = TransportConstructor::offline();
    let registry = TransportRegistry::new(original.clone());
    registry.install().and_return_body("bar");
    registry.restore();

    assert!(!registry.is_installed());
    assert!(registry.binding().same_as(&original));
    assert!(!registry.binding().same_as(registry.mock_constructor()));
    assert!(registry.active_descriptor().is_none());

    let xhr = registry.create();
    assert!(xhr.as_mock().is_none());
}

#[test]
fn test_restore_without_install_is_noop() {
    let original = TransportConstructor::offline();
    let registry = TransportRegistry::new(original.clone());
    registry.restore();
    registry.restore();

    assert!(registry.binding().same_as(&original));
    assert!(!registry.is_installed());
}

#[test]
fn test_original_never_recaptured() {
    let original = TransportConstructor::offline();
    let registry = TransportRegistry::new(original.clone());
    registry.install();
    registry.restore();
    registry.install();

    assert!(registry.original().unwrap().same_as(&original));
}

#[test]
fn test_restore_clears_capture() {
    let registry = TransportRegistry::default();
    registry.install();
    let mut xhr = registry.create();
    xhr.open("GET", "/").unwrap();
    xhr.send(None).unwrap();
    assert_eq!(registry.requests().len(), 1);

    registry.restore();
    assert!(registry.requests().is_empty());
}

#[test]
fn test_stub_ignored_when_not_installed() {
    let registry = TransportRegistry::default();
    let stub = registry.install();
    registry.restore();

    stub.and_return_body("late");
    assert!(registry.active_descriptor().is_none());
}

#[test]
fn test_clones_share_state() {
    let registry = TransportRegistry::default();
    let other = registry.clone();
    registry.install();

    assert!(other.is_installed());
    other.restore();
    assert!(!registry.is_installed());
}

#[test]
fn test_mock_outlives_registry() {
    let registry = TransportRegistry::default();
    registry.install().and_return_body("bar");
    let mut xhr = registry.create();
    drop(registry);

    xhr.open("GET", "/").unwrap();
    xhr.send(None).unwrap();
    assert_eq!(xhr.response_text(), Some("bar"));
}

#[test]
fn test_default_registry_is_offline() {
    let registry = TransportRegistry::default();
    assert_eq!(registry.binding().name(), OfflineTransport::NAME);
    assert_eq!(registry.mock_constructor().name(), MockTransport::NAME);
}

#[test]
fn test_capture_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("capture.jsonl");

    let registry = TransportRegistry::with_capture_file(TransportConstructor::offline(), &path).unwrap();
    registry.install();
    let mut xhr = registry.create();
    xhr.open("GET", "/logged").unwrap();
    xhr.send(None).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains("/logged"));
}

#[test]
fn test_ambient_install_and_restore() {
    let stub = install();
    stub.and_return_body("ambient");
    assert!(ambient().is_mocked());

    let mut xhr = create();
    xhr.open("GET", "/").unwrap();
    xhr.send(None).unwrap();
    assert_eq!(xhr.response_text(), Some("ambient"));

    restore();
    assert!(!ambient().is_installed());
    assert!(create().as_mock().is_none());
}

#[test]
fn test_ambient_is_per_thread() {
    install();
    let other_thread_installed = std::thread::spawn(|| ambient().is_installed())
        .join()
        .unwrap();
    assert!(!other_thread_installed);
    restore();
}

#[test]
fn test_registry_clone_mocks_spawned_thread() {
    let registry = TransportRegistry::default();
    registry.install().and_return_body("shared");

    let shared = registry.clone();
    let body = std::thread::spawn(move || {
        let mut xhr = shared.create();
        xhr.open("GET", "/").unwrap();
        xhr.send(None).unwrap();
        xhr.response_text().map(str::to_string)
    })
    .join()
    .unwrap();

    assert_eq!(body.as_deref(), Some("shared"));
    assert!(!ambient().is_installed());
}
