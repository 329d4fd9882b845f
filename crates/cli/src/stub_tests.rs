// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use std::io::Write;

fn installed() -> (TransportRegistry, StubBuilder) {
    let registry = TransportRegistry::default();
    let stub = registry.install();
    (registry, stub)
}

#[test]
fn test_no_stub_means_default() {
    let (registry, _stub) = installed();
    assert!(registry.active_descriptor().is_none());
}

#[test]
fn test_and_return() {
    let (registry, stub) = installed();
    stub.and_return(Some("bar"), "text/xml", 404);

    assert_eq!(
        registry.active_descriptor(),
        Some(ResponseDescriptor::new(Some("bar"), "text/xml", 404))
    );
}

#[test]
fn test_and_return_body_defaults() {
    let (registry, stub) = installed();
    stub.and_return_body("bar");

    let descriptor = registry.active_descriptor().unwrap();
    assert_eq!(descriptor.content_type, "text/plain");
    assert_eq!(descriptor.status, 200);
}

#[test]
fn test_later_call_replaces_descriptor() {
    let (registry, stub) = installed();
    stub.and_return_descriptor(ResponseDescriptor::with_body("first").header("X-A", "1"));
    stub.and_return(None, "text/plain", 204);

    let descriptor = registry.active_descriptor().unwrap();
    assert_eq!(descriptor.body, None);
    assert_eq!(descriptor.status, 204);
    assert!(descriptor.headers.is_empty());
}

#[test]
fn test_builders_share_registry() {
    let (registry, first) = installed();
    let second = registry.install();

    first.and_return_body("one");
    second.and_return_body("two");

    assert_eq!(registry.active_descriptor().unwrap().body.as_deref(), Some("two"));
    assert!(first.registry().is_installed());
}

#[test]
fn test_and_return_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(
        file,
        r#"
        name = "users"
        [response]
        body = "<users/>"
        content_type = "text/xml"
        status = 201
        "#
    )
    .unwrap();

    let (registry, stub) = installed();
    stub.and_return_file(file.path()).unwrap();

    let descriptor = registry.active_descriptor().unwrap();
    assert_eq!(descriptor.body.as_deref(), Some("<users/>"));
    assert_eq!(descriptor.content_type, "text/xml");
    assert_eq!(descriptor.status, 201);
}

#[test]
fn test_and_return_file_missing() {
    let (registry, stub) = installed();
    let err = stub.and_return_file("/nonexistent/stub.toml").unwrap_err();

    assert!(matches!(err, ConfigError::Io(_)));
    assert!(registry.active_descriptor().is_none());
}
