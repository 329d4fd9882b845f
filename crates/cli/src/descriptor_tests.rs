// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn test_default_descriptor() {
    let descriptor = ResponseDescriptor::default();
    assert_eq!(descriptor.body, None);
    assert_eq!(descriptor.content_type, "text/plain");
    assert_eq!(descriptor.status, 200);
    assert!(descriptor.headers.is_empty());
}

#[test]
fn test_with_body_uses_defaults() {
    let descriptor = ResponseDescriptor::with_body("bar");
    assert_eq!(descriptor.body.as_deref(), Some("bar"));
    assert_eq!(descriptor.content_type, DEFAULT_CONTENT_TYPE);
    assert_eq!(descriptor.status, DEFAULT_STATUS);
}

#[test]
fn test_header_builder_appends() {
    let descriptor = ResponseDescriptor::with_body("x")
        .header("X-One", "1")
        .header("X-Two", "2");
    assert_eq!(
        descriptor.headers,
        vec![
            ("X-One".to_string(), "1".to_string()),
            ("X-Two".to_string(), "2".to_string()),
        ]
    );
}

#[parameterized(
    none = { None, 0 },
    empty = { Some(""), 0 },
    ascii = { Some("bar"), 3 },
    multibyte = { Some("héllo"), 6 },
    emoji = { Some("🦀"), 4 },
)]
fn content_length_counts_bytes(body: Option<&str>, expected: usize) {
    let descriptor = ResponseDescriptor::new(body, "text/plain", 200);
    assert_eq!(descriptor.content_length(), expected);
}
