// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::panic)]
use super::*;
use proptest::prelude::*;
use rstest::rstest;
use std::thread;

fn get(url: &str) -> CapturedArgs {
    CapturedArgs {
        method: "GET".to_string(),
        url: url.to_string(),
        asynchronous: true,
        ..CapturedArgs::default()
    }
}

fn answered(status: u16) -> CapturedOutcome {
    CapturedOutcome::Response {
        status,
        status_text: String::new(),
        content_type: "text/plain".to_string(),
        body: Some("ok".to_string()),
    }
}

/// Log holding `/users/1` (200), `/posts/1` (404), `/users/2` (aborted)
fn populated() -> CaptureLog {
    let log = CaptureLog::new();
    log.record(get("/users/1"), answered(200));
    log.record(get("/posts/1"), answered(404));
    log.record(get("/users/2"), CapturedOutcome::Aborted);
    log
}

#[test]
fn record_returns_sequence_number() {
    let log = CaptureLog::new();

    assert_eq!(log.record(get("/a"), answered(200)), 0);
    assert_eq!(log.record(get("/b"), answered(200)), 1);
    assert_eq!(log.requests()[1].request.url, "/b");
}

#[test]
fn sequence_continues_after_clear() {
    let log = populated();
    log.clear();

    assert!(log.is_empty());
    assert_eq!(log.record(get("/again"), answered(200)), 3);
    assert_eq!(log.most_recent().unwrap().seq, 3);
}

#[rstest]
#[case(0, 0)]
#[case(2, 2)]
#[case(3, 3)]
#[case(10, 3)]
fn last_keeps_order(#[case] n: usize, #[case] expected: usize) {
    let log = populated();
    let last = log.last(n);

    assert_eq!(last.len(), expected);
    assert_eq!(last.last().map(|r| r.request.url.as_str()), (n > 0).then_some("/users/2"));
    assert!(last.windows(2).all(|w| w[0].seq < w[1].seq));
}

#[test]
fn most_recent_of_empty_log() {
    assert!(CaptureLog::new().most_recent().is_none());
}

#[test]
fn queries_filter_records() {
    let log = populated();

    assert_eq!(log.find_by_url("/users").len(), 2);
    assert!(log.find_by_url("/comments").is_empty());
    assert_eq!(log.find_by_status(404)[0].request.url, "/posts/1");
    assert_eq!(log.find_responses().len(), 2);
    assert_eq!(log.find_aborted()[0].request.url, "/users/2");
    assert_eq!(log.count(|r| r.request.url.ends_with("/1")), 2);
}

#[rstest]
#[case("get", 2)]
#[case("POST", 1)]
#[case("delete", 0)]
fn find_by_method_ignores_case(#[case] method: &str, #[case] expected: usize) {
    let log = CaptureLog::new();
    log.record(get("/a"), answered(200));
    log.record(
        CapturedArgs {
            method: "post".to_string(),
            ..get("/b")
        },
        answered(201),
    );
    log.record(get("/c"), answered(200));

    assert_eq!(log.find_by_method(method).len(), expected);
}

#[test]
fn clones_share_records() {
    let log = CaptureLog::new();
    let other = log.clone();

    log.record(get("/one"), answered(200));
    other.record(get("/two"), answered(200));

    assert_eq!(log.len(), 2);
    assert_eq!(other.most_recent().unwrap().seq, 1);
}

#[test]
fn mirror_writes_jsonl_and_survives_clear() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("capture.jsonl");

    let log = CaptureLog::with_file(&path).unwrap();
    log.record(get("/one"), answered(200));
    log.clear();
    log.record(get("/two"), CapturedOutcome::Aborted);

    let lines: Vec<CapturedRequest> = std::fs::read_to_string(&path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].request.url, "/one");
    assert_eq!(lines[1].seq, 1);
    assert_eq!(lines[1].outcome, CapturedOutcome::Aborted);
    assert_eq!(log.len(), 1);
}

#[test]
fn mirror_rejects_missing_directory() {
    assert!(CaptureLog::with_file(std::path::Path::new("/nonexistent/dir/file.jsonl")).is_err());
}

#[test]
fn records_from_many_threads() {
    let log = CaptureLog::new();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let log = log.clone();
            thread::spawn(move || {
                for i in 0..50 {
                    log.record(get(&format!("/thread/{}/{}", t, i)), answered(200));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut seqs: Vec<u64> = log.requests().iter().map(|r| r.seq).collect();
    seqs.sort_unstable();
    assert_eq!(seqs, (0..200).collect::<Vec<u64>>());
}

proptest! {
    #[test]
    fn responses_and_aborts_partition_the_log(outcomes in prop::collection::vec(any::<bool>(), 0..40)) {
        let log = CaptureLog::new();
        for &responded in &outcomes {
            let outcome = if responded { answered(200) } else { CapturedOutcome::Aborted };
            log.record(get("/"), outcome);
        }

        let responded = outcomes.iter().filter(|&&r| r).count();
        prop_assert_eq!(log.find_responses().len(), responded);
        prop_assert_eq!(log.find_aborted().len(), outcomes.len() - responded);
        prop_assert_eq!(log.len(), outcomes.len());
    }
}
