//! Integration tests for the merge-request batch runner

mod common;

use csv::StringRecord;

use glbulk::batch::merge_request;
use glbulk::gitlab::{MergeRequest, MergeRequestBody};

use common::FakeGitlab;

fn record(fields: &[&str]) -> StringRecord {
    StringRecord::from(fields.to_vec())
}

fn run_to_string(api: &FakeGitlab, rows: &[StringRecord]) -> String {
    let mut out = Vec::new();
    merge_request::run(api, rows, &mut out).expect("batch run failed");
    String::from_utf8(out).expect("outcome lines are UTF-8")
}

#[test]
fn test_web_url_is_preferred_over_input_path() {
    let api = FakeGitlab::default();
    api.push_mr_reply(
        "201 Created",
        MergeRequestBody::Created(MergeRequest {
            iid: 5,
            web_url: "https://x/mr/5".to_string(),
        }),
    );

    let rows = vec![record(&["101", "grp/app", "feature/login", "main", "Add login"])];
    let output = run_to_string(&api, &rows);

    assert_eq!(output, "101, https://x/mr/5, 201 Created\n");
}

#[test]
fn test_error_message_is_preferred_over_status_line() {
    let api = FakeGitlab::default();
    api.push_mr_reply(
        "409 Conflict",
        MergeRequestBody::Error("already exists".to_string()),
    );

    let rows = vec![record(&["101", "grp/app", "feature/login", "main", "Add login"])];
    let output = run_to_string(&api, &rows);

    assert_eq!(output, "101, grp/app, already exists\n");
}

#[test]
fn test_unrecognized_body_falls_back_to_inputs() {
    let api = FakeGitlab::default();
    api.push_mr_reply("502 Bad Gateway", MergeRequestBody::Unrecognized);

    let rows = vec![record(&["101", "grp/app", "feature/login", "main", "Add login"])];
    let output = run_to_string(&api, &rows);

    assert_eq!(output, "101, grp/app, 502 Bad Gateway\n");
}

#[test]
fn test_row_isolation_across_mixed_replies() {
    let api = FakeGitlab::default();
    api.push_mr_reply(
        "201 Created",
        MergeRequestBody::Created(MergeRequest {
            iid: 1,
            web_url: "https://x/mr/1".to_string(),
        }),
    );
    api.push_mr_reply(
        "409 Conflict",
        MergeRequestBody::Error("already exists".to_string()),
    );
    api.push_mr_reply(
        "201 Created",
        MergeRequestBody::Created(MergeRequest {
            iid: 2,
            web_url: "https://x/mr/2".to_string(),
        }),
    );

    let rows = vec![
        record(&["101", "grp/one", "f1", "main", "t1"]),
        record(&["202", "grp/two", "f2", "main", "t2"]),
        record(&["303", "grp/three", "f3", "main", "t3"]),
    ];

    let output = run_to_string(&api, &rows);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "101, https://x/mr/1, 201 Created");
    assert_eq!(lines[1], "202, grp/two, already exists");
    assert_eq!(lines[2], "303, https://x/mr/2, 201 Created");
    assert_eq!(*api.mr_calls.borrow(), 3);
}

#[test]
fn test_short_row_is_fatal_before_any_call() {
    let api = FakeGitlab::default();
    let rows = vec![record(&["101", "grp/app", "feature/login"])];

    let mut out = Vec::new();
    let err = merge_request::run(&api, &rows, &mut out).unwrap_err();

    assert!(err.to_string().contains("Row 1"));
    assert_eq!(*api.mr_calls.borrow(), 0);
    assert!(out.is_empty());
}

#[test]
fn test_rows_are_processed_in_file_order() {
    let api = FakeGitlab::default();

    let rows = vec![
        record(&["7", "a", "s", "t", "one"]),
        record(&["8", "b", "s", "t", "two"]),
    ];

    let output = run_to_string(&api, &rows);
    let lines: Vec<&str> = output.lines().collect();

    assert!(lines[0].starts_with("7, "));
    assert!(lines[1].starts_with("8, "));
}
