// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn create_queue_body_serializes_type_field_under_the_wire_name() {
    let body = CreateQueueBody {
        name: "nightly".to_string(),
        queue_type: "async".to_string(),
        window_of_operation: "any time".to_string(),
        should_drain: false,
        paths: vec![],
        tags: vec![],
        backpressure_action: None,
        backpressure_threshold: None,
    };
    let json = serde_json::to_value(&body).expect("serializes");
    assert_eq!(json["type"], "async");
    assert!(json.get("queue_type").is_none());
}

#[test]
fn update_queue_body_omits_nothing_but_renames_type() {
    let body = UpdateQueueBody { queue_type: Some("sync".to_string()), ..Default::default() };
    let json = serde_json::to_value(&body).expect("serializes");
    assert_eq!(json["type"], "sync");
    assert!(json["name"].is_null());
}
