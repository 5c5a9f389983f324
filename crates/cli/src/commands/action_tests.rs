// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn create_action_body_serializes_operation_as_uppercase() {
    let body = CreateActionBody { operation: Operation::Get, uri: "http://example.com/hook".to_string(), payload: None, tags: vec![] };
    let json = serde_json::to_value(&body).expect("serializes");
    assert_eq!(json["operation"], "GET");
    assert_eq!(json["uri"], "http://example.com/hook");
}
