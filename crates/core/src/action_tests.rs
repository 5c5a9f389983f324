// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parses_supported_operations_case_insensitively() {
    assert_eq!("get".parse::<Operation>().unwrap(), Operation::Get);
    assert_eq!("Post".parse::<Operation>().unwrap(), Operation::Post);
    assert_eq!("HEAD".parse::<Operation>().unwrap(), Operation::Head);
    assert_eq!("delete".parse::<Operation>().unwrap(), Operation::Delete);
}

#[test]
fn rejects_put_and_anything_else() {
    assert!(matches!("put".parse::<Operation>(), Err(Error::InvalidActionOperation(_))));
    assert!(matches!("patch".parse::<Operation>(), Err(Error::InvalidActionOperation(_))));
}

#[test]
fn new_action_starts_pending_with_no_failure() {
    let action = Action::new(Operation::Get, "https://example.invalid/hook");
    assert_eq!(action.status, ActionStatus::Pending);
    assert!(action.failure.is_none());
}
