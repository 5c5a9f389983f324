// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_task_starts_pending_with_no_schedule() {
    let task = Task::new(QueueId::root(), 5, ActionId::new());
    assert_eq!(task.status, TaskStatus::Pending);
    assert!(task.when.is_none());
    assert!(task.promise_action_id.is_none());
}
