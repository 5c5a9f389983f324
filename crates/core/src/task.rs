// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Task` entity: a unit of work deposited into a queue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ActionId, QueueId, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Running,
    Complete,
    Failure,
    PartiallyFailed,
    Deleted,
}

/// A unit of work deposited into a queue.
///
/// `when` is required (non-zero) for tasks on an `async` queue and optional
/// on a `sync` queue, where ordering is by `priority` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub priority: u32,
    pub queue_id: QueueId,
    pub when: Option<DateTime<Utc>>,
    pub execution_action_id: ActionId,
    pub promise_action_id: Option<ActionId>,
    pub status: TaskStatus,
    pub tags: Vec<String>,
}

impl Task {
    pub fn new(queue_id: QueueId, priority: u32, execution_action_id: ActionId) -> Self {
        Self {
            id: TaskId::new(),
            name: String::new(),
            priority,
            queue_id,
            when: None,
            execution_action_id,
            promise_action_id: None,
            status: TaskStatus::Pending,
            tags: Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
