// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request shapes accepted by [`crate::entity_services::EntityServices`].
//!
//! Kept separate from the domain types in `horae-core` because the API
//! boundary needs fields the domain types don't (an optional `id` on
//! create, specifically, purely so it can be rejected).

use horae_core::{ActionId, Operation, QueueId};

#[derive(Debug, Clone, Default)]
pub struct NewQueue {
    /// Must be `None`; `Some` is a validation error (ids are server-generated).
    pub id: Option<QueueId>,
    pub name: String,
    pub queue_type: String,
    pub window_of_operation: String,
    pub should_drain: bool,
    pub paths: Vec<String>,
    pub tags: Vec<String>,
    pub backpressure_action: Option<ActionId>,
    pub backpressure_threshold: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct QueueUpdate {
    pub name: Option<String>,
    pub queue_type: Option<String>,
    pub window_of_operation: Option<String>,
    pub should_drain: Option<bool>,
    pub paths: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub backpressure_action: Option<ActionId>,
    pub backpressure_threshold: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub name: String,
    pub priority: u32,
    pub queue_id: Option<QueueId>,
    pub when: Option<chrono::DateTime<chrono::Utc>>,
    pub execution_action_id: ActionId,
    pub promise_action_id: Option<ActionId>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub name: Option<String>,
    pub priority: Option<u32>,
    pub when: Option<chrono::DateTime<chrono::Utc>>,
    pub promise_action_id: Option<ActionId>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct NewAction {
    pub operation: Operation,
    pub uri: String,
    pub payload: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ActionUpdate {
    pub operation: Option<Operation>,
    pub uri: Option<String>,
    pub payload: Option<String>,
    pub tags: Option<Vec<String>>,
}
