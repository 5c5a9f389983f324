// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backpressure: fires a queue's standalone `backpressure_action` when its
//! `Pending` task count exceeds `backpressure_threshold`. Checked on every
//! task enqueue and on the Queue Manager's own 60-second running tick (see
//! DESIGN.md for the reasoning behind checking at both points).

use horae_core::{Queue, TaskId};
use horae_store::EntityStore;

use super::action::{self, ActionContext};

/// Invokes `queue.backpressure_action` if the queue's pending count exceeds
/// its threshold. There is no task in play, so the context carries a fresh
/// synthetic id purely so the usual placeholders still resolve to
/// something well-formed.
pub async fn check<S: EntityStore>(http: &reqwest::Client, store: &S, api_uri: &str, queue: &Queue) {
    let Some(threshold) = queue.backpressure_threshold else { return };
    let Some(action_id) = queue.backpressure_action else { return };

    let pending = store.count_pending(queue.id).await;
    if pending as u32 <= threshold {
        return;
    }

    let Some(action) = store.get_action(action_id).await else { return };
    let ctx = ActionContext {
        api_uri: api_uri.to_string(),
        completion_uri: String::new(),
        task_id: TaskId::new(),
        task_status: "backpressure".to_string(),
    };
    action::execute(http, store, action, &ctx).await;
}

#[cfg(test)]
#[path = "backpressure_tests.rs"]
mod tests;
