// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire request bodies accepted by the administration API. Kept distinct
//! from `horae_store::dto`'s service-layer shapes since the wire format is
//! allowed to evolve independently of the internal call boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use horae_core::{ActionId, Operation, QueueId};

#[derive(Debug, Deserialize)]
pub struct CreateQueueBody {
    pub name: String,
    #[serde(rename = "type")]
    pub queue_type: String,
    pub window_of_operation: String,
    #[serde(default)]
    pub should_drain: bool,
    #[serde(default)]
    pub paths: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub backpressure_action: Option<ActionId>,
    #[serde(default)]
    pub backpressure_threshold: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateQueueBody {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub queue_type: Option<String>,
    pub window_of_operation: Option<String>,
    pub should_drain: Option<bool>,
    pub paths: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub backpressure_action: Option<ActionId>,
    pub backpressure_threshold: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub priority: u32,
    #[serde(default)]
    pub queue_id: Option<QueueId>,
    #[serde(default)]
    pub when: Option<DateTime<Utc>>,
    pub execution_action_id: ActionId,
    #[serde(default)]
    pub promise_action_id: Option<ActionId>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateTaskBody {
    pub name: Option<String>,
    pub priority: Option<u32>,
    pub when: Option<DateTime<Utc>>,
    pub promise_action_id: Option<ActionId>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ListQueuesQuery {
    pub tag: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ListTasksQuery {
    pub tag: Option<String>,
    pub queue: Option<QueueId>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ListActionsQuery {
    pub tag: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateActionBody {
    pub operation: Operation,
    pub uri: String,
    #[serde(default)]
    pub payload: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateActionBody {
    pub operation: Option<Operation>,
    pub uri: Option<String>,
    pub payload: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum StatusBody {
    Unavailable,
    AvailableMaster,
    AvailableSlave { master_address: String, master_port: u16 },
}
