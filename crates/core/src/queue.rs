// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Queue` entity: a named container that executes Actions during a
//! parsed window of operation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::id::{ActionId, QueueId};
use horae_parser::Window;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueType {
    /// FIFO priority queue; waits for task completion before starting the
    /// next one. Never consults `window.when` — priority order only.
    Sync,
    /// Timer fan-out queue; tasks run at their own `when`.
    Async,
}

impl FromStr for QueueType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sync" => Ok(Self::Sync),
            "async" => Ok(Self::Async),
            other => Err(Error::InvalidQueueType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStatus {
    Active,
    /// `should_drain` was set on delete: in-flight work finishes, then the
    /// Queue Manager observes this and the caller hard-deletes later.
    Deleting,
    Deleted,
}

/// A named container of Tasks that executes Actions during its window of
/// operation. Forms a hierarchical path tree via `paths`: a queue's window
/// is further constrained by whichever ancestor queue owns its parent path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Queue {
    pub id: QueueId,
    pub name: String,
    #[serde(rename = "type")]
    pub queue_type: QueueType,
    pub window_of_operation: String,
    #[serde(skip)]
    pub window: Window,
    pub should_drain: bool,
    /// Absolute path strings, no trailing slash; `/` itself is reserved for
    /// the root queue and never appears here.
    pub paths: Vec<String>,
    pub tags: Vec<String>,
    pub backpressure_action: Option<ActionId>,
    pub backpressure_threshold: Option<u32>,
    pub status: QueueStatus,
    /// Volatile: set by the Queue Manager while its window is open and it
    /// holds queue ownership. Not persisted.
    #[serde(skip)]
    pub running: bool,
}

impl Queue {
    /// Validates `paths` per the root-reservation invariant: no entry is
    /// `/` and none ends with a trailing slash.
    pub fn validate_paths(paths: &[String]) -> Result<(), Error> {
        for path in paths {
            if path == "/" || path.ends_with('/') {
                return Err(Error::InvalidPath(path.clone()));
            }
        }
        Ok(())
    }

    /// The single well-known root queue: always active, always open
    /// (`any time`), holding the conceptual path `/`.
    pub fn root() -> Self {
        let window = horae_parser::parse("any time").unwrap_or_default();
        Self {
            id: QueueId::root(),
            name: "root".to_string(),
            queue_type: QueueType::Async,
            window_of_operation: "any time".to_string(),
            window,
            should_drain: false,
            paths: Vec::new(),
            tags: Vec::new(),
            backpressure_action: None,
            backpressure_threshold: None,
            status: QueueStatus::Active,
            running: true,
        }
    }

    pub fn matches_path(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn is_running(&self) -> bool {
        self.running && self.status == QueueStatus::Active
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
