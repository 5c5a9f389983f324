// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Action` entity: an HTTP callback referenced by tasks.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::id::ActionId;

/// HTTP method an action dispatches with.
///
/// `PUT` is deliberately not supported: the source system's PUT handling
/// never set a request body, making it indistinguishable from a broken
/// POST, so this implementation does not carry the bug forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    Get,
    Post,
    Head,
    Delete,
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "HEAD" => Ok(Self::Head),
            "DELETE" => Ok(Self::Delete),
            other => Err(Error::InvalidActionOperation(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Pending,
    Complete,
    Failure,
}

/// An HTTP callback. Referenced by tasks but has no lifecycle coupling to
/// them — the same action can be reused across many tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: ActionId,
    pub operation: Operation,
    pub uri: String,
    pub payload: Option<String>,
    pub status: ActionStatus,
    pub failure: Option<String>,
    pub tags: Vec<String>,
}

impl Action {
    pub fn new(operation: Operation, uri: impl Into<String>) -> Self {
        Self {
            id: ActionId::new(),
            operation,
            uri: uri.into(),
            payload: None,
            status: ActionStatus::Pending,
            failure: None,
            tags: Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
