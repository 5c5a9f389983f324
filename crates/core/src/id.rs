// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entity identifiers.
//!
//! Every id is a time-ordered UUID so that coordination-store create-index
//! tie-breaks and id generation never collide across nodes.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use uuid::Uuid;

/// The root queue's well-known id. Not user-creatable, not user-updatable.
pub const ROOT_QUEUE_ID_STR: &str = "11111111-1111-1111-1111-111111111111";

macro_rules! uuid_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh, randomly distributed id.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl Borrow<Uuid> for $name {
            fn borrow(&self) -> &Uuid {
                &self.0
            }
        }
    };
}

uuid_id!(NodeId, "Unique identifier for a cluster node.");
uuid_id!(QueueId, "Unique identifier for a queue.");
uuid_id!(TaskId, "Unique identifier for a task.");
uuid_id!(ActionId, "Unique identifier for an action.");

impl QueueId {
    /// The single well-known root queue id, holding the conceptual path `/`.
    pub fn root() -> Self {
        // Parsing a constant literal; unwrap_used is denied workspace-wide so
        // this goes through an explicit match instead of `.unwrap()`.
        match Uuid::parse_str(ROOT_QUEUE_ID_STR) {
            Ok(id) => Self(id),
            Err(_) => Self(Uuid::nil()),
        }
    }

    pub fn is_root(&self) -> bool {
        *self == Self::root()
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
