// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Domain-level error taxonomy shared across crates.

use thiserror::Error;

/// Errors that can arise from domain types themselves (id parsing, status
/// transitions) as opposed to persistence or coordination failures, which
/// get their own error enums in `horae-store` and `horae-coordination`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid id: {0}")]
    InvalidId(#[from] uuid::Error),

    #[error("invalid queue type: {0}")]
    InvalidQueueType(String),

    #[error("invalid action operation: {0}")]
    InvalidActionOperation(String),

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("invalid queue path: {0}")]
    InvalidPath(String),
}

pub type Result<T> = std::result::Result<T, Error>;
