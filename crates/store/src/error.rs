// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("id must not be supplied by the caller on create")]
    IdSuppliedOnCreate,

    #[error("the root queue cannot be updated or deleted")]
    RootQueueImmutable,

    #[error("invalid queue type: {0}")]
    InvalidQueueType(#[from] horae_core::Error),

    #[error("unparseable window of operation: {0}")]
    InvalidWindow(#[from] horae_parser::ParseError),

    #[error("invalid queue path: {0}")]
    InvalidPath(String),

    #[error("async queue tasks require a non-zero `when`")]
    MissingWhen,

    #[error("execution_action_id is mandatory")]
    MissingExecutionAction,

    #[error("queue not found: {0}")]
    QueueNotFound(horae_core::QueueId),

    #[error("task not found: {0}")]
    TaskNotFound(horae_core::TaskId),

    #[error("action not found: {0}")]
    ActionNotFound(horae_core::ActionId),

    #[error("task {0} is not running and cannot be completed")]
    TaskNotRunning(horae_core::TaskId),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
