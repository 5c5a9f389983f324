// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoordinationError {
    #[error("coordination store unreachable: {0}")]
    Unreachable(String),

    #[error("coordination store request failed: {0}")]
    Request(String),
}

pub type Result<T> = std::result::Result<T, CoordinationError>;
