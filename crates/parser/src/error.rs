// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid parse at: \"{0}\"")]
    UnexpectedToken(String),

    #[error("not a valid recurrence for: \"{0}\"")]
    InvalidRecurrence(String),

    #[error("invalid date: \"{0}\"")]
    InvalidDate(String),

    #[error("empty window string")]
    Empty,
}
