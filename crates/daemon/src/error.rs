// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon-wide error type, aggregating the lower crates' errors and adding
//! the process-level failures that can only occur here (bind failure, core
//! failure signal).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error(transparent)]
    Core(#[from] horae_core::Error),

    #[error(transparent)]
    Coordination(#[from] horae_coordination::CoordinationError),

    #[error(transparent)]
    Validation(#[from] horae_store::ValidationError),

    #[error("failed to bind administration API to {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },

    #[error("core failure: {0}")]
    CoreFailure(String),
}

pub type Result<T> = std::result::Result<T, DaemonError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
