// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for the `horae` CLI binary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("request to {url} failed: {source}")]
    Request { url: String, #[source] source: reqwest::Error },

    #[error("{status}: {message}")]
    Api { status: reqwest::StatusCode, message: String },

    #[error("failed to decode response body: {0}")]
    Decode(#[from] reqwest::Error),

    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
