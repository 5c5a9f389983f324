// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Master/slave gate: wraps every route, driven solely by the Master
//! Elector's emissions. `unavailable` → 503, `available-slave` → 301 to
//! the current master's address, `available-master` → pass through.

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::state::AppState;
use crate::node::MasterState;

pub async fn master_gate<S, M>(State(state): State<AppState<S, M>>, request: Request, next: Next) -> Response {
    match state.master.borrow().clone() {
        MasterState::Unavailable => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        MasterState::Slave { address, port } => {
            let path = request.uri().path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
            let location = format!("http://{address}:{port}{path}");
            (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response()
        }
        MasterState::Master => next.run(request).await,
    }
}

#[cfg(test)]
#[path = "middleware_tests.rs"]
mod tests;
