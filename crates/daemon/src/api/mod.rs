// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Administration API: an `axum::Router` over the Entity Services layer,
//! wrapped by the master/slave gate and `tower_http`'s request/response
//! tracing.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use horae_store::{EntityServices, EntityStore, MarkerPublisher};

pub use state::AppState;

pub fn router<S, M>(state: AppState<S, M>) -> Router
where
    S: EntityStore,
    M: MarkerPublisher,
{
    Router::new()
        .route("/v1/queues", get(handlers::list_queues::<S, M>).post(handlers::create_queue::<S, M>))
        .route(
            "/v1/queues/{id}",
            get(handlers::get_queue::<S, M>).put(handlers::update_queue::<S, M>).delete(handlers::delete_queue::<S, M>),
        )
        .route("/v1/queues/{id}/tasks", get(handlers::list_tasks_for_queue::<S, M>))
        .route("/v1/tasks", get(handlers::list_tasks::<S, M>).post(handlers::create_task::<S, M>))
        .route("/v1/tasks/{id}", get(handlers::get_task::<S, M>).put(handlers::update_task::<S, M>).delete(handlers::delete_task::<S, M>))
        .route("/v1/tasks/{id}/complete", post(handlers::complete_task::<S, M>))
        .route("/v1/actions", get(handlers::list_actions::<S, M>).post(handlers::create_action::<S, M>))
        .route("/v1/actions/{id}", get(handlers::get_action::<S, M>).put(handlers::update_action::<S, M>))
        .route("/v1/status", get(handlers::status::<S, M>))
        .layer(axum::middleware::from_fn_with_state(state.clone(), middleware::master_gate::<S, M>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Convenience constructor wiring a fresh [`EntityServices`] in front of the
/// given store/marker-publisher pair.
pub fn app<S, M>(store: Arc<S>, markers: Arc<M>, master: tokio::sync::watch::Receiver<crate::node::MasterState>) -> Router
where
    S: EntityStore,
    M: MarkerPublisher,
{
    let services = Arc::new(EntityServices::new(store, markers));
    router(AppState { services, master })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
