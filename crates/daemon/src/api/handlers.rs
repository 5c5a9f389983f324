// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use horae_core::{ActionId, QueueId, TaskId};
use horae_store::dto::{ActionUpdate, NewAction, NewQueue, NewTask, QueueUpdate, TaskUpdate};
use horae_store::{EntityServices, EntityStore, MarkerPublisher};

use super::dto::{
    CreateActionBody, CreateQueueBody, CreateTaskBody, ListActionsQuery, ListQueuesQuery, ListTasksQuery, StatusBody, UpdateActionBody, UpdateQueueBody,
    UpdateTaskBody,
};
use super::error::{not_found, ApiError};
use super::state::AppState;
use crate::node::MasterState;

type Services<S, M> = EntityServices<S, M>;

// --- Queues ---------------------------------------------------------------

pub async fn list_queues<S: EntityStore, M: MarkerPublisher>(
    State(state): State<AppState<S, M>>,
    Query(query): Query<ListQueuesQuery>,
) -> Json<Vec<horae_core::Queue>> {
    let queues = match query.tag {
        Some(tag) => state.services.store().get_queues_by_tag(&tag).await,
        None => state.services.store().list_active_queues().await,
    };
    Json(queues)
}

pub async fn create_queue<S: EntityStore, M: MarkerPublisher>(
    State(state): State<AppState<S, M>>,
    Json(body): Json<CreateQueueBody>,
) -> Result<(StatusCode, Json<horae_core::Queue>), ApiError> {
    let queue = create(&state.services, body).await?;
    Ok((StatusCode::CREATED, Json(queue)))
}

async fn create<S: EntityStore, M: MarkerPublisher>(services: &Services<S, M>, body: CreateQueueBody) -> Result<horae_core::Queue, ApiError> {
    let draft = NewQueue {
        id: None,
        name: body.name,
        queue_type: body.queue_type,
        window_of_operation: body.window_of_operation,
        should_drain: body.should_drain,
        paths: body.paths,
        tags: body.tags,
        backpressure_action: body.backpressure_action,
        backpressure_threshold: body.backpressure_threshold,
    };
    Ok(services.create_queue(draft).await?)
}

pub async fn get_queue<S: EntityStore, M: MarkerPublisher>(State(state): State<AppState<S, M>>, Path(id): Path<QueueId>) -> Result<Json<horae_core::Queue>, ApiError> {
    state.services.store().get_queue(id).await.map(Json).ok_or_else(|| not_found("queue"))
}

pub async fn update_queue<S: EntityStore, M: MarkerPublisher>(
    State(state): State<AppState<S, M>>,
    Path(id): Path<QueueId>,
    Json(body): Json<UpdateQueueBody>,
) -> Result<Json<horae_core::Queue>, ApiError> {
    let update = QueueUpdate {
        name: body.name,
        queue_type: body.queue_type,
        window_of_operation: body.window_of_operation,
        should_drain: body.should_drain,
        paths: body.paths,
        tags: body.tags,
        backpressure_action: body.backpressure_action,
        backpressure_threshold: body.backpressure_threshold,
    };
    Ok(Json(state.services.update_queue(id, update).await?))
}

pub async fn delete_queue<S: EntityStore, M: MarkerPublisher>(State(state): State<AppState<S, M>>, Path(id): Path<QueueId>) -> Result<StatusCode, ApiError> {
    state.services.delete_queue(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Tasks ------------------------------------------------------------------

pub async fn list_tasks_for_queue<S: EntityStore, M: MarkerPublisher>(
    State(state): State<AppState<S, M>>,
    Path(queue_id): Path<QueueId>,
) -> Json<Vec<horae_core::Task>> {
    Json(state.services.store().list_tasks_for_queue(queue_id).await)
}

pub async fn list_tasks<S: EntityStore, M: MarkerPublisher>(
    State(state): State<AppState<S, M>>,
    Query(query): Query<ListTasksQuery>,
) -> Json<Vec<horae_core::Task>> {
    let tasks = match (query.tag, query.queue) {
        (Some(tag), _) => state.services.store().get_tasks_by_tag(&tag).await,
        (None, Some(queue_id)) => state.services.store().list_tasks_for_queue(queue_id).await,
        (None, None) => state.services.store().list_tasks().await,
    };
    Json(tasks)
}

pub async fn create_task<S: EntityStore, M: MarkerPublisher>(
    State(state): State<AppState<S, M>>,
    Json(body): Json<CreateTaskBody>,
) -> Result<(StatusCode, Json<horae_core::Task>), ApiError> {
    let draft = NewTask {
        name: body.name,
        priority: body.priority,
        queue_id: body.queue_id,
        when: body.when,
        execution_action_id: body.execution_action_id,
        promise_action_id: body.promise_action_id,
        tags: body.tags,
    };
    let task = state.services.create_task(draft).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn get_task<S: EntityStore, M: MarkerPublisher>(State(state): State<AppState<S, M>>, Path(id): Path<TaskId>) -> Result<Json<horae_core::Task>, ApiError> {
    state.services.store().get_task(id).await.map(Json).ok_or_else(|| not_found("task"))
}

pub async fn update_task<S: EntityStore, M: MarkerPublisher>(
    State(state): State<AppState<S, M>>,
    Path(id): Path<TaskId>,
    Json(body): Json<UpdateTaskBody>,
) -> Result<Json<horae_core::Task>, ApiError> {
    let update = TaskUpdate { name: body.name, priority: body.priority, when: body.when, promise_action_id: body.promise_action_id, tags: body.tags };
    Ok(Json(state.services.update_task(id, update).await?))
}

pub async fn delete_task<S: EntityStore, M: MarkerPublisher>(State(state): State<AppState<S, M>>, Path(id): Path<TaskId>) -> Result<StatusCode, ApiError> {
    state.services.delete_task(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn complete_task<S: EntityStore, M: MarkerPublisher>(State(state): State<AppState<S, M>>, Path(id): Path<TaskId>) -> Result<StatusCode, ApiError> {
    state.services.complete_task(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Actions ------------------------------------------------------------------

pub async fn list_actions<S: EntityStore, M: MarkerPublisher>(
    State(state): State<AppState<S, M>>,
    Query(query): Query<ListActionsQuery>,
) -> Json<Vec<horae_core::Action>> {
    let actions = match query.tag {
        Some(tag) => state.services.store().get_actions_by_tag(&tag).await,
        None => state.services.store().list_actions().await,
    };
    Json(actions)
}

pub async fn create_action<S: EntityStore, M: MarkerPublisher>(
    State(state): State<AppState<S, M>>,
    Json(body): Json<CreateActionBody>,
) -> (StatusCode, Json<horae_core::Action>) {
    let draft = NewAction { operation: body.operation, uri: body.uri, payload: body.payload, tags: body.tags };
    let action = state.services.create_action(draft).await;
    (StatusCode::CREATED, Json(action))
}

pub async fn get_action<S: EntityStore, M: MarkerPublisher>(State(state): State<AppState<S, M>>, Path(id): Path<ActionId>) -> Result<Json<horae_core::Action>, ApiError> {
    state.services.store().get_action(id).await.map(Json).ok_or_else(|| not_found("action"))
}

pub async fn update_action<S: EntityStore, M: MarkerPublisher>(
    State(state): State<AppState<S, M>>,
    Path(id): Path<ActionId>,
    Json(body): Json<UpdateActionBody>,
) -> Result<Json<horae_core::Action>, ApiError> {
    let update = ActionUpdate { operation: body.operation, uri: body.uri, payload: body.payload, tags: body.tags };
    Ok(Json(state.services.update_action(id, update).await?))
}

// --- Status -------------------------------------------------------------------

pub async fn status<S, M>(State(state): State<AppState<S, M>>) -> Json<StatusBody> {
    let body = match state.master.borrow().clone() {
        MasterState::Unavailable => StatusBody::Unavailable,
        MasterState::Master => StatusBody::AvailableMaster,
        MasterState::Slave { address, port } => StatusBody::AvailableSlave { master_address: address, master_port: port },
    };
    Json(body)
}
