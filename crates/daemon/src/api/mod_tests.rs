// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use horae_coordination::MemoryCoordinationClient;
use horae_store::MemoryEntityStore;

use super::*;
use crate::node::MasterState;
use crate::update_worker::spawn_pool;

fn test_app() -> Router {
    let store = Arc::new(MemoryEntityStore::new());
    let client = Arc::new(MemoryCoordinationClient::new());
    let markers = Arc::new(spawn_pool(client, "default", 1, CancellationToken::new()));
    let (_tx, master) = watch::channel(MasterState::Master);
    app(store, markers, master)
}

#[tokio::test]
async fn creating_and_fetching_a_queue_round_trips() {
    let app = test_app();

    let create_body = r#"{"name":"nightly","type":"async","window_of_operation":"any time"}"#;
    let response = app
        .clone()
        .oneshot(Request::builder().method("POST").uri("/v1/queues").header("content-type", "application/json").body(Body::from(create_body)).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let queue: horae_core::Queue = serde_json::from_slice(&body).unwrap();
    assert_eq!(queue.name, "nightly");

    let response = app.oneshot(Request::builder().uri(format!("/v1/queues/{}", queue.id)).body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn invalid_queue_type_yields_400() {
    let app = test_app();
    let create_body = r#"{"name":"bad","type":"not-a-type","window_of_operation":"any time"}"#;
    let response = app
        .oneshot(Request::builder().method("POST").uri("/v1/queues").header("content-type", "application/json").body(Body::from(create_body)).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn listing_actions_by_tag_returns_only_matching_actions() {
    let app = test_app();

    let tagged = r#"{"operation":"get","uri":"http://example.com/a","tags":["nightly"]}"#;
    let untagged = r#"{"operation":"get","uri":"http://example.com/b","tags":[]}"#;
    for body in [tagged, untagged] {
        let response = app
            .clone()
            .oneshot(Request::builder().method("POST").uri("/v1/actions").header("content-type", "application/json").body(Body::from(body)).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.oneshot(Request::builder().uri("/v1/actions?tag=nightly").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let actions: Vec<horae_core::Action> = serde_json::from_slice(&body).unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].uri, "http://example.com/a");
}

#[tokio::test]
async fn listing_actions_without_a_tag_returns_everything() {
    let app = test_app();

    let a = r#"{"operation":"get","uri":"http://example.com/a","tags":["nightly"]}"#;
    let b = r#"{"operation":"get","uri":"http://example.com/b","tags":[]}"#;
    for body in [a, b] {
        let response = app
            .clone()
            .oneshot(Request::builder().method("POST").uri("/v1/actions").header("content-type", "application/json").body(Body::from(body)).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.oneshot(Request::builder().uri("/v1/actions").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let actions: Vec<horae_core::Action> = serde_json::from_slice(&body).unwrap();
    assert_eq!(actions.len(), 2);
}

#[tokio::test]
async fn missing_queue_yields_404() {
    let app = test_app();
    let response = app.oneshot(Request::builder().uri(format!("/v1/queues/{}", horae_core::QueueId::new())).body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
