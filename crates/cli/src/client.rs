// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Thin `reqwest` wrapper over a node's administration API. Every method
//! maps one CLI subcommand to one HTTP call.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use horae_core::{Action, ActionId, Queue, QueueId, Task, TaskId};

use crate::error::{CliError, Result};

pub struct HoraeClient {
    http: reqwest::Client,
    base: String,
}

impl HoraeClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), base: base.into() }
    }

    async fn send<B: Serialize, T: DeserializeOwned>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T> {
        let url = format!("{}{}", self.base, path);
        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|source| CliError::Request { url: url.clone(), source })?;
        Self::into_body(response).await
    }

    async fn send_no_body(&self, method: Method, path: &str) -> Result<()> {
        let url = format!("{}{}", self.base, path);
        let response = self.http.request(method, &url).send().await.map_err(|source| CliError::Request { url, source })?;
        if response.status().is_success() {
            Ok(())
        } else {
            Self::into_error(response).await
        }
    }

    async fn into_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        if response.status().is_success() {
            Ok(response.json::<T>().await?)
        } else {
            Self::into_error(response).await
        }
    }

    async fn into_error<T>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let message = response.text().await.unwrap_or_default();
        Err(CliError::Api { status, message })
    }

    pub async fn list_queues(&self) -> Result<Vec<Queue>> {
        self.send::<(), _>(Method::GET, "/v1/queues", None).await
    }

    pub async fn create_queue<B: Serialize>(&self, body: &B) -> Result<Queue> {
        self.send(Method::POST, "/v1/queues", Some(body)).await
    }

    pub async fn get_queue(&self, id: QueueId) -> Result<Queue> {
        self.send::<(), _>(Method::GET, &format!("/v1/queues/{id}"), None).await
    }

    pub async fn update_queue<B: Serialize>(&self, id: QueueId, body: &B) -> Result<Queue> {
        self.send(Method::PUT, &format!("/v1/queues/{id}"), Some(body)).await
    }

    pub async fn delete_queue(&self, id: QueueId) -> Result<()> {
        self.send_no_body(Method::DELETE, &format!("/v1/queues/{id}")).await
    }

    pub async fn list_tasks(&self, queue_id: QueueId) -> Result<Vec<Task>> {
        self.send::<(), _>(Method::GET, &format!("/v1/queues/{queue_id}/tasks"), None).await
    }

    pub async fn create_task<B: Serialize>(&self, body: &B) -> Result<Task> {
        self.send(Method::POST, "/v1/tasks", Some(body)).await
    }

    pub async fn complete_task(&self, id: TaskId) -> Result<()> {
        self.send_no_body(Method::POST, &format!("/v1/tasks/{id}/complete")).await
    }

    pub async fn list_actions(&self, tag: Option<&str>) -> Result<Vec<Action>> {
        match tag {
            Some(tag) => self.send::<(), _>(Method::GET, &format!("/v1/actions?tag={tag}"), None).await,
            None => self.send::<(), _>(Method::GET, "/v1/actions", None).await,
        }
    }

    pub async fn create_action<B: Serialize>(&self, body: &B) -> Result<Action> {
        self.send(Method::POST, "/v1/actions", Some(body)).await
    }

    pub async fn get_action(&self, id: ActionId) -> Result<Action> {
        self.send::<(), _>(Method::GET, &format!("/v1/actions/{id}"), None).await
    }

    pub async fn status(&self) -> Result<serde_json::Value> {
        self.send::<(), _>(Method::GET, "/v1/status", None).await
    }
}
