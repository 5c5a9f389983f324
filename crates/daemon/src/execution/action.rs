// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Action invocation: placeholder resolution in `uri`/`payload`, HTTP
//! dispatch by `Operation`, and status recording on the persisted
//! `Action`.

use horae_core::{Action, ActionStatus, Operation, TaskId};
use horae_store::EntityStore;

/// Values substituted for the `<<HORAE_...>>` placeholders before dispatch.
pub struct ActionContext {
    pub api_uri: String,
    pub completion_uri: String,
    pub task_id: TaskId,
    pub task_status: String,
}

fn resolve(input: &str, ctx: &ActionContext) -> String {
    input
        .replace("<<HORAE_API_URI>>", &ctx.api_uri)
        .replace("<<HORAE_COMPLETION_URI>>", &ctx.completion_uri)
        .replace("<<HORAE_TASK_UUID>>", &ctx.task_id.to_string())
        .replace("<<HORAE_TASK_STATUS>>", &ctx.task_status)
}

/// Dispatches the action's HTTP call and returns the resulting status plus
/// a failure string on a non-2xx response or transport error.
pub async fn invoke(http: &reqwest::Client, action: &Action, ctx: &ActionContext) -> (ActionStatus, Option<String>) {
    let uri = resolve(&action.uri, ctx);
    let payload = action.payload.as_deref().map(|p| resolve(p, ctx));

    let result = match action.operation {
        Operation::Get => http.get(&uri).send().await,
        Operation::Head => http.head(&uri).send().await,
        Operation::Delete => http.delete(&uri).send().await,
        Operation::Post => {
            let mut request = http.post(&uri).header("Content-Type", "application/json");
            if let Some(body) = payload {
                request = request.body(body);
            }
            request.send().await
        }
    };

    match result {
        Ok(response) if response.status().is_success() => (ActionStatus::Complete, None),
        Ok(response) => (ActionStatus::Failure, Some(format!("http status {}", response.status()))),
        Err(err) => (ActionStatus::Failure, Some(err.to_string())),
    }
}

/// Invokes the action, persists the resulting status/failure, and returns
/// the updated `Action`.
pub async fn execute<S: EntityStore>(http: &reqwest::Client, store: &S, mut action: Action, ctx: &ActionContext) -> Action {
    let (status, failure) = invoke(http, &action, ctx).await;
    action.status = status;
    action.failure = failure;
    store.put_action(action.clone()).await;
    action
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
