// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `horae queue` command handlers.

use clap::{Args, Subcommand};
use serde::Serialize;

use horae_core::{ActionId, Queue, QueueId};

use crate::client::HoraeClient;
use crate::color;
use crate::error::Result;
use crate::output::{format_or_json, handle_list, short, OutputFormat};

#[derive(Args)]
pub struct QueueArgs {
    #[command(subcommand)]
    pub command: QueueCommand,
}

#[derive(Subcommand)]
pub enum QueueCommand {
    /// Create a new queue.
    Create {
        name: String,
        /// "sync" (FIFO, wait-for-completion) or "async" (timer fan-out).
        #[arg(long = "type")]
        queue_type: String,
        /// Window-of-operation expression, e.g. "1800-0600 weekdays".
        window_of_operation: String,
        /// Drain in-flight work before the delete completes.
        #[arg(long)]
        should_drain: bool,
        /// Parent path this queue is contained by (repeatable).
        #[arg(long = "path")]
        paths: Vec<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        backpressure_action: Option<ActionId>,
        #[arg(long)]
        backpressure_threshold: Option<u32>,
    },
    /// List every active queue.
    List {},
    /// Show a single queue.
    Get { id: QueueId },
    /// Update a queue's mutable fields.
    Update {
        id: QueueId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type")]
        queue_type: Option<String>,
        #[arg(long)]
        window_of_operation: Option<String>,
        #[arg(long)]
        should_drain: Option<bool>,
        #[arg(long = "path")]
        paths: Option<Vec<String>>,
        #[arg(long = "tag")]
        tags: Option<Vec<String>>,
        #[arg(long)]
        backpressure_action: Option<ActionId>,
        #[arg(long)]
        backpressure_threshold: Option<u32>,
    },
    /// Delete a queue.
    Delete { id: QueueId },
}

#[derive(Serialize)]
struct CreateQueueBody {
    name: String,
    #[serde(rename = "type")]
    queue_type: String,
    window_of_operation: String,
    should_drain: bool,
    paths: Vec<String>,
    tags: Vec<String>,
    backpressure_action: Option<ActionId>,
    backpressure_threshold: Option<u32>,
}

#[derive(Serialize, Default)]
struct UpdateQueueBody {
    name: Option<String>,
    #[serde(rename = "type")]
    queue_type: Option<String>,
    window_of_operation: Option<String>,
    should_drain: Option<bool>,
    paths: Option<Vec<String>>,
    tags: Option<Vec<String>>,
    backpressure_action: Option<ActionId>,
    backpressure_threshold: Option<u32>,
}

fn print_queue(queue: &Queue) {
    println!("{} {}", color::header(&queue.name), color::muted(&short(queue.id)));
    println!("  type:               {:?}", queue.queue_type);
    println!("  window_of_operation: {}", queue.window_of_operation);
    println!("  status:             {:?}", queue.status);
    if !queue.paths.is_empty() {
        println!("  paths:              {}", queue.paths.join(", "));
    }
    if !queue.tags.is_empty() {
        println!("  tags:               {}", queue.tags.join(", "));
    }
}

pub async fn handle(command: QueueCommand, client: &HoraeClient, format: OutputFormat) -> Result<()> {
    match command {
        QueueCommand::Create { name, queue_type, window_of_operation, should_drain, paths, tags, backpressure_action, backpressure_threshold } => {
            let body = CreateQueueBody { name, queue_type, window_of_operation, should_drain, paths, tags, backpressure_action, backpressure_threshold };
            let queue = client.create_queue(&body).await?;
            format_or_json(format, &queue, || println!("Created queue '{}' ({})", queue.name, queue.id))?;
        }
        QueueCommand::List {} => {
            let queues = client.list_queues().await?;
            handle_list(format, &queues, "No queues found", |queues| {
                for queue in queues {
                    print_queue(queue);
                }
            })?;
        }
        QueueCommand::Get { id } => {
            let queue = client.get_queue(id).await?;
            format_or_json(format, &queue, || print_queue(&queue))?;
        }
        QueueCommand::Update { id, name, queue_type, window_of_operation, should_drain, paths, tags, backpressure_action, backpressure_threshold } => {
            let body = UpdateQueueBody { name, queue_type, window_of_operation, should_drain, paths, tags, backpressure_action, backpressure_threshold };
            let queue = client.update_queue(id, &body).await?;
            format_or_json(format, &queue, || println!("Updated queue '{}'", queue.name))?;
        }
        QueueCommand::Delete { id } => {
            client.delete_queue(id).await?;
            println!("Deleted queue {id}");
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
