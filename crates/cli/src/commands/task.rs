// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `horae task` command handlers.

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;

use horae_core::{ActionId, QueueId, Task, TaskId};

use crate::client::HoraeClient;
use crate::color;
use crate::error::Result;
use crate::output::{format_or_json, handle_list, short, OutputFormat};

#[derive(Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommand,
}

#[derive(Subcommand)]
pub enum TaskCommand {
    /// Deposit a task into a queue.
    Create {
        queue_id: QueueId,
        execution_action_id: ActionId,
        #[arg(long, default_value = "")]
        name: String,
        /// FIFO priority on a sync queue; ignored on an async queue.
        #[arg(long, default_value_t = 0)]
        priority: u32,
        /// Required on an async queue; optional on a sync queue.
        #[arg(long)]
        when: Option<DateTime<Utc>>,
        #[arg(long)]
        promise_action_id: Option<ActionId>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// List tasks deposited into a queue.
    List { queue_id: QueueId },
    /// Mark a running task complete (sync queues only).
    Complete { id: TaskId },
}

#[derive(Serialize)]
struct CreateTaskBody {
    name: String,
    priority: u32,
    queue_id: Option<QueueId>,
    when: Option<DateTime<Utc>>,
    execution_action_id: ActionId,
    promise_action_id: Option<ActionId>,
    tags: Vec<String>,
}

fn print_task(task: &Task) {
    println!("{} {}", color::header(&task.name), color::muted(&short(task.id)));
    println!("  priority: {}", task.priority);
    println!("  status:   {:?}", task.status);
    if let Some(when) = task.when {
        println!("  when:     {when}");
    }
}

pub async fn handle(command: TaskCommand, client: &HoraeClient, format: OutputFormat) -> Result<()> {
    match command {
        TaskCommand::Create { queue_id, execution_action_id, name, priority, when, promise_action_id, tags } => {
            let body = CreateTaskBody { name, priority, queue_id: Some(queue_id), when, execution_action_id, promise_action_id, tags };
            let task = client.create_task(&body).await?;
            format_or_json(format, &task, || println!("Created task {} in queue {}", task.id, queue_id))?;
        }
        TaskCommand::List { queue_id } => {
            let tasks = client.list_tasks(queue_id).await?;
            handle_list(format, &tasks, "No tasks found", |tasks| {
                for task in tasks {
                    print_task(task);
                }
            })?;
        }
        TaskCommand::Complete { id } => {
            client.complete_task(id).await?;
            println!("Completed task {id}");
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
