// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `horae action` command handlers.

use clap::{Args, Subcommand};
use serde::Serialize;

use horae_core::{Action, ActionId, Operation};

use crate::client::HoraeClient;
use crate::color;
use crate::error::Result;
use crate::output::{format_or_json, handle_list, short, OutputFormat};

#[derive(Args)]
pub struct ActionArgs {
    #[command(subcommand)]
    pub command: ActionCommand,
}

#[derive(Subcommand)]
pub enum ActionCommand {
    /// Create a new HTTP-callback action.
    Create {
        operation: Operation,
        uri: String,
        #[arg(long)]
        payload: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// List all actions, or only those carrying a given tag.
    List {
        #[arg(long)]
        tag: Option<String>,
    },
    /// Show a single action.
    Get { id: ActionId },
}

#[derive(Serialize)]
struct CreateActionBody {
    operation: Operation,
    uri: String,
    payload: Option<String>,
    tags: Vec<String>,
}

fn print_action(action: &Action) {
    println!("{} {}", color::header(&action.uri), color::muted(&short(action.id)));
    println!("  operation: {:?}", action.operation);
    println!("  status:    {:?}", action.status);
}

pub async fn handle(command: ActionCommand, client: &HoraeClient, format: OutputFormat) -> Result<()> {
    match command {
        ActionCommand::Create { operation, uri, payload, tags } => {
            let body = CreateActionBody { operation, uri, payload, tags };
            let action = client.create_action(&body).await?;
            format_or_json(format, &action, || println!("Created action {} ({})", action.id, action.uri))?;
        }
        ActionCommand::List { tag } => {
            let actions = client.list_actions(tag.as_deref()).await?;
            handle_list(format, &actions, "No actions found", |actions| {
                for action in actions {
                    print_action(action);
                }
            })?;
        }
        ActionCommand::Get { id } => {
            let action = client.get_action(id).await?;
            format_or_json(format, &action, || print_action(&action))?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
