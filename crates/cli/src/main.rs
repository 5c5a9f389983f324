// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `horae`: a CLI client for a Horae node's administration API.

mod client;
mod color;
mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use client::HoraeClient;
use output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "horae",
    about = "Client for the Horae distributed task-scheduling cluster",
    version = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH")),
    styles = color::styles(),
)]
struct Cli {
    /// Administration API base URL of a node in the cluster.
    #[arg(long, env = "HORAE_SERVER", default_value = "http://127.0.0.1:7117", global = true)]
    server: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage queues.
    Queue(commands::queue::QueueArgs),
    /// Manage tasks.
    Task(commands::task::TaskArgs),
    /// Manage actions.
    Action(commands::action::ActionArgs),
    /// Show whether the targeted node is cluster master, slave, or unavailable.
    Status,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let client = HoraeClient::new(cli.server);

    let result = match cli.command {
        Command::Queue(args) => commands::queue::handle(args.command, &client, cli.output).await,
        Command::Task(args) => commands::task::handle(args.command, &client, cli.output).await,
        Command::Action(args) => commands::action::handle(args.command, &client, cli.output).await,
        Command::Status => commands::status::handle(&client, cli.output).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
