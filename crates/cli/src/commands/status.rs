// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `horae status` command handler.

use crate::client::HoraeClient;
use crate::error::Result;
use crate::output::{format_or_json, OutputFormat};

pub async fn handle(client: &HoraeClient, format: OutputFormat) -> Result<()> {
    let status = client.status().await?;
    format_or_json(format, &status, || {
        let state = status.get("state").and_then(|v| v.as_str()).unwrap_or("unknown");
        match state {
            "available-master" => println!("master"),
            "available-slave" => {
                let address = status.get("master_address").and_then(|v| v.as_str()).unwrap_or("?");
                let port = status.get("master_port").and_then(|v| v.as_u64()).unwrap_or(0);
                println!("slave (master at {address}:{port})");
            }
            _ => println!("unavailable"),
        }
    })
}
