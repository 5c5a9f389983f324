// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use horae_core::TaskId;

fn ctx() -> ActionContext {
    ActionContext {
        api_uri: "http://node:7117".to_string(),
        completion_uri: "http://node:7117/v1/tasks/t1/complete".to_string(),
        task_id: TaskId::new(),
        task_status: "running".to_string(),
    }
}

#[test]
fn resolves_all_four_placeholders() {
    let ctx = ctx();
    let input = "<<HORAE_API_URI>>/cb?task=<<HORAE_TASK_UUID>>&status=<<HORAE_TASK_STATUS>>&done=<<HORAE_COMPLETION_URI>>";
    let resolved = resolve(input, &ctx);
    assert!(resolved.contains("http://node:7117/cb"));
    assert!(resolved.contains(&ctx.task_id.to_string()));
    assert!(resolved.contains("status=running"));
    assert!(resolved.contains(&ctx.completion_uri));
}

#[test]
fn leaves_text_without_placeholders_untouched() {
    let ctx = ctx();
    assert_eq!(resolve("https://example.com/fixed", &ctx), "https://example.com/fixed");
}
