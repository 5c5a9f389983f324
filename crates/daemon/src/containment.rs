// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Containment Evaluator: `should_run(path)` walks `path` up to the root,
//! asking at each level whether every queue whose configured path matches
//! is currently running.
//!
//! Per-path results combine with AND for the "is running" check (a
//! multi-path queue is only contained if every matching ancestor-path's
//! owner is running) and OR for the "found a textual match at all" check
//! (any configured path string matching counts as a match at this level,
//! progressing the scan upward). See DESIGN.md for the reasoning behind
//! this aggregation rule.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use horae_core::{Queue, QueueId};

/// The node's locally known queues: single writer (the Queue Supervisor),
/// many readers (every Queue Manager's containment check).
pub type LiveQueues = Arc<Mutex<HashMap<QueueId, Queue>>>;

pub fn new_live_queues() -> LiveQueues {
    Arc::new(Mutex::new(HashMap::new()))
}

pub(crate) fn dirname(path: &str) -> String {
    match path.rfind('/') {
        Some(0) => "/".to_string(),
        Some(idx) => path[..idx].to_string(),
        None => "/".to_string(),
    }
}

pub struct ContainmentEvaluator {
    live: LiveQueues,
}

impl ContainmentEvaluator {
    pub fn new(live: LiveQueues) -> Self {
        Self { live }
    }

    /// `true` iff `path` is open for execution right now: every queue
    /// along its ancestor chain that claims the path is running, and the
    /// chain bottoms out at the always-open root.
    pub fn should_run(&self, path: &str) -> bool {
        if path == "/" {
            return true;
        }
        let matching: Vec<bool> = {
            let live = self.live.lock();
            live.values().filter(|q| q.matches_path(path)).map(|q| q.is_running()).collect()
        };
        if matching.is_empty() {
            return self.should_run(&dirname(path));
        }
        if matching.iter().all(|&running| running) {
            self.should_run(&dirname(path))
        } else {
            false
        }
    }
}

#[cfg(test)]
#[path = "containment_tests.rs"]
mod tests;
