// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use horae_core::{QueueId, QueueStatus, QueueType};
use proptest::prelude::*;

fn queue(paths: &[&str], running: bool) -> Queue {
    Queue {
        id: QueueId::new(),
        name: "q".to_string(),
        queue_type: QueueType::Async,
        window_of_operation: "any time".to_string(),
        window: horae_parser::parse("any time").unwrap(),
        should_drain: false,
        paths: paths.iter().map(|p| p.to_string()).collect(),
        tags: Vec::new(),
        backpressure_action: None,
        backpressure_threshold: None,
        status: QueueStatus::Active,
        running,
    }
}

fn with_queues(queues: Vec<Queue>) -> ContainmentEvaluator {
    let live = new_live_queues();
    {
        let mut guard = live.lock();
        for q in queues {
            guard.insert(q.id, q);
        }
    }
    ContainmentEvaluator::new(live)
}

#[test]
fn root_is_always_open() {
    let eval = with_queues(Vec::new());
    assert!(eval.should_run("/"));
}

#[test]
fn uncontrolled_path_defers_to_ancestor() {
    let eval = with_queues(Vec::new());
    assert!(eval.should_run("/a/b"));
}

#[test]
fn running_ancestor_allows_child_to_run() {
    let eval = with_queues(vec![queue(&["/a"], true)]);
    assert!(eval.should_run("/a/b"));
}

#[test]
fn stopped_ancestor_blocks_child() {
    let eval = with_queues(vec![queue(&["/a"], false)]);
    assert!(!eval.should_run("/a/b"));
}

#[test]
fn chain_must_be_contained_all_the_way_to_root() {
    let eval = with_queues(vec![queue(&["/a"], true), queue(&["/a/b"], false)]);
    assert!(!eval.should_run("/a/b/c"));
}

#[test]
fn both_ancestors_running_allows_grandchild() {
    let eval = with_queues(vec![queue(&["/a"], true), queue(&["/a/b"], true)]);
    assert!(eval.should_run("/a/b/c"));
}

#[test]
fn multiple_queues_claiming_the_same_path_must_all_be_running() {
    let eval = with_queues(vec![queue(&["/a"], true), queue(&["/a"], false)]);
    assert!(!eval.should_run("/a/b"));
}

#[derive(Debug, Clone, Copy)]
enum AncestorState {
    Absent,
    Running,
    Stopped,
}

/// `should_run("/a/b/c")` is true iff every queue claiming `/a` or `/a/b`
/// (its proper ancestors) is either absent or running.
fn closure_reference(a: AncestorState, ab: AncestorState) -> bool {
    !matches!(a, AncestorState::Stopped) && !matches!(ab, AncestorState::Stopped)
}

proptest! {
    #[test]
    fn containment_closure_matches_reference(
        a_idx in 0..3u8,
        ab_idx in 0..3u8,
    ) {
        let states = [AncestorState::Absent, AncestorState::Running, AncestorState::Stopped];
        let a = states[a_idx as usize];
        let ab = states[ab_idx as usize];

        let mut queues = Vec::new();
        if let AncestorState::Running | AncestorState::Stopped = a {
            queues.push(queue(&["/a"], matches!(a, AncestorState::Running)));
        }
        if let AncestorState::Running | AncestorState::Stopped = ab {
            queues.push(queue(&["/a/b"], matches!(ab, AncestorState::Running)));
        }

        let eval = with_queues(queues);
        prop_assert_eq!(eval.should_run("/a/b/c"), closure_reference(a, ab));
    }
}
