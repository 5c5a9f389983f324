// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn root_queue_is_active_and_always_running() {
    let root = Queue::root();
    assert!(root.id.is_root());
    assert_eq!(root.status, QueueStatus::Active);
    assert!(root.is_running());
}

#[test]
fn rejects_root_path_and_trailing_slash() {
    assert!(Queue::validate_paths(&["/".to_string()]).is_err());
    assert!(Queue::validate_paths(&["/jobs/".to_string()]).is_err());
    assert!(Queue::validate_paths(&["/jobs/nightly".to_string()]).is_ok());
}

#[test]
fn parses_queue_type_case_insensitively() {
    assert_eq!("sync".parse::<QueueType>().unwrap(), QueueType::Sync);
    assert_eq!("ASYNC".parse::<QueueType>().unwrap(), QueueType::Async);
    assert!("batch".parse::<QueueType>().is_err());
}
