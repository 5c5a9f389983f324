// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use clap::Parser;
use serial_test::serial;

#[test]
fn defaults_match_the_documented_values() {
    let config = Config::parse_from(["horaed"]);
    assert_eq!(config.cluster_name, "default");
    assert_eq!(config.coordination_address, "127.0.0.1:4001");
    assert_eq!(config.store_address, "127.0.0.1");
    assert!(config.use_static_port);
}

#[test]
fn flags_override_defaults() {
    let config = Config::parse_from(["horaed", "--cluster-name", "prod"]);
    assert_eq!(config.cluster_name, "prod");
}

#[test]
fn bind_addr_combines_host_and_port() {
    let config = Config::parse_from(["horaed", "--api-port", "9000"]);
    assert_eq!(config.bind_addr(), "0.0.0.0:9000");
}

#[test]
#[serial]
fn env_vars_are_read_by_clap() {
    std::env::set_var("HORAE_CLUSTERNAME", "from-env");
    let config = Config::parse_from(["horaed"]);
    std::env::remove_var("HORAE_CLUSTERNAME");
    assert_eq!(config.cluster_name, "from-env");
}
