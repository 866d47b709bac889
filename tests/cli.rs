//! Command line exit behavior.

use std::process::{Command, Output};

mod common;

use common::write_site;

fn run(args: &[&str]) -> Output {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_site(dir.path());
    Command::new(env!("CARGO_BIN_EXE_content-router"))
        .arg("--config")
        .arg(&config_path)
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

#[test]
fn test_route_prints_nice_url() {
    let output = run(&["route", "1001"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("about"));
}

#[test]
fn test_route_for_hidden_node_fails_through_main() {
    let output = run(&["route", "1005"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("node 1005 is not published"), "stderr: {stderr}");
}
