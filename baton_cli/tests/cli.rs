//! End-to-end tests of the `baton` binary

use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

/// A `baton` invocation isolated from the user's config and environment
fn baton(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("baton").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("BATON_HARMONY__API_HOST")
        .env_remove("BATON_OUTPUT__DEFAULT_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

fn container_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "machine_id": "3",
        "name": name,
        "hostname": format!("{name}.local"),
        "image": "nginx:latest",
        "entry_point": "",
        "enabled": false,
        "cid": "0123456789abcdef0123456789abcdef"
    })
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    baton(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("baton"));
}

#[test]
fn test_containers_without_verb_prints_help() {
    let home = TempDir::new().unwrap();
    baton(&home)
        .arg("containers")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_add_missing_machine_id_is_usage_error() {
    let home = TempDir::new().unwrap();
    // Port 9 is discard; nothing should try to reach it
    baton(&home)
        .args([
            "--harmony-api",
            "http://127.0.0.1:9",
            "containers",
            "add",
            "--name",
            "web-1",
        ])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("machine-id is required"));
}

#[test]
fn test_start_without_target_is_usage_error() {
    let home = TempDir::new().unwrap();
    baton(&home)
        .args(["--harmony-api", "http://127.0.0.1:9", "containers", "start"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ContainerID or Name is required"));
}

#[test]
fn test_start_by_name_prints_ok() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let lookup = server
        .mock("GET", "/v1/containers")
        .match_query(Matcher::UrlEncoded("name".into(), "web-1".into()))
        .with_status(200)
        .with_body(json!({ "data": [container_json("42", "web-1")] }).to_string())
        .expect(1)
        .create();
    let update = server
        .mock("PUT", "/v1/containers/42/enabled")
        .match_body(Matcher::Json(json!({ "enabled": true })))
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create();

    baton(&home)
        .args(["--harmony-api", &server.url(), "containers", "start", "web-1"])
        .assert()
        .success()
        .stdout("OK\n");

    lookup.assert();
    update.assert();
}

#[test]
fn test_show_unknown_id_exits_not_found() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    server
        .mock("GET", "/v1/containers/77")
        .with_status(404)
        .create();

    baton(&home)
        .args(["--maestro", &server.url(), "containers", "show", "77"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("[404] Container not found [77]"));
}

#[test]
fn test_list_renders_truncated_cid() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    server
        .mock("GET", "/v1/containers")
        .with_status(200)
        .with_body(json!({ "data": [container_json("42", "web-1")] }).to_string())
        .create();

    baton(&home)
        .args(["--harmony-api", &server.url(), "containers", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0123456789ab"))
        .stdout(predicate::str::contains("0123456789abc").not())
        .stdout(predicate::str::contains("MACHINE ID"));
}

#[test]
fn test_lookup_server_error_exits_upstream() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let lookup = server
        .mock("GET", "/v1/containers")
        .match_query(Matcher::UrlEncoded("name".into(), "web-1".into()))
        .with_status(500)
        .with_body("database unavailable")
        .expect(1)
        .create();
    let update = server
        .mock("PUT", Matcher::Regex(r"^/v1/containers/.*/enabled$".to_string()))
        .expect(0)
        .create();

    baton(&home)
        .args(["--harmony-api", &server.url(), "containers", "start", "web-1"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("database unavailable"));

    lookup.assert();
    update.assert();
}

#[test]
fn test_show_empty_token_exits_not_found() {
    let home = TempDir::new().unwrap();
    baton(&home)
        .args(["--harmony-api", "http://127.0.0.1:9", "containers", "show", ""])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("[404] Container not found []"));
}

#[test]
fn test_malformed_config_does_not_block_local_commands() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join("baton");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[harmony\napi_host = ").unwrap();

    baton(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    baton(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("baton"));

    baton(&home)
        .args(["--harmony-api", "http://127.0.0.1:9", "containers", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_add_server_error_exits_upstream() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    server
        .mock("POST", "/v1/containers")
        .with_status(500)
        .with_body("image not found")
        .create();

    baton(&home)
        .args([
            "--harmony-api",
            &server.url(),
            "containers",
            "add",
            "--machine-id",
            "3",
            "--name",
            "web-1",
            "--hostname",
            "web-1.local",
            "--image",
            "nginx:latest",
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "Error encountered while attempting to create new container",
        ))
        .stderr(predicate::str::contains("image not found"));
}

#[test]
fn test_machines_show_json_output() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    server
        .mock("GET", "/v1/machines")
        .match_query(Matcher::UrlEncoded("name".into(), "node-a".into()))
        .with_status(200)
        .with_body(
            json!({ "data": [{
                "id": "3",
                "name": "node-a",
                "hostname": "node-a.local",
                "container_ids": ["42"]
            }] })
            .to_string(),
        )
        .create();

    let output = baton(&home)
        .args([
            "--harmony-api",
            &server.url(),
            "-o",
            "json",
            "machines",
            "show",
            "node-a",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["name"], "node-a");
    assert_eq!(value["container_ids"][0], "42");
}

#[test]
fn test_config_set_then_get() {
    let home = TempDir::new().unwrap();

    baton(&home)
        .args(["config", "set", "harmony.api_host", "https://maestro:4774"])
        .assert()
        .success();

    baton(&home)
        .args(["config", "get", "harmony.api_host"])
        .assert()
        .success()
        .stdout("https://maestro:4774\n");

    baton(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("baton"));
}

#[test]
fn test_config_set_invalid_value_fails() {
    let home = TempDir::new().unwrap();
    baton(&home)
        .args(["config", "set", "harmony.timeout_seconds", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("greater than 0"));
}
