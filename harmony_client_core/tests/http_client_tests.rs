//! Contract tests for the HTTP client against a mock Harmony server
//!
//! Covers endpoint paths, the `data` envelope, not-found handling and error
//! mapping for every `HarmonyApi` operation.

use harmony_client_core::{
    ClientConfig, Error, HarmonyApi, HarmonyClient, NewContainer, UpstreamError,
};
use harmony_test_utils::ContainerBuilder;
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

fn client_for(server: &ServerGuard) -> HarmonyClient {
    HarmonyClient::new(ClientConfig::for_host(&server.url())).unwrap()
}

fn container_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "machine_id": "1",
        "name": name,
        "hostname": format!("{name}.local"),
        "image": "nginx:latest",
        "entry_point": "",
        "enabled": true,
        "cid": "4f1c2a9b8e7d6c5b4a39281706f5e4d3"
    })
}

#[tokio::test]
async fn test_containers_lists_all() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/containers")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({ "data": [container_json("1", "web-1"), container_json("2", "web-2")] })
                .to_string(),
        )
        .create_async()
        .await;

    let containers = client_for(&server).containers().await.unwrap();

    assert_eq!(containers.len(), 2);
    assert_eq!(containers[0].name, "web-1");
    assert_eq!(containers[1].id, "2");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_container_by_id() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/containers/42")
        .with_status(200)
        .with_body(json!({ "data": container_json("42", "web-1") }).to_string())
        .create_async()
        .await;

    let container = client_for(&server).container("42").await.unwrap().unwrap();

    let expected = ContainerBuilder::new()
        .id("42")
        .machine_id("1")
        .name("web-1")
        .hostname("web-1.local")
        .image("nginx:latest")
        .enabled(true)
        .cid("4f1c2a9b8e7d6c5b4a39281706f5e4d3")
        .build();
    assert_eq!(container, expected);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_container_by_id_404_is_none() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/containers/99")
        .with_status(404)
        .create_async()
        .await;

    let container = client_for(&server).container("99").await.unwrap();

    assert!(container.is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_container_by_id_null_data_is_none() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1/containers/7")
        .with_status(200)
        .with_body(r#"{"data":null}"#)
        .create_async()
        .await;

    assert!(client_for(&server).container("7").await.unwrap().is_none());
}

#[tokio::test]
async fn test_container_with_empty_id_is_none_without_listing() {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", "/v1/containers/")
        .with_status(200)
        .with_body(json!({ "data": [container_json("1", "web-1")] }).to_string())
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);

    assert!(client.container("").await.unwrap().is_none());
    assert!(client.machine("").await.unwrap().is_none());
    list.assert_async().await;
}

#[tokio::test]
async fn test_container_by_name_uses_name_query() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/containers")
        .match_query(Matcher::UrlEncoded("name".into(), "web-1".into()))
        .with_status(200)
        .with_body(json!({ "data": [container_json("5", "web-1")] }).to_string())
        .create_async()
        .await;

    let container = client_for(&server)
        .container_by_name("web-1")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(container.id, "5");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_container_by_name_empty_result_is_none() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1/containers")
        .match_query(Matcher::UrlEncoded("name".into(), "ghost".into()))
        .with_status(200)
        .with_body(r#"{"data":[]}"#)
        .create_async()
        .await;

    let container = client_for(&server).container_by_name("ghost").await.unwrap();
    assert!(container.is_none());
}

#[tokio::test]
async fn test_containers_add_posts_request_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/containers")
        .match_body(Matcher::Json(json!({
            "machine_id": "1",
            "name": "web-1",
            "hostname": "web-1.local",
            "image": "nginx:latest",
            "entry_point": "/docker-entrypoint.sh",
            "enabled": true
        })))
        .with_status(201)
        .with_body(json!({ "data": container_json("17", "web-1") }).to_string())
        .create_async()
        .await;

    let request = NewContainer {
        machine_id: "1".to_string(),
        name: "web-1".to_string(),
        hostname: "web-1.local".to_string(),
        image: "nginx:latest".to_string(),
        entry_point: "/docker-entrypoint.sh".to_string(),
        enabled: true,
    };
    let created = client_for(&server).containers_add(&request).await.unwrap();

    assert_eq!(created.id, "17");
    assert!(created.matches(&request));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_containers_enabled_update() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/v1/containers/42/enabled")
        .match_body(Matcher::Json(json!({ "enabled": false })))
        .with_status(204)
        .create_async()
        .await;

    client_for(&server)
        .containers_enabled_update("42", false)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_carries_status_and_body() {
    let mut server = Server::new_async().await;
    server
        .mock("PUT", "/v1/containers/42/enabled")
        .with_status(500)
        .with_body("database is locked")
        .create_async()
        .await;

    let err = client_for(&server)
        .containers_enabled_update("42", true)
        .await
        .unwrap_err();

    match err {
        Error::Upstream(UpstreamError::ServerError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "database is locked");
        }
        other => panic!("Expected ServerError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_404_is_an_error_not_empty() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1/machines")
        .with_status(404)
        .create_async()
        .await;

    let err = client_for(&server).machines().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Upstream(UpstreamError::ServerError { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1/containers")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let err = client_for(&server).containers().await.unwrap_err();
    assert!(matches!(err, Error::Upstream(UpstreamError::Decode { .. })));
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    // Port 9 (discard) on localhost is not expected to be listening.
    let client = HarmonyClient::new(ClientConfig::for_host("http://127.0.0.1:9")).unwrap();

    let err = client.machines().await.unwrap_err();
    assert!(matches!(err, Error::Upstream(UpstreamError::Transport { .. })));
}

#[tokio::test]
async fn test_machines_and_lookups() {
    let mut server = Server::new_async().await;
    let machine = json!({
        "id": "3",
        "name": "node-a",
        "hostname": "node-a.local",
        "container_ids": ["1", "2"]
    });
    let list = server
        .mock("GET", "/v1/machines")
        .match_query(Matcher::Missing)
        .with_status(200)
        .with_body(json!({ "data": [machine.clone()] }).to_string())
        .create_async()
        .await;
    let by_id = server
        .mock("GET", "/v1/machines/3")
        .with_status(200)
        .with_body(json!({ "data": machine.clone() }).to_string())
        .create_async()
        .await;
    let by_name = server
        .mock("GET", "/v1/machines")
        .match_query(Matcher::UrlEncoded("name".into(), "node-a".into()))
        .with_status(200)
        .with_body(json!({ "data": [machine] }).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let machines = client.machines().await.unwrap();
    let found_by_id = client.machine("3").await.unwrap().unwrap();
    let found_by_name = client.machine_by_name("node-a").await.unwrap().unwrap();

    assert_eq!(machines.len(), 1);
    assert_eq!(found_by_id, found_by_name);
    assert_eq!(found_by_id.container_ids, vec!["1", "2"]);
    list.assert_async().await;
    by_id.assert_async().await;
    by_name.assert_async().await;
}

#[tokio::test]
async fn test_machine_by_id_404_is_none() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1/machines/8")
        .with_status(404)
        .create_async()
        .await;

    assert!(client_for(&server).machine("8").await.unwrap().is_none());
}
