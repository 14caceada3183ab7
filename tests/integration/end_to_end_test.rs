//! Catalog to HTTP round trips against a local mock server.

use super::{builder, write_catalog};
use apicli::{ApiCliConfig, ApiClient, FetchOptions, MapEnv, QueryEngine, ReqwestTransport};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CATALOG: &str = concat!(
    "service name url method headers body\n",
    "mock get $BASE/get GET {}\n",
    "mock chat $BASE/chat POST \"BEARER $!API_KEY\" \"{\"\"model\"\": \"\"$!MODEL\"\"}\"\n",
    "mock missing $BASE/missing GET {}\n",
);

fn client(env: MapEnv) -> ApiClient<MapEnv, ReqwestTransport> {
    ApiClient::new(
        builder(env),
        ReqwestTransport::new(&ApiCliConfig::default()).unwrap(),
        QueryEngine::default(),
    )
}

#[tokio::test]
async fn test_get_json_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"fact":"cats purr"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, catalog) = write_catalog("apis.txt", CATALOG);
    let options = FetchOptions::new()
        .var("BASE", server.uri())
        .config_path(&catalog);

    let handle = client(MapEnv::new()).get("mock.get", &options).await.unwrap();
    assert_eq!(handle.json().unwrap()["fact"], "cats purr");
}

#[tokio::test]
async fn test_post_with_bearer_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(header("authorization", "Bearer sk-live"))
        .and(header("content-type", "application/json"))
        .and(body_string(r#"{"model": "small"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"resp-1"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, catalog) = write_catalog("apis.txt", CATALOG);
    let env = MapEnv::new()
        .with("BASE", server.uri())
        .with("CEREBRAS_API_KEY", "sk-live");
    let options = FetchOptions::new().var("MODEL", "small").config_path(&catalog);

    let response = client(env)
        .fetch_api("mock", "chat", &options)
        .await
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.text(), r#"{"id":"resp-1"}"#);
}

#[tokio::test]
async fn test_error_status_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&server)
        .await;

    let (_dir, catalog) = write_catalog("apis.txt", CATALOG);
    let options = FetchOptions::new()
        .var("BASE", server.uri())
        .config_path(&catalog);

    let response = client(MapEnv::new())
        .fetch_api("mock", "missing", &options)
        .await
        .unwrap();
    assert_eq!(response.status, 404);
    assert_eq!(response.status_text, "Not Found");
    assert_eq!(response.text(), "not here");
}

#[tokio::test]
async fn test_required_variable_stops_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (_dir, catalog) = write_catalog("apis.txt", CATALOG);
    let options = FetchOptions::new()
        .var("BASE", server.uri())
        .var("MODEL", "small")
        .config_path(&catalog);

    let err = client(MapEnv::new())
        .get("mock.chat", &options)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Variable API_KEY is required");
}

#[tokio::test]
async fn test_non_json_body_fails_to_parse() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let (_dir, catalog) = write_catalog("apis.txt", CATALOG);
    let options = FetchOptions::new()
        .var("BASE", server.uri())
        .config_path(&catalog);

    let handle = client(MapEnv::new()).get("mock.get", &options).await.unwrap();
    assert!(handle.json().is_err());
    assert_eq!(handle.text(), "<html></html>");
}
