//! Request resolution from catalog files.

use super::{builder, write_catalog, TOML_CATALOG, TXT_CATALOG};
use apicli::{MapEnv, RequestError, VarError, VariableMap};

fn vars(pairs: &[(&str, &str)]) -> VariableMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_local_url_override() {
    let (_dir, path) = write_catalog("apis.txt", TXT_CATALOG);
    let request = builder(MapEnv::new())
        .get_request("local", "test", &vars(&[("VAR", "foo")]), Some(&path))
        .unwrap();

    assert_eq!(request.url, "http://localhost/foo");
    assert_eq!(request.method, "GET");
    assert!(request.headers.is_empty());
    assert_eq!(request.body, None);
}

#[test]
fn test_unset_optional_variable_is_empty() {
    let (_dir, path) = write_catalog("apis.txt", TXT_CATALOG);
    let request = builder(MapEnv::new())
        .get_request("local", "test", &VariableMap::new(), Some(&path))
        .unwrap();
    assert_eq!(request.url, "http://localhost/");
}

#[test]
fn test_bearer_with_aliased_key() {
    let (_dir, path) = write_catalog("apis.txt", TXT_CATALOG);
    let env = MapEnv::new()
        .with("OPENAI_API_KEY", "sk-test")
        .with("MODEL", "gpt-4o");

    let request = builder(env)
        .get_request("openai", "chat", &vars(&[("PROMPT", "hi")]), Some(&path))
        .unwrap();

    assert_eq!(request.method, "POST");
    assert_eq!(request.header("authorization"), Some("Bearer sk-test"));
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert_eq!(
        request.body.as_deref(),
        Some(r#"{"model": "gpt-4o", "prompt": "hi"}"#)
    );
}

#[test]
fn test_missing_required_key() {
    let (_dir, path) = write_catalog("apis.txt", TXT_CATALOG);
    let err = builder(MapEnv::new().with("MODEL", "m"))
        .get_request("openai", "chat", &VariableMap::new(), Some(&path))
        .unwrap_err();

    assert!(matches!(err, RequestError::Variable(VarError::Required(ref v)) if v == "API_KEY"));
    assert_eq!(err.to_string(), "Variable API_KEY is required");
}

#[test]
fn test_provider_order_injected() {
    let (_dir, path) = write_catalog("apicli.toml", TOML_CATALOG);
    let env = MapEnv::new()
        .with("OPENROUTER_API_KEY", "or-key")
        .with("MODEL", "llama");

    let request = builder(env)
        .get_request(
            "router",
            "chat",
            &vars(&[("PROMPT", "hello"), ("PROVIDER", "Cerebras")]),
            Some(&path),
        )
        .unwrap();

    let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["provider"]["order"][0], "Cerebras");
    assert_eq!(body["messages"][0]["content"], "hello");
    assert_eq!(request.header("Authorization"), Some("Bearer or-key"));
}

#[test]
fn test_provider_snippet_dropped_when_unset() {
    let (_dir, path) = write_catalog("apicli.toml", TOML_CATALOG);
    let env = MapEnv::new()
        .with("OPENROUTER_API_KEY", "or-key")
        .with("MODEL", "llama");

    let request = builder(env)
        .get_request("router", "chat", &VariableMap::new(), Some(&path))
        .unwrap();

    let body = request.body.unwrap();
    assert!(!body.contains("provider"));
    let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["model"], "llama");
}

#[test]
fn test_map_headers_resolved() {
    let (_dir, path) = write_catalog("apicli.toml", TOML_CATALOG);
    let env = MapEnv::new().with("GITHUB_TOKEN", "gh-123");

    let request = builder(env)
        .get_request("github", "user", &vars(&[("USER", "octocat")]), Some(&path))
        .unwrap();

    assert_eq!(request.url, "https://api.github.com/users/octocat");
    assert_eq!(request.method, "GET");
    assert_eq!(request.header("X-Token"), Some("gh-123"));
    assert_eq!(request.header("Accept"), Some("application/vnd.github+json"));
}

#[test]
fn test_unknown_api() {
    let (_dir, path) = write_catalog("apis.txt", TXT_CATALOG);
    let err = builder(MapEnv::new())
        .get_request("nope", "missing", &VariableMap::new(), Some(&path))
        .unwrap_err();
    assert_eq!(err.to_string(), "Unknown API: nope.missing");
}

#[test]
fn test_missing_explicit_catalog() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = builder(MapEnv::new())
        .get_request("local", "test", &VariableMap::new(), Some(&dir.path().join("absent.txt")))
        .unwrap_err();
    assert!(matches!(err, RequestError::Catalog(_)));
}
