//! Catalog loading through the public API.

use super::{write_catalog, TOML_CATALOG, TXT_CATALOG};
use apicli::catalog::{filter_apis, load_catalog_file, CATALOG_FILE_NAMES};
use apicli::{CatalogError, CatalogLoader};
use serde_json::json;

#[test]
fn test_txt_catalog_loads_in_order() {
    let (_dir, path) = write_catalog("apis.txt", TXT_CATALOG);
    let apis = load_catalog_file(&path).unwrap();

    let ids: Vec<String> = apis.iter().map(|api| api.id()).collect();
    assert_eq!(ids, vec!["local.test", "openai.chat", "catfact.fact"]);

    assert_eq!(apis[0].headers, json!({}));
    assert_eq!(apis[1].headers, json!("BEARER $!API_KEY"));
    assert_eq!(
        apis[1].body.as_deref(),
        Some(r#"{"model": "$!MODEL", "prompt": "$PROMPT"}"#)
    );
    assert!(apis[2].headers.is_null());
    assert_eq!(apis[2].body, None);
}

#[test]
fn test_toml_catalog_picked_by_extension() {
    let (_dir, path) = write_catalog("apicli.toml", TOML_CATALOG);
    let apis = load_catalog_file(&path).unwrap();

    assert_eq!(apis.len(), 2);
    assert_eq!(apis[0].id(), "router.chat");
    assert_eq!(apis[0].method.as_deref(), Some("POST"));
    assert_eq!(apis[1].id(), "github.user");
    assert_eq!(apis[1].method, None);
    assert_eq!(
        apis[1].headers,
        json!({"Accept": "application/vnd.github+json", "X-Token": "$GITHUB_TOKEN"})
    );
}

#[test]
fn test_invalid_toml_is_an_error() {
    let (_dir, path) = write_catalog("apicli.toml", "[apis\nbroken");
    let err = load_catalog_file(&path).unwrap_err();
    assert!(matches!(err, CatalogError::Toml { .. }));
    assert!(err.to_string().contains("apicli.toml"));
}

#[test]
fn test_default_directory_prefers_toml() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join(CATALOG_FILE_NAMES[0]), TOML_CATALOG).unwrap();
    std::fs::write(dir.path().join(CATALOG_FILE_NAMES[1]), TXT_CATALOG).unwrap();

    let loader = CatalogLoader::new(Some(dir.path().to_path_buf()));
    assert_eq!(
        loader.locate(None).unwrap(),
        dir.path().join("apicli.toml")
    );
    assert!(loader.get_api("router", "chat", None).unwrap().is_some());
    assert!(loader.get_api("local", "test", None).unwrap().is_none());
}

#[test]
fn test_falls_back_to_txt() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("apis.txt"), TXT_CATALOG).unwrap();

    let loader = CatalogLoader::new(Some(dir.path().to_path_buf()));
    assert_eq!(loader.get_apis(None).unwrap().len(), 3);
}

#[test]
fn test_explicit_path_wins_over_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("apicli.toml"), TOML_CATALOG).unwrap();
    let (_other, explicit) = write_catalog("mine.txt", TXT_CATALOG);

    let loader = CatalogLoader::new(Some(dir.path().to_path_buf()));
    let apis = loader.get_apis(Some(&explicit)).unwrap();
    assert_eq!(apis[0].id(), "local.test");
}

#[test]
fn test_empty_default_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    let loader = CatalogLoader::new(Some(dir.path().to_path_buf()));
    assert!(loader.locate(None).is_none());
    assert!(loader.get_apis(None).unwrap().is_empty());
}

#[test]
fn test_filter_by_substring() {
    let (_dir, path) = write_catalog("apis.txt", TXT_CATALOG);
    let apis = load_catalog_file(&path).unwrap();

    let matched: Vec<String> = filter_apis(&apis, "at").iter().map(|a| a.id()).collect();
    assert_eq!(matched, vec!["openai.chat", "catfact.fact"]);
    assert_eq!(filter_apis(&apis, "").len(), 3);
    assert!(filter_apis(&apis, "nothing").is_empty());
}
