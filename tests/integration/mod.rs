//! Shared fixtures for the integration suites.

pub mod catalog_test;
pub mod end_to_end_test;
pub mod request_test;

use apicli::{AliasTable, CatalogLoader, MapEnv, RequestBuilder, VariableResolver};
use std::path::PathBuf;
use tempfile::TempDir;

/// A small tabular catalog covering the common template shapes.
pub const TXT_CATALOG: &str = concat!(
    "service name url method headers body\n",
    "local test http://localhost/$VAR GET {}\n",
    "\n",
    "openai chat https://api.openai.com/v1/chat/completions POST \"BEARER $!API_KEY\" ",
    "\"{\"\"model\"\": \"\"$!MODEL\"\", \"\"prompt\"\": \"\"$PROMPT\"\"}\"\n",
    "catfact fact https://catfact.ninja/fact GET null null\n",
);

/// The same kind of catalog in TOML form.
pub const TOML_CATALOG: &str = r#"
[apis."router.chat"]
url = "https://openrouter.ai/api/v1/chat/completions"
method = "POST"
headers = "BEARER $!OPENROUTER_API_KEY"
body = '''
{"model": "$!MODEL", "messages": [{"role": "user", "content": "$PROMPT"}], "provider": {"order": ["$PROVIDER"]}}
'''

[apis."github.user"]
url = "https://api.github.com/users/$!USER"

[apis."github.user".headers]
Accept = "application/vnd.github+json"
X-Token = "$GITHUB_TOKEN"
"#;

/// Writes `content` to `file_name` inside a fresh temporary directory.
pub fn write_catalog(file_name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(file_name);
    std::fs::write(&path, content).expect("Failed to write catalog");
    (dir, path)
}

/// A request builder over a fixed environment, with no default catalog.
pub fn builder(env: MapEnv) -> RequestBuilder<MapEnv> {
    RequestBuilder::new(
        VariableResolver::new(env, AliasTable::default()),
        CatalogLoader::new(None),
    )
}
