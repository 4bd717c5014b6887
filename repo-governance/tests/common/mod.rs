#![allow(dead_code)]

use mockito::{Matcher, Mock, ServerGuard};
use repo_governance::{ClientConfig, GitHubClient};
use serde_json::{json, Value};

/// Every file the rubric looks for, so that only the files a test omits
/// produce findings.
pub const COMPLETE_TREE: &[&str] = &[
    "LICENSE",
    "README.md",
    "CONTRIBUTING.md",
    "CODE_OF_CONDUCT.md",
    "SECURITY.md",
    "CHANGELOG.md",
    "ACCESSIBILITY.md",
    "SUSTAINABILITY.md",
    "AGENTS.md",
    "Cargo.toml",
    "src/lib.rs",
    ".github/workflows/ci.yml",
    ".github/ISSUE_TEMPLATE/bug.md",
    ".github/pull_request_template.md",
];

pub fn client(server: &ServerGuard, token: Option<&str>) -> GitHubClient {
    let config =
        ClientConfig::new(token.map(str::to_string)).with_api_base_url(server.url());
    GitHubClient::new(&config).unwrap()
}

pub fn metadata(default_branch: &str) -> Value {
    json!({
        "default_branch": default_branch,
        "fork": false,
        "description": "Widgets for everyone",
        "homepage": "https://widgets.example.com",
        "topics": ["widgets"]
    })
}

pub fn tree(paths: &[&str]) -> Value {
    let entries: Vec<Value> = paths
        .iter()
        .map(|path| json!({ "path": path, "type": "blob", "sha": "0", "mode": "100644" }))
        .collect();
    json!({ "sha": "0", "tree": entries, "truncated": false })
}

pub fn tree_without(missing: &[&str]) -> Value {
    let paths: Vec<&str> = COMPLETE_TREE
        .iter()
        .copied()
        .filter(|path| !missing.contains(path))
        .collect();
    tree(&paths)
}

pub fn listing(owner: &str, names: &[String], fork: bool) -> Value {
    let entries: Vec<Value> = names
        .iter()
        .map(|name| {
            json!({
                "name": name,
                "full_name": format!("{owner}/{name}"),
                "owner": { "login": owner },
                "fork": fork
            })
        })
        .collect();
    Value::Array(entries)
}

pub async fn mock_json(
    server: &mut ServerGuard,
    path: impl Into<Matcher>,
    status: usize,
    body: &Value,
) -> Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

pub async fn mock_not_found(server: &mut ServerGuard, path: impl Into<Matcher>) -> Mock {
    mock_json(server, path, 404, &json!({ "message": "Not Found" })).await
}

/// Mocks metadata and tree for `owner/name` on branch `main`.
pub async fn mock_repository(server: &mut ServerGuard, owner: &str, name: &str, tree: &Value) {
    mock_json(server, format!("/repos/{owner}/{name}").as_str(), 200, &metadata("main")).await;
    mock_json(
        server,
        format!("/repos/{owner}/{name}/git/trees/main?recursive=1").as_str(),
        200,
        tree,
    )
    .await;
}

/// Matcher for one page of a repository listing.
pub fn listing_page(page: u32) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("per_page".into(), "100".into()),
        Matcher::UrlEncoded("page".into(), page.to_string()),
        Matcher::UrlEncoded("sort".into(), "updated".into()),
        Matcher::UrlEncoded("direction".into(), "desc".into()),
    ])
}
