//! HTTP adapter against a local mock server.
//!
//! The client is blocking, so every call runs on `spawn_blocking` while the
//! mock server lives on the test's tokio runtime.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use shopsync_client::{ClientError, HttpStorefrontClient, StorefrontClient};
use shopsync_core::{ShopConfig, ShopDomain, ShopifyConfig, ThemeId, ThemeRole};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BASE: &str = "/admin/api/2024-10";

fn shop() -> ShopDomain {
    ShopDomain::from("acme-de")
}

fn client(server: &MockServer) -> HttpStorefrontClient {
    let config = ShopifyConfig {
        api_version: "2024-10".into(),
        scopes: vec![],
        shops: vec![ShopConfig {
            shop: shop(),
            title: "Acme DE".into(),
            access_token: "shpat_test".into(),
        }],
        timeout_secs: Some(5),
    };
    HttpStorefrontClient::new(config).with_origin(server.uri())
}

async fn blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.expect("join")
}

#[tokio::test]
async fn list_themes_sends_token_and_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{BASE}/themes.json")))
        .and(header("X-Shopify-Access-Token", "shpat_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "themes": [
                {"id": 1, "name": "Dawn", "role": "main"},
                {"id": 2, "name": "Dawn copy", "role": "unpublished"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let c = client(&server);
    let themes = blocking(move || c.list_themes(&shop())).await.expect("themes");
    assert_eq!(themes.len(), 2);
    assert_eq!(themes[0].role, ThemeRole::Main);
    assert_eq!(themes[1].id, ThemeId(2));
}

#[tokio::test]
async fn get_theme_unwraps_single_theme() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{BASE}/themes/7.json")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"theme": {"id": 7, "name": "Live", "role": "main"}})),
        )
        .mount(&server)
        .await;

    let c = client(&server);
    let theme = blocking(move || c.get_theme(&shop(), ThemeId(7))).await.expect("theme");
    assert_eq!(theme.name, "Live");
}

#[tokio::test]
async fn get_asset_passes_key_as_query_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{BASE}/themes/7/assets.json")))
        .and(query_param("asset[key]", "templates/index.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "asset": {"key": "templates/index.json", "value": "{\"sections\":{}}"}
        })))
        .mount(&server)
        .await;

    let c = client(&server);
    let asset = blocking(move || c.get_asset(&shop(), ThemeId(7), "templates/index.json"))
        .await
        .expect("asset");
    assert_eq!(asset.key, "templates/index.json");
    assert_eq!(asset.text(), Some("{\"sections\":{}}"));
}

#[tokio::test]
async fn get_asset_404_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{BASE}/themes/7/assets.json")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"errors": "Not Found"})))
        .mount(&server)
        .await;

    let c = client(&server);
    let err = blocking(move || c.get_asset(&shop(), ThemeId(7), "sections/hero.liquid"))
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "got: {err}");
    assert!(err.to_string().contains("sections/hero.liquid"));
}

#[tokio::test]
async fn create_asset_puts_key_and_value() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("{BASE}/themes/7/assets.json")))
        .and(body_partial_json(json!({
            "asset": {"key": "sections/hero.liquid", "value": "<div>hero</div>"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "asset": {"key": "sections/hero.liquid", "theme_id": 7}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let c = client(&server);
    let asset = blocking(move || {
        c.create_asset(&shop(), ThemeId(7), "sections/hero.liquid", "<div>hero</div>")
    })
    .await
    .expect("create");
    assert_eq!(asset.theme_id, Some(ThemeId(7)));
}

#[tokio::test]
async fn server_error_is_transport_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{BASE}/themes.json")))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let c = client(&server);
    let err = blocking(move || c.list_themes(&shop())).await.unwrap_err();
    match err {
        ClientError::Transport { status, message } => {
            assert_eq!(status, 503);
            assert!(message.contains("maintenance"), "got: {message}");
        }
        other => panic!("expected Transport, got {other:?}"),
    }
}

#[tokio::test]
async fn graph_query_returns_data_member() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{BASE}/graphql.json")))
        .and(body_partial_json(json!({"variables": {"query": "a OR b"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"files": {"edges": []}}
        })))
        .mount(&server)
        .await;

    let c = client(&server);
    let data: Value = blocking(move || {
        c.run_graph_query(&shop(), "query($query: String!) { files }", Some(json!({"query": "a OR b"})))
    })
    .await
    .expect("graphql");
    assert_eq!(data, json!({"files": {"edges": []}}));
}

#[tokio::test]
async fn graph_query_errors_without_data_fail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{BASE}/graphql.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{"message": "Access denied for files field."}]
        })))
        .mount(&server)
        .await;

    let c = client(&server);
    let err = blocking(move || c.run_graph_query(&shop(), "{ files }", None))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::GraphQl(ref m) if m.contains("Access denied")), "got: {err}");
}
