//! End-to-end search through the configured provider.

use std::io::Write;

use pretty_assertions::assert_eq;
use serde_json::json;
use typeahead_cli::cli::SourceArgs;
use typeahead_cli::search_cmd::search;
use typeahead_cli::{AppConfig, build_provider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn labels(results: &typeahead::ResultSet) -> Vec<String> {
    results.options().map(|option| option.label.clone()).collect()
}

#[tokio::test]
async fn test_search_http_endpoint_from_flags() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ports"))
        .and(query_param("q", "rotter"))
        .and(query_param("type", "sea"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"code": "NLRTM", "name": "Rotterdam"},
                {"name": "no identifier"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = AppConfig::default();
    config
        .apply_source(&SourceArgs {
            endpoint: Some(format!("{}/ports", server.uri())),
            query_param: Some("q".into()),
            params: vec![("type".into(), "sea".into())],
            ..Default::default()
        })
        .unwrap();

    let provider = build_provider(&config).unwrap().expect("provider");
    let results = search(provider.as_ref(), "  rotter ").await.unwrap();

    assert_eq!(labels(&results), vec!["Rotterdam".to_string()]);
    assert_eq!(results.get(0).map(|o| o.id.as_str()), Some("NLRTM"));
}

#[tokio::test]
async fn test_search_fixture_takes_precedence() {
    let mut fixture = tempfile::NamedTempFile::new().unwrap();
    write!(
        fixture,
        "{}",
        json!([
            {"id": "DEHAM", "name": "Hamburg"},
            {"id": "NLRTM", "name": "Rotterdam"}
        ])
    )
    .unwrap();

    let mut config = AppConfig::default();
    config
        .apply_source(&SourceArgs {
            endpoint: Some("https://unreachable.invalid/ports".into()),
            fixture: Some(fixture.path().to_path_buf()),
            ..Default::default()
        })
        .unwrap();

    let provider = build_provider(&config).unwrap().expect("provider");
    let results = search(provider.as_ref(), "ham").await.unwrap();
    assert_eq!(labels(&results), vec!["Hamburg".to_string()]);
}

#[tokio::test]
async fn test_search_rejects_placeholder() {
    assert!(build_provider(&AppConfig::default()).unwrap().is_none());

    let provider = typeahead_client::StaticSearchProvider::default();
    let err = search(&provider, "temp_3105").await.unwrap_err();
    assert!(err.to_string().contains("placeholder"));
}

#[tokio::test]
async fn test_search_reports_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut config = AppConfig::default();
    config
        .apply_source(&SourceArgs {
            endpoint: Some(server.uri()),
            ..Default::default()
        })
        .unwrap();

    let provider = build_provider(&config).unwrap().expect("provider");
    let err = search(provider.as_ref(), "rotter").await.unwrap_err();
    assert!(err.to_string().contains("Search for 'rotter' failed"));
}
