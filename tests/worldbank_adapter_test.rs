//! Integration tests for the World Bank adapter against a mock API

use debtwatch::adapters::worldbank::WorldBankClient;
use debtwatch::adapters::{IndicatorSource, YearRange};
use debtwatch::config::WorldBankConfig;
use debtwatch::domain::SourceError;
use mockito::{Matcher, Server};
use serde_json::json;

const DEBT_PATH: &str = "/v2/country/BGR/indicator/DT.DOD.DECT.CD";

fn client_for(server: &Server, max_pages: u32) -> WorldBankClient {
    let config = WorldBankConfig {
        base_url: format!("{}/v2", server.url()),
        timeout_seconds: 2,
        connect_timeout_seconds: 1,
        per_page: 2,
        max_pages,
        ..Default::default()
    };
    WorldBankClient::new(&config).unwrap()
}

fn page_body(page: u32, pages: u32, entries: serde_json::Value) -> String {
    json!([
        {"page": page, "pages": pages, "per_page": 2, "total": pages * 2},
        entries
    ])
    .to_string()
}

fn range() -> YearRange {
    YearRange::new(2010, 2027)
}

#[tokio::test]
async fn test_fetch_single_page() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", DEBT_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("format".into(), "json".into()),
            Matcher::UrlEncoded("date".into(), "2010:2027".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
        ]))
        .match_header("cache-control", "no-cache, no-store")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(
            1,
            1,
            json!([
                {"indicator": {"id": "DT.DOD.DECT.CD"}, "countryiso3code": "BGR", "date": "2024", "value": null},
                {"indicator": {"id": "DT.DOD.DECT.CD"}, "countryiso3code": "BGR", "date": "2023", "value": 47100000000.0}
            ]),
        ))
        .create_async()
        .await;

    let client = client_for(&server, 5);
    let observations = client
        .try_fetch_series("DT.DOD.DECT.CD", "BGR", range())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(observations.len(), 2);
    assert_eq!(observations[0].period, "2024");
    assert_eq!(observations[0].value, None);
    assert_eq!(observations[1].value, Some(json!(47100000000.0)));
    assert_eq!(observations[1].source_fields["countryiso3code"], "BGR");
}

#[tokio::test]
async fn test_follows_pagination() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("GET", DEBT_PATH)
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_body(page_body(
            1,
            2,
            json!([{"date": "2024", "value": 1.0}, {"date": "2023", "value": 2.0}]),
        ))
        .create_async()
        .await;
    let second = server
        .mock("GET", DEBT_PATH)
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_body(page_body(2, 2, json!([{"date": "2022", "value": 3.0}])))
        .create_async()
        .await;

    let client = client_for(&server, 5);
    let observations = client
        .try_fetch_series("DT.DOD.DECT.CD", "BGR", range())
        .await
        .unwrap();

    first.assert_async().await;
    second.assert_async().await;
    let periods: Vec<&str> = observations.iter().map(|o| o.period.as_str()).collect();
    assert_eq!(periods, vec!["2024", "2023", "2022"]);
}

#[tokio::test]
async fn test_pagination_capped_at_max_pages() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("GET", DEBT_PATH)
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_body(page_body(1, 4, json!([{"date": "2024", "value": 1.0}])))
        .create_async()
        .await;
    let beyond = server
        .mock("GET", DEBT_PATH)
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server, 1);
    let observations = client
        .try_fetch_series("DT.DOD.DECT.CD", "BGR", range())
        .await
        .unwrap();

    first.assert_async().await;
    beyond.assert_async().await;
    assert_eq!(observations.len(), 1);
}

#[tokio::test]
async fn test_null_observations_mean_no_data() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", DEBT_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!([{"page": 1, "pages": 0, "per_page": 2, "total": 0}, null]).to_string())
        .create_async()
        .await;

    let client = client_for(&server, 5);
    let observations = client
        .try_fetch_series("DT.DOD.DECT.CD", "BGR", range())
        .await
        .unwrap();
    assert!(observations.is_empty());
}

#[tokio::test]
async fn test_server_error_status() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", DEBT_PATH)
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let client = client_for(&server, 5);
    let err = client
        .try_fetch_series("DT.DOD.DECT.CD", "BGR", range())
        .await
        .unwrap_err();
    match err {
        SourceError::HttpStatus { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }

    // The logging wrapper turns the failure into an empty contribution
    let observations = client
        .fetch_indicator_series("DT.DOD.DECT.CD", "BGR", range())
        .await;
    assert!(observations.is_empty());
}

#[tokio::test]
async fn test_api_error_message_payload() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v2/country/BGR/indicator/NOT.AN.INDICATOR")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!([{"message": [{"id": "120", "key": "Invalid value", "value": "The provided parameter value is not valid"}]}])
                .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server, 5);
    let err = client
        .try_fetch_series("NOT.AN.INDICATOR", "BGR", range())
        .await
        .unwrap_err();
    match err {
        SourceError::MalformedPayload(detail) => {
            assert!(detail.contains("The provided parameter value is not valid"))
        }
        other => panic!("expected MalformedPayload, got {other:?}"),
    }
}

#[tokio::test]
async fn test_object_payload_is_malformed() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", DEBT_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"unexpected": true}).to_string())
        .create_async()
        .await;

    let client = client_for(&server, 5);
    assert!(matches!(
        client
            .try_fetch_series("DT.DOD.DECT.CD", "BGR", range())
            .await,
        Err(SourceError::MalformedPayload(_))
    ));
}

#[tokio::test]
async fn test_non_json_body_is_invalid_response() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", DEBT_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let client = client_for(&server, 5);
    assert!(matches!(
        client
            .try_fetch_series("DT.DOD.DECT.CD", "BGR", range())
            .await,
        Err(SourceError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_connection_refused() {
    let config = WorldBankConfig {
        base_url: "http://127.0.0.1:1/v2".to_string(),
        timeout_seconds: 2,
        connect_timeout_seconds: 1,
        ..Default::default()
    };
    let client = WorldBankClient::new(&config).unwrap();
    let err = client
        .try_fetch_series("DT.DOD.DECT.CD", "BGR", range())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SourceError::ConnectionFailed(_) | SourceError::Timeout(_)
    ));
}
