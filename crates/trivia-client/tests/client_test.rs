//! Tests for TriviaClient against a wiremock server.
//!
//! Covers query encoding, successful decoding, the 400 error body,
//! and transport failure against an unreachable port.

use trivia_client::{ClientConfig, ClientError, TriviaClient};
use trivia_core::SessionSelection;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(uri: &str) -> TriviaClient {
    TriviaClient::new(ClientConfig::new(uri).unwrap()).unwrap()
}

#[tokio::test]
async fn fetch_sends_navigation_params_and_decodes_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/trivia"))
        .and(query_param("country", "USA"))
        .and(query_param("period", "any"))
        .and(query_param("count", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [
                {"country": "USA", "period": "20th Century", "question": "Q1", "answer": "A1", "funFact": "F1"},
                {"country": "USA", "period": "19th Century", "question": "Q2", "answer": "A2"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let items = client
        .fetch(&SessionSelection::new("USA", Some("Any Time"), 3))
        .await
        .unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].fun_fact.as_deref(), Some("F1"));
    assert_eq!(items[1].fun_fact, None);
}

#[tokio::test]
async fn empty_items_is_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/trivia"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": []})))
        .mount(&server)
        .await;

    let items = client_for(&server.uri())
        .fetch(&SessionSelection::new("Atlantis", None, 10))
        .await
        .unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn bad_request_surfaces_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/trivia"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({"error": "Country parameter is required"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server.uri())
        .fetch_countries(&[], None)
        .await
        .unwrap_err();
    match err {
        ClientError::Api {
            status, message, ..
        } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Country parameter is required");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_countries_joins_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/trivia"))
        .and(query_param("countries", "Japan,France"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server.uri())
        .fetch_countries(&["Japan", "France"], None)
        .await
        .unwrap();
}

#[tokio::test]
async fn selection_options_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/countries"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"countries": ["Japan", "USA"]})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/periods"))
        .and(query_param("country", "USA"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"periods": ["Any Time", "20th Century"]})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    assert_eq!(client.countries().await.unwrap(), ["Japan", "USA"]);
    assert_eq!(
        client.periods(Some("USA")).await.unwrap(),
        ["Any Time", "20th Century"]
    );
}

#[tokio::test]
async fn malformed_body_is_deserialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/trivia"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client_for(&server.uri())
        .fetch(&SessionSelection::new("USA", None, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Deserialization { .. }));
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let err = client_for("http://127.0.0.1:1")
        .fetch(&SessionSelection::new("USA", None, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Http { .. }));
}
