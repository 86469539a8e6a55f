//! Transport tests for `AmoClient`.
//!
//! Uses wiremock to stand in for the amoCRM API over real HTTP.

use std::time::Duration;

use amocrm::{AmoClient, AmoError, ApiRequest, Create, Get, Lead, List, Requester};
use reqwest::{Method, StatusCode};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Route the client's tracing output through the test harness.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn test_bearer_token_attached() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/leads/7"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 7,
            "name": "Deal"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AmoClient::new(&mock_server.uri(), "test-token").unwrap();
    let lead = Lead::get(&client, 7, &[]).await.unwrap();

    assert_eq!(lead.id, 7);
    assert_eq!(lead.name.as_deref(), Some("Deal"));
}

#[tokio::test]
async fn test_list_sends_pagination_and_options() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/leads"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "25"))
        .and(query_param("with", "contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "_page": 2,
            "_embedded": {"leads": [{"id": 1}, {"id": 2}]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AmoClient::new(&mock_server.uri(), "test-token").unwrap();
    let leads = Lead::list(&client, 2, 25, &[amocrm::with_contacts()])
        .await
        .unwrap();

    assert_eq!(leads.len(), 2);
}

#[tokio::test]
async fn test_trailing_slash_base_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/leads/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base = format!("{}/", mock_server.uri());
    let client = AmoClient::new(&base, "t").unwrap();
    assert!(Lead::get(&client, 1, &[]).await.is_ok());
}

#[tokio::test]
async fn test_json_body_and_content_type_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/leads"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!([{"name": "Posted"}])))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "_embedded": {"leads": [{"id": 55, "request_id": "0"}]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AmoClient::new(&mock_server.uri(), "t").unwrap();
    let created = Lead::create(&client, &Lead::named("Posted"))
        .await
        .unwrap();
    assert_eq!(created.id, 55);
}

#[tokio::test]
async fn test_error_status_returned_as_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/leads/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = AmoClient::new(&mock_server.uri(), "t").unwrap();
    let url = format!("{}/api/v4/leads/9", mock_server.uri());
    let response = client
        .do_request(ApiRequest::new(Method::GET, url))
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let err = Lead::get(&client, 9, &[]).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_server_error_message_surfaced() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/leads"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "title": "Unauthorized",
            "status": 401,
            "detail": "Invalid access token"
        })))
        .mount(&mock_server)
        .await;

    let client = AmoClient::new(&mock_server.uri(), "bad").unwrap();
    let err = Lead::list(&client, 1, 50, &[]).await.unwrap_err();

    match err {
        AmoError::UnexpectedStatus { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message.as_deref(), Some("Invalid access token"));
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/leads/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": 1}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let client = AmoClient::new(&mock_server.uri(), "t")
        .unwrap()
        .with_timeout(Duration::from_millis(50))
        .unwrap();
    let err = tokio_test::assert_err!(Lead::get(&client, 1, &[]).await);

    match err {
        AmoError::Transport(e) => assert!(e.is_timeout()),
        other => panic!("expected Transport, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/leads/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = AmoClient::new(&mock_server.uri(), "t").unwrap();
    let err = tokio_test::assert_err!(Lead::get(&client, 1, &[]).await);
    assert!(matches!(err, AmoError::Decode(_)));
}
