//! In-memory [`Requester`] for tests.
//!
//! Responses are registered per `(method, path)` and looked up with the
//! query string stripped. Every request is recorded so tests can assert on
//! what was sent.
//!
//! A `MockRequester` belongs to one test case. It is not meant to be shared
//! between tests running concurrently: registrations and the request log
//! are plain last-write-wins state.
//!
//! # Example
//!
//! ```
//! use amocrm::mock::MockRequester;
//! use amocrm::{Get, Lead};
//! use reqwest::Method;
//!
//! # async fn example() -> amocrm::Result<()> {
//! let mock = MockRequester::new();
//! mock.respond_json(Method::GET, "/api/v4/leads/7", 200, &serde_json::json!({"id": 7}));
//!
//! let lead = Lead::get(&mock, 7, &[]).await?;
//! assert_eq!(lead.id, 7);
//! assert_eq!(mock.request_count(), 1);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::Serialize;

use crate::error::Result;
use crate::requester::{ApiRequest, ApiResponse, Requester};

/// Base URL reported by [`MockRequester::base_url`].
pub const MOCK_BASE_URL: &str = "http://mock.amocrm.test";

/// One request as the mock saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    /// Full URL including the query string.
    pub url: String,
    /// Body as UTF-8 text; empty when the request had none.
    pub body: String,
    pub headers: HeaderMap,
}

impl RecordedRequest {
    /// Path component without the query string.
    pub fn path(&self) -> String {
        path_of(&self.url)
    }

    /// Decoded query pairs.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        match url::Url::parse(&self.url) {
            Ok(url) => url.query_pairs().into_owned().collect(),
            Err(_) => Vec::new(),
        }
    }

    /// First value of query parameter `key`.
    pub fn query(&self, key: &str) -> Option<String> {
        self.query_pairs()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Body parsed as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug)]
struct MockState {
    responses: HashMap<(Method, String), ApiResponse>,
    default: ApiResponse,
    requests: Vec<RecordedRequest>,
}

/// A [`Requester`] that serves canned responses.
#[derive(Debug)]
pub struct MockRequester {
    state: Mutex<MockState>,
}

impl Default for MockRequester {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRequester {
    /// A mock whose unregistered routes answer 500.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                responses: HashMap::new(),
                default: ApiResponse::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    br#"{"error":"mock: no response registered"}"#.to_vec(),
                ),
                requests: Vec::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A panicking test poisons the lock; the state is still usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a raw response body for `(method, path)`.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: impl Into<Vec<u8>>) {
        self.respond_with_headers(method, path, status, body, HeaderMap::new());
    }

    /// Register a JSON response for `(method, path)`.
    pub fn respond_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        status: u16,
        body: &T,
    ) {
        let body = serde_json::to_vec(body).unwrap_or_default();
        self.respond(method, path, status, body);
    }

    /// Register a response with headers for `(method, path)`.
    pub fn respond_with_headers(
        &self,
        method: Method,
        path: &str,
        status: u16,
        body: impl Into<Vec<u8>>,
        headers: HeaderMap,
    ) {
        let response = ApiResponse {
            status: to_status(status),
            headers,
            body: body.into(),
        };
        self.state()
            .responses
            .insert((method, path.to_string()), response);
    }

    /// Replace the response served for unregistered routes.
    pub fn set_default(&self, status: u16, body: impl Into<Vec<u8>>) {
        self.state().default = ApiResponse::new(to_status(status), body);
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state().requests.last().cloned()
    }

    /// Every request in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state().requests.len()
    }

    /// Forget recorded requests, keeping registrations.
    pub fn clear_requests(&self) {
        self.state().requests.clear();
    }
}

fn to_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn path_of(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split('?').next().unwrap_or_default().to_string(),
    }
}

#[async_trait]
impl Requester for MockRequester {
    async fn do_request(&self, request: ApiRequest) -> Result<ApiResponse> {
        let body = request
            .body
            .as_deref()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .unwrap_or_default();
        let path = path_of(&request.url);

        let mut state = self.state();
        state.requests.push(RecordedRequest {
            method: request.method.clone(),
            url: request.url,
            body,
            headers: request.headers,
        });

        let response = state
            .responses
            .get(&(request.method, path))
            .unwrap_or(&state.default)
            .clone();
        Ok(response)
    }

    fn base_url(&self) -> &str {
        MOCK_BASE_URL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_registered_response_served() {
        let mock = MockRequester::new();
        mock.respond(Method::GET, "/api/v4/leads", 200, b"{}".to_vec());

        let resp = mock
            .do_request(ApiRequest::new(
                Method::GET,
                format!("{MOCK_BASE_URL}/api/v4/leads?page=1"),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.text(), "{}");
    }

    #[tokio::test]
    async fn test_unregistered_defaults_to_500() {
        let mock = MockRequester::new();
        let resp = mock
            .do_request(ApiRequest::new(Method::GET, format!("{MOCK_BASE_URL}/api/v4/x")))
            .await
            .unwrap();
        assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);

        mock.set_default(404, Vec::new());
        let resp = mock
            .do_request(ApiRequest::new(Method::GET, format!("{MOCK_BASE_URL}/api/v4/x")))
            .await
            .unwrap();
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_method_is_part_of_key() {
        let mock = MockRequester::new();
        mock.respond(Method::PATCH, "/api/v4/leads/1", 200, b"{}".to_vec());
        let resp = mock
            .do_request(ApiRequest::new(Method::GET, format!("{MOCK_BASE_URL}/api/v4/leads/1")))
            .await
            .unwrap();
        assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_records_request() {
        let mock = MockRequester::new();
        let request = ApiRequest::new(
            Method::POST,
            format!("{MOCK_BASE_URL}/api/v4/leads?with=contacts"),
        )
        .json(&serde_json::json!([{"name": "Deal"}]))
        .unwrap();

        mock.do_request(request).await.unwrap();

        let recorded = mock.last_request().unwrap();
        assert_eq!(recorded.method, Method::POST);
        assert_eq!(recorded.path(), "/api/v4/leads");
        assert_eq!(recorded.query("with").as_deref(), Some("contacts"));
        assert_eq!(recorded.json()[0]["name"], "Deal");
        assert_eq!(
            recorded.headers.get("content-type").unwrap(),
            "application/json"
        );
        assert_eq!(mock.request_count(), 1);

        mock.clear_requests();
        assert!(mock.last_request().is_none());
    }
}
