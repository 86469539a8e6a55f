//! The request/response capability every entity operation depends on.
//!
//! Operations never talk to [`AmoClient`](crate::AmoClient) directly. They
//! build an [`ApiRequest`], hand it to a [`Requester`], and decode the
//! [`ApiResponse`] that comes back. Tests substitute
//! [`MockRequester`](crate::mock::MockRequester).

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::Serialize;

use crate::error::{AmoError, Result};

/// An outbound HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Full URL including the query string.
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// A request with no body and no extra headers.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Serialize `body` as JSON and set `Content-Type: application/json`.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let bytes = serde_json::to_vec(body).map_err(AmoError::Encode)?;
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Some(bytes);
        Ok(self)
    }
}

/// An inbound HTTP response described as plain data.
///
/// The body is fully buffered, so it can be read more than once.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Body as UTF-8 text, lossy.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Issue one HTTP request and receive one response.
///
/// Implemented by [`AmoClient`](crate::AmoClient) for real traffic and by
/// [`MockRequester`](crate::mock::MockRequester) for tests.
#[async_trait]
pub trait Requester: Send + Sync {
    /// Perform the request. Transport failures surface as
    /// [`AmoError::Transport`]; any HTTP status is returned as a response.
    async fn do_request(&self, request: ApiRequest) -> Result<ApiResponse>;

    /// Base URL that resource paths are appended to.
    fn base_url(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_body_sets_content_type() {
        let req = ApiRequest::new(Method::POST, "http://x/api/v4/leads")
            .json(&serde_json::json!([{"name": "a"}]))
            .unwrap();
        assert_eq!(
            req.headers.get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(req.body.as_deref(), Some(br#"[{"name":"a"}]"#.as_slice()));
    }

    #[test]
    fn test_response_text() {
        let resp = ApiResponse::new(StatusCode::OK, b"{}".to_vec());
        assert_eq!(resp.text(), "{}");
    }
}
