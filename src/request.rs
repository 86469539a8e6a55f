//! Request plumbing shared by every entity operation.
//!
//! Composes `<base>/api/v4/<path>[?query]`, serializes bodies, checks the
//! status code against the operation's accepted set and decodes the body.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::envelope::{decode_list, Envelope};
use crate::error::{AmoError, Result};
use crate::query::QueryParams;
use crate::requester::{ApiRequest, ApiResponse, Requester};

/// API path prefix.
pub const API_PREFIX: &str = "/api/v4/";

/// Accepted statuses for reads and updates.
pub const READ_OK: &[StatusCode] = &[StatusCode::OK];
/// Accepted statuses for creates.
pub const CREATE_OK: &[StatusCode] = &[StatusCode::OK, StatusCode::CREATED];
/// Accepted statuses for deletes.
pub const DELETE_OK: &[StatusCode] = &[StatusCode::OK, StatusCode::NO_CONTENT];

/// Full URL for `path`, with the query string appended when non-empty.
pub fn api_url(base_url: &str, path: &str, query: Option<&QueryParams>) -> String {
    let mut url = format!("{}{}{}", base_url.trim_end_matches('/'), API_PREFIX, path);
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(&query.encode());
    }
    url
}

/// Send `request` and check the status against `accepted`.
pub async fn execute(
    requester: &dyn Requester,
    request: ApiRequest,
    accepted: &[StatusCode],
) -> Result<ApiResponse> {
    tracing::debug!(method = %request.method, url = %request.url, "amoCRM request");
    let response = requester.do_request(request).await?;
    check_status(&response, accepted)?;
    Ok(response)
}

/// Map a status outside `accepted` to [`AmoError::UnexpectedStatus`].
pub fn check_status(response: &ApiResponse, accepted: &[StatusCode]) -> Result<()> {
    if accepted.contains(&response.status) {
        return Ok(());
    }
    Err(AmoError::UnexpectedStatus {
        status: response.status.as_u16(),
        message: error_message(&response.body),
    })
}

/// Pull a human-readable message out of an amoCRM error body.
///
/// amoCRM answers with problem+json (`title`, `detail`); some endpoints use
/// a plain `error` field instead.
fn error_message(body: &[u8]) -> Option<String> {
    let json: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["detail", "title", "error"]
        .iter()
        .find_map(|key| json.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Result<T> {
    Ok(serde_json::from_slice(&response.body)?)
}

/// GET a single bare object.
#[tracing::instrument(skip(requester, query))]
pub async fn get_one<T: DeserializeOwned>(
    requester: &dyn Requester,
    path: &str,
    query: Option<&QueryParams>,
) -> Result<T> {
    let url = api_url(requester.base_url(), path, query);
    let response = execute(requester, ApiRequest::new(Method::GET, url), READ_OK).await?;
    decode(&response)
}

/// GET a collection envelope.
#[tracing::instrument(skip(requester, query))]
pub async fn get_envelope<T: DeserializeOwned>(
    requester: &dyn Requester,
    path: &str,
    collection: &str,
    query: Option<&QueryParams>,
) -> Result<Envelope<T>> {
    let url = api_url(requester.base_url(), path, query);
    let response = execute(requester, ApiRequest::new(Method::GET, url), READ_OK).await?;
    Envelope::decode(&response.body, collection)
}

/// Send a JSON body and decode a bare object.
#[tracing::instrument(skip(requester, body))]
pub async fn send_json<B, T>(
    requester: &dyn Requester,
    method: Method,
    path: &str,
    body: &B,
    accepted: &[StatusCode],
) -> Result<T>
where
    B: Serialize + ?Sized + Sync,
    T: DeserializeOwned,
{
    let url = api_url(requester.base_url(), path, None);
    let request = ApiRequest::new(method, url).json(body)?;
    let response = execute(requester, request, accepted).await?;
    decode(&response)
}

/// Send a JSON body and decode a collection envelope.
#[tracing::instrument(skip(requester, body))]
pub async fn send_json_list<B, T>(
    requester: &dyn Requester,
    method: Method,
    path: &str,
    collection: &str,
    body: &B,
    accepted: &[StatusCode],
) -> Result<Vec<T>>
where
    B: Serialize + ?Sized + Sync,
    T: DeserializeOwned,
{
    let url = api_url(requester.base_url(), path, None);
    let request = ApiRequest::new(method, url).json(body)?;
    let response = execute(requester, request, accepted).await?;
    decode_list(&response.body, collection)
}

/// Send a request whose response body is ignored.
#[tracing::instrument(skip(requester, body))]
pub async fn send_unit<B>(
    requester: &dyn Requester,
    method: Method,
    path: &str,
    body: Option<&B>,
    accepted: &[StatusCode],
) -> Result<()>
where
    B: Serialize + ?Sized + Sync,
{
    let url = api_url(requester.base_url(), path, None);
    let mut request = ApiRequest::new(method, url);
    if let Some(body) = body {
        request = request.json(body)?;
    }
    execute(requester, request, accepted).await?;
    Ok(())
}

/// Reject a zero id before any I/O.
pub fn require_id(id: u64, entity: &str) -> Result<u64> {
    if id == 0 {
        return Err(AmoError::Validation(format!(
            "{entity} id must be set for update"
        )));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{with_contacts, QueryParams};

    #[test]
    fn test_api_url_plain() {
        assert_eq!(
            api_url("https://x.amocrm.ru", "leads/5", None),
            "https://x.amocrm.ru/api/v4/leads/5"
        );
        assert_eq!(
            api_url("https://x.amocrm.ru/", "leads", Some(&QueryParams::new())),
            "https://x.amocrm.ru/api/v4/leads"
        );
    }

    #[test]
    fn test_api_url_with_query() {
        let mut params = QueryParams::paginated(1, 50);
        params.apply(&[with_contacts()]);
        let url = api_url("https://x.amocrm.ru", "leads", Some(&params));
        assert!(url.starts_with("https://x.amocrm.ru/api/v4/leads?"));
        assert!(url.contains("with=contacts"));
    }

    #[test]
    fn test_check_status_accepts_listed() {
        let resp = ApiResponse::new(StatusCode::CREATED, Vec::new());
        assert!(check_status(&resp, CREATE_OK).is_ok());
        assert!(check_status(&resp, READ_OK).is_err());

        let resp = ApiResponse::new(StatusCode::NO_CONTENT, Vec::new());
        assert!(check_status(&resp, DELETE_OK).is_ok());
    }

    #[test]
    fn test_check_status_extracts_message() {
        let resp = ApiResponse::new(
            StatusCode::BAD_REQUEST,
            br#"{"title":"Bad Request","detail":"name is required"}"#.to_vec(),
        );
        match check_status(&resp, READ_OK).unwrap_err() {
            AmoError::UnexpectedStatus { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message.as_deref(), Some("name is required"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_check_status_non_json_body() {
        let resp = ApiResponse::new(StatusCode::BAD_GATEWAY, b"<html>".to_vec());
        let err = check_status(&resp, READ_OK).unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert!(matches!(err, AmoError::UnexpectedStatus { message: None, .. }));
    }

    #[test]
    fn test_require_id() {
        assert!(require_id(0, "lead").is_err());
        assert_eq!(require_id(9, "lead").unwrap(), 9);
    }
}
