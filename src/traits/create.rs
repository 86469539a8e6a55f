//! Create trait for adding entities.

use async_trait::async_trait;
use reqwest::Method;

use crate::error::{AmoError, Result};
use crate::request::{self, CREATE_OK};
use crate::requester::Requester;
use crate::traits::Resource;

/// Create entities.
///
/// amoCRM creates in bulk: the body is a JSON array and the response is an
/// `_embedded` envelope of the created items (usually only `id` and
/// `request_id` are filled in). Both 200 and 201 count as success.
#[async_trait]
pub trait Create: Resource {
    /// Create every item in one request.
    async fn create_many(requester: &dyn Requester, items: &[Self]) -> Result<Vec<Self>> {
        request::send_json_list(
            requester,
            Method::POST,
            Self::PATH,
            Self::COLLECTION,
            items,
            CREATE_OK,
        )
        .await
    }

    /// Create one item and return what the server echoed for it.
    ///
    /// # Errors
    ///
    /// [`AmoError::EmptyResult`] if the response contained no items.
    async fn create(requester: &dyn Requester, item: &Self) -> Result<Self> {
        Self::create_many(requester, std::slice::from_ref(item))
            .await?
            .into_iter()
            .next()
            .ok_or(AmoError::EmptyResult(Self::NAME))
    }
}
