//! Update trait for modifying entities.

use async_trait::async_trait;
use reqwest::Method;

use crate::error::Result;
use crate::request::{self, READ_OK};
use crate::requester::Requester;
use crate::traits::Resource;

/// Update existing entities with `PATCH`.
///
/// A zero id is rejected locally; nothing is sent.
///
/// # Example
///
/// ```ignore
/// use amocrm::{AmoClient, Lead, Update};
///
/// let client = AmoClient::from_env()?;
/// let lead = Lead { id: 42, price: Some(1500), ..Default::default() };
/// let updated = Lead::update(&client, &lead).await?;
/// ```
#[async_trait]
pub trait Update: Resource {
    /// Update one entity and return the server's version.
    async fn update(requester: &dyn Requester, item: &Self) -> Result<Self> {
        let id = request::require_id(item.id(), Self::NAME)?;
        request::send_json(requester, Method::PATCH, &Self::item_path(id), item, READ_OK).await
    }

    /// Update several entities in one request.
    async fn update_many(requester: &dyn Requester, items: &[Self]) -> Result<Vec<Self>> {
        for item in items {
            request::require_id(item.id(), Self::NAME)?;
        }
        request::send_json_list(
            requester,
            Method::PATCH,
            Self::PATH,
            Self::COLLECTION,
            items,
            READ_OK,
        )
        .await
    }
}
