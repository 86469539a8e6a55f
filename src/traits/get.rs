//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::error::Result;
use crate::query::{QueryOption, QueryParams};
use crate::request;
use crate::requester::Requester;
use crate::traits::Resource;

/// Fetch a single entity by ID.
///
/// # Example
///
/// ```ignore
/// use amocrm::{AmoClient, Get, Lead, with_contacts};
///
/// let client = AmoClient::from_env()?;
/// let lead = Lead::get(&client, 42, &[with_contacts()]).await?;
/// ```
#[async_trait]
pub trait Get: Resource {
    /// Fetch the entity by ID.
    ///
    /// `options` may add `with` relations or other query keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the status is not 200, the request fails or the
    /// body does not decode.
    async fn get(requester: &dyn Requester, id: u64, options: &[QueryOption]) -> Result<Self> {
        let mut params = QueryParams::new();
        params.apply(options);
        request::get_one(requester, &Self::item_path(id), Some(&params)).await
    }
}
