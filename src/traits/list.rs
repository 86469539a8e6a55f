//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::envelope::Envelope;
use crate::error::Result;
use crate::pagination::{Page, MAX_PAGE_SIZE};
use crate::query::{QueryOption, QueryParams};
use crate::request;
use crate::requester::Requester;
use crate::traits::Resource;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// List entities with pagination support.
///
/// `page` and `limit` are always sent; options run afterwards and may
/// override them.
///
/// # Example
///
/// ```ignore
/// use amocrm::{AmoClient, Contact, List, with_leads};
///
/// let client = AmoClient::from_env()?;
///
/// // Fetch a single page
/// let contacts = Contact::list(&client, 1, 50, &[with_leads()]).await?;
///
/// // Fetch all pages
/// let all = Contact::list_all(&client, &[]).await?;
/// ```
#[async_trait]
pub trait List: Resource {
    /// One page of entities.
    ///
    /// # Errors
    ///
    /// Returns an error if the status is not 200, the request fails or the
    /// body does not decode. A body without `_embedded` is an empty list.
    async fn list(
        requester: &dyn Requester,
        page: u32,
        limit: u32,
        options: &[QueryOption],
    ) -> Result<Vec<Self>> {
        Ok(Self::list_page(requester, page, limit, options).await?.items)
    }

    /// One page of entities with pagination metadata.
    async fn list_page(
        requester: &dyn Requester,
        page: u32,
        limit: u32,
        options: &[QueryOption],
    ) -> Result<Page<Self>> {
        let mut params = QueryParams::paginated(page, limit);
        params.apply(options);
        let envelope: Envelope<Self> =
            request::get_envelope(requester, Self::PATH, Self::COLLECTION, Some(&params)).await?;
        Ok(envelope.into_page(page, limit))
    }

    /// Every entity matching `options`, fetching pages until exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(requester: &dyn Requester, options: &[QueryOption]) -> Result<Vec<Self>> {
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            let result = Self::list_page(requester, page, MAX_PAGE_SIZE, options).await?;
            let has_more = result.has_more && !result.is_empty();
            all_items.extend(result.items);

            if !has_more {
                break;
            }
            page += 1;

            if page > MAX_PAGES {
                tracing::warn!(
                    resource = Self::PATH,
                    "Reached pagination limit of {} pages, stopping",
                    MAX_PAGES
                );
                break;
            }
        }

        Ok(all_items)
    }
}
