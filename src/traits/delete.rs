//! Delete trait for removing entities.

use async_trait::async_trait;
use reqwest::Method;

use crate::error::Result;
use crate::request::{self, DELETE_OK};
use crate::requester::Requester;
use crate::traits::Resource;

/// Delete an entity by ID. Both 200 and 204 count as success.
#[async_trait]
pub trait Delete: Resource {
    async fn delete(requester: &dyn Requester, id: u64) -> Result<()> {
        request::send_unit::<()>(requester, Method::DELETE, &Self::item_path(id), None, DELETE_OK)
            .await
    }
}
