//! Links between entities (lead ↔ contact, contact ↔ company, ...).

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;
use crate::error::Result;
use crate::models::common::EntityType;
use crate::request::{self, DELETE_OK, READ_OK};
use crate::requester::Requester;

/// One link from an entity to another.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityLink {
    /// Source entity; filled in by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<EntityType>,
    pub to_entity_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_entity_type: Option<EntityType>,
    /// E.g. `{"is_main": true}` for contacts, `{"quantity": 2}` for
    /// catalog elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl EntityLink {
    pub fn to(entity_type: EntityType, id: u64) -> Self {
        Self {
            to_entity_id: id,
            to_entity_type: Some(entity_type),
            ..Default::default()
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Links of one entity (`GET <entity>/<id>/links`).
#[tracing::instrument(skip(requester))]
pub async fn list_links(
    requester: &dyn Requester,
    entity: EntityType,
    id: u64,
) -> Result<Vec<EntityLink>> {
    let path = format!("{entity}/{id}/links");
    let envelope: Envelope<EntityLink> =
        request::get_envelope(requester, &path, "links", None).await?;
    Ok(envelope.items)
}

/// Link an entity to others (`POST <entity>/<id>/link`).
#[tracing::instrument(skip(requester, links), fields(count = links.len()))]
pub async fn link_entities(
    requester: &dyn Requester,
    entity: EntityType,
    id: u64,
    links: &[EntityLink],
) -> Result<Vec<EntityLink>> {
    let path = format!("{entity}/{id}/link");
    request::send_json_list(requester, Method::POST, &path, "links", links, READ_OK).await
}

/// Remove links (`POST <entity>/<id>/unlink`). amoCRM answers 204.
#[tracing::instrument(skip(requester, links), fields(count = links.len()))]
pub async fn unlink_entities(
    requester: &dyn Requester,
    entity: EntityType,
    id: u64,
    links: &[EntityLink],
) -> Result<()> {
    let path = format!("{entity}/{id}/unlink");
    request::send_unit(requester, Method::POST, &path, Some(links), DELETE_OK).await
}
