//! Files attached to entities.
//!
//! Uploading bytes goes through the separate drive service; these calls
//! only manage which already-uploaded files (by UUID) are attached to a
//! lead, contact, company or customer.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;
use crate::error::Result;
use crate::models::common::EntityType;
use crate::query::QueryParams;
use crate::request::{self, DELETE_OK, READ_OK};
use crate::requester::Requester;

/// A file attached to an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityFile {
    pub file_uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

const FILES: &str = "files";

fn files_path(entity: EntityType, entity_id: u64) -> String {
    format!("{entity}/{entity_id}/files")
}

/// One page of files attached to an entity.
#[tracing::instrument(skip(requester))]
pub async fn list_entity_files(
    requester: &dyn Requester,
    entity: EntityType,
    entity_id: u64,
    page: u32,
    limit: u32,
) -> Result<Vec<EntityFile>> {
    let params = QueryParams::paginated(page, limit);
    let envelope: Envelope<EntityFile> =
        request::get_envelope(requester, &files_path(entity, entity_id), FILES, Some(&params))
            .await?;
    Ok(envelope.items)
}

/// Attach uploaded files by UUID (`PUT <entity>/<id>/files`).
#[tracing::instrument(skip(requester))]
pub async fn attach_files(
    requester: &dyn Requester,
    entity: EntityType,
    entity_id: u64,
    file_uuids: &[&str],
) -> Result<Vec<EntityFile>> {
    let body: Vec<EntityFile> = file_uuids
        .iter()
        .map(|uuid| EntityFile {
            file_uuid: (*uuid).to_string(),
            id: None,
        })
        .collect();
    request::send_json_list(
        requester,
        Method::PUT,
        &files_path(entity, entity_id),
        FILES,
        body.as_slice(),
        READ_OK,
    )
    .await
}

/// Detach one file.
#[tracing::instrument(skip(requester))]
pub async fn detach_file(
    requester: &dyn Requester,
    entity: EntityType,
    entity_id: u64,
    file_uuid: &str,
) -> Result<()> {
    let path = format!(
        "{}/{}",
        files_path(entity, entity_id),
        urlencoding::encode(file_uuid)
    );
    request::send_unit::<()>(requester, Method::DELETE, &path, None, DELETE_OK).await
}
