//! Unsorted inbox: incoming requests waiting to be accepted as leads.
//!
//! Items are addressed by a string `uid`. Accepting one creates the lead
//! and contacts it carries; declining discards it; linking attaches it to
//! an existing lead.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;
use crate::error::{AmoError, Result};
use crate::models::common::EntityType;
use crate::models::company::Company;
use crate::models::contact::Contact;
use crate::models::lead::Lead;
use crate::query::{with_filter_value, QueryOption, QueryParams};
use crate::request::{self, CREATE_OK, READ_OK};
use crate::requester::Requester;

const PATH: &str = "leads/unsorted";
const COLLECTION: &str = "unsorted";

/// Channel an unsorted item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsortedCategory {
    Sip,
    Forms,
    Chats,
    Mail,
}

impl UnsortedCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sip => "sip",
            Self::Forms => "forms",
            Self::Chats => "chats",
            Self::Mail => "mail",
        }
    }
}

/// One unsorted item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnsortedItem {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<UnsortedCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_id: Option<u64>,
    #[serde(
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Category-specific details (form fields, call info, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<UnsortedEmbedded>,
}

/// Entities an unsorted item would create when accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnsortedEmbedded {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub leads: Vec<Lead>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contacts: Vec<Contact>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub companies: Vec<Company>,
}

/// Outcome of accept, decline or link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnsortedActionResult {
    pub uid: String,
    pub lead_ids: Vec<u64>,
    pub contact_ids: Vec<u64>,
    pub company_ids: Vec<u64>,
}

impl UnsortedActionResult {
    /// The lead created or linked, if any.
    pub fn lead_id(&self) -> Option<u64> {
        self.lead_ids.first().copied()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawActionResult {
    uid: String,
    #[serde(rename = "_embedded")]
    embedded: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IdOnly {
    id: u64,
}

impl TryFrom<RawActionResult> for UnsortedActionResult {
    type Error = AmoError;

    /// A missing entity key is an empty id list; a present but malformed
    /// one is a decode error.
    fn try_from(mut raw: RawActionResult) -> Result<Self> {
        let mut ids = |key: EntityType| -> Result<Vec<u64>> {
            let refs: Vec<IdOnly> = match raw.embedded.remove(key.as_str()) {
                Some(serde_json::Value::Null) | None => Vec::new(),
                Some(value) => serde_json::from_value(value)?,
            };
            Ok(refs.into_iter().map(|e| e.id).collect())
        };
        let lead_ids = ids(EntityType::Leads)?;
        let contact_ids = ids(EntityType::Contacts)?;
        let company_ids = ids(EntityType::Companies)?;
        Ok(Self {
            uid: raw.uid,
            lead_ids,
            contact_ids,
            company_ids,
        })
    }
}

/// Counters for the unsorted inbox.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UnsortedSummary {
    pub total: u64,
    pub accepted: u64,
    pub declined: u64,
    /// Average seconds between arrival and sorting.
    pub average_sort_time: Option<u64>,
    pub categories: HashMap<String, u64>,
}

fn item_path(uid: &str) -> String {
    format!("{PATH}/{}", urlencoding::encode(uid))
}

/// Only items from `category`.
pub fn with_category(category: UnsortedCategory) -> QueryOption {
    with_filter_value("category", category.as_str())
}

/// One page of unsorted items.
#[tracing::instrument(skip(requester, options))]
pub async fn list(
    requester: &dyn Requester,
    page: u32,
    limit: u32,
    options: &[QueryOption],
) -> Result<Vec<UnsortedItem>> {
    let mut params = QueryParams::paginated(page, limit);
    params.apply(options);
    let envelope: Envelope<UnsortedItem> =
        request::get_envelope(requester, PATH, COLLECTION, Some(&params)).await?;
    Ok(envelope.items)
}

#[tracing::instrument(skip(requester))]
pub async fn get(requester: &dyn Requester, uid: &str) -> Result<UnsortedItem> {
    request::get_one(requester, &item_path(uid), None).await
}

/// Create items in `category` (`POST leads/unsorted/<category>`).
///
/// Only `sip` and `forms` accept direct creation.
#[tracing::instrument(skip(requester, items), fields(count = items.len()))]
pub async fn create(
    requester: &dyn Requester,
    category: UnsortedCategory,
    items: &[UnsortedItem],
) -> Result<Vec<UnsortedItem>> {
    if !matches!(category, UnsortedCategory::Sip | UnsortedCategory::Forms) {
        return Err(AmoError::Validation(format!(
            "unsorted items of category {} cannot be created",
            category.as_str()
        )));
    }
    let path = format!("{PATH}/{}", category.as_str());
    request::send_json_list(requester, Method::POST, &path, COLLECTION, items, CREATE_OK).await
}

/// Create form submissions.
pub async fn create_forms(
    requester: &dyn Requester,
    items: &[UnsortedItem],
) -> Result<Vec<UnsortedItem>> {
    create(requester, UnsortedCategory::Forms, items).await
}

/// Create call records.
pub async fn create_sip(
    requester: &dyn Requester,
    items: &[UnsortedItem],
) -> Result<Vec<UnsortedItem>> {
    create(requester, UnsortedCategory::Sip, items).await
}

#[derive(Debug, Serialize)]
struct AcceptBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_id: Option<u64>,
}

async fn action<B: Serialize + Sync>(
    requester: &dyn Requester,
    uid: &str,
    verb: &str,
    body: &B,
) -> Result<UnsortedActionResult> {
    let path = format!("{}/{verb}", item_path(uid));
    let raw: RawActionResult =
        request::send_json(requester, Method::POST, &path, body, READ_OK).await?;
    raw.try_into()
}

/// Accept an item, creating its lead (in `status_id` when given) and
/// contacts on behalf of `user_id`.
#[tracing::instrument(skip(requester))]
pub async fn accept(
    requester: &dyn Requester,
    uid: &str,
    user_id: Option<u64>,
    status_id: Option<u64>,
) -> Result<UnsortedActionResult> {
    action(requester, uid, "accept", &AcceptBody { user_id, status_id }).await
}

/// Decline an item.
#[tracing::instrument(skip(requester))]
pub async fn decline(
    requester: &dyn Requester,
    uid: &str,
    user_id: Option<u64>,
) -> Result<UnsortedActionResult> {
    let body = AcceptBody {
        user_id,
        status_id: None,
    };
    action(requester, uid, "decline", &body).await
}

#[derive(Debug, Serialize)]
struct LinkBody {
    link: LinkTarget,
}

#[derive(Debug, Serialize)]
struct LinkTarget {
    entity_id: u64,
    entity_type: EntityType,
}

/// Attach an item to an existing lead instead of creating a new one.
#[tracing::instrument(skip(requester))]
pub async fn link(
    requester: &dyn Requester,
    uid: &str,
    lead_id: u64,
) -> Result<UnsortedActionResult> {
    let body = LinkBody {
        link: LinkTarget {
            entity_id: lead_id,
            entity_type: EntityType::Leads,
        },
    };
    action(requester, uid, "link", &body).await
}

/// Inbox counters (`GET leads/unsorted/summary`).
#[tracing::instrument(skip(requester, options))]
pub async fn summary(requester: &dyn Requester, options: &[QueryOption]) -> Result<UnsortedSummary> {
    let mut params = QueryParams::new();
    params.apply(options);
    request::get_one(requester, &format!("{PATH}/summary"), Some(&params)).await
}
