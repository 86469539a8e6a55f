//! Contact model and trait implementations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::{is_zero, CustomFieldValue, EntityRef, Tag};
use crate::traits::{Create, Get, List, Resource, Update};

/// An amoCRM contact (a person).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: u64,

    /// Full name. amoCRM derives it from first and last name when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_user_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<u64>,

    #[serde(
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub closest_task_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_unsorted: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields_values: Option<Vec<CustomFieldValue>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<ContactEmbedded>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactEmbedded {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub companies: Vec<EntityRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub leads: Vec<EntityRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub customers: Vec<EntityRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub catalog_elements: Vec<EntityRef>,
}

impl Contact {
    /// Ids of embedded leads (present when fetched `with=leads`).
    pub fn lead_ids(&self) -> Vec<u64> {
        self.embedded
            .as_ref()
            .map(|e| e.leads.iter().map(|l| l.id).collect())
            .unwrap_or_default()
    }
}

impl Resource for Contact {
    const PATH: &'static str = "contacts";
    const COLLECTION: &'static str = "contacts";
    const NAME: &'static str = "contact";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Get for Contact {}
impl List for Contact {}
impl Create for Contact {}
impl Update for Contact {}
