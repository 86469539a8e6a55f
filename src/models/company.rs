//! Company model and trait implementations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::{is_zero, CustomFieldValue, EntityRef, Tag};
use crate::traits::{Create, Get, List, Resource, Update};

/// An amoCRM company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

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

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields_values: Option<Vec<CustomFieldValue>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<CompanyEmbedded>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyEmbedded {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contacts: Vec<EntityRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub leads: Vec<EntityRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub customers: Vec<EntityRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub catalog_elements: Vec<EntityRef>,
}

impl Company {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

impl Resource for Company {
    const PATH: &'static str = "companies";
    const COLLECTION: &'static str = "companies";
    const NAME: &'static str = "company";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Get for Company {}
impl List for Company {}
impl Create for Company {}
impl Update for Company {}
