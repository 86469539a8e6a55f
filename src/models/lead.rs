//! Lead (deal) model and trait implementations.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::common::{is_zero, CustomFieldValue, EntityRef, Tag};
use crate::models::company::Company;
use crate::models::contact::Contact;
use crate::request::{self, CREATE_OK};
use crate::requester::Requester;
use crate::traits::{Create, Get, List, Resource, Update};

/// An amoCRM lead, shown as a deal in the UI.
///
/// Every field except `id` is optional so the same type serves as a full
/// entity, a create payload and a sparse update payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lead {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Budget in the account currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_user_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u64>,

    /// Pipeline stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub loss_reason_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<u64>,

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
    pub closed_at: Option<DateTime<Utc>>,

    #[serde(
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub closest_task_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields_values: Option<Vec<CustomFieldValue>>,

    /// Echoed back by create calls to correlate results with the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<LeadEmbedded>,
}

/// Related entities returned with `with=` or sent on create.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadEmbedded {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contacts: Vec<EntityRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub companies: Vec<EntityRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub catalog_elements: Vec<EntityRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loss_reason: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<serde_json::Value>,
}

impl Lead {
    /// A lead with just a name, ready to create.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Ids of embedded contacts (present when fetched `with=contacts`).
    pub fn contact_ids(&self) -> Vec<u64> {
        self.embedded
            .as_ref()
            .map(|e| e.contacts.iter().map(|c| c.id).collect())
            .unwrap_or_default()
    }

    /// Ids of embedded companies.
    pub fn company_ids(&self) -> Vec<u64> {
        self.embedded
            .as_ref()
            .map(|e| e.companies.iter().map(|c| c.id).collect())
            .unwrap_or_default()
    }
}

impl Resource for Lead {
    const PATH: &'static str = "leads";
    const COLLECTION: &'static str = "leads";
    const NAME: &'static str = "lead";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Get for Lead {}
impl List for Lead {}
impl Create for Lead {}
impl Update for Lead {}

/// A lead created together with its contact and company in one call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComplexLead {
    #[serde(flatten)]
    pub lead: Lead,
    #[serde(rename = "_embedded")]
    pub embedded: ComplexLeadEmbedded,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ComplexLeadEmbedded {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contacts: Vec<Contact>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub companies: Vec<Company>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

/// Ids assigned by a complex create.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ComplexLeadResult {
    pub id: u64,
    pub contact_id: Option<u64>,
    pub company_id: Option<u64>,
    pub request_id: Vec<String>,
    /// Whether the contact or company was merged into an existing one.
    pub merged: bool,
}

/// Create leads with embedded contacts and companies (`POST leads/complex`).
///
/// The response is a bare array, not an envelope.
#[tracing::instrument(skip(requester, leads), fields(count = leads.len()))]
pub async fn create_complex(
    requester: &dyn Requester,
    leads: &[ComplexLead],
) -> Result<Vec<ComplexLeadResult>> {
    request::send_json(requester, Method::POST, "leads/complex", leads, CREATE_OK).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_deserialize() {
        let json = r#"{
            "id": 19619,
            "name": "Deal for product",
            "price": 46333,
            "responsible_user_id": 123321,
            "status_id": 142,
            "pipeline_id": 1300,
            "created_at": 1548280113,
            "is_deleted": false,
            "custom_fields_values": [
                {"field_id": 3, "field_name": "Phone", "values": [{"value": "+7999", "enum_code": "WORK"}]}
            ],
            "_embedded": {
                "tags": [{"id": 1, "name": "vip"}],
                "contacts": [{"id": 5, "is_main": true}],
                "companies": [{"id": 9}]
            }
        }"#;

        let lead: Lead = serde_json::from_str(json).expect("Failed to deserialize lead");

        assert_eq!(lead.id, 19619);
        assert_eq!(lead.name.as_deref(), Some("Deal for product"));
        assert_eq!(lead.price, Some(46333));
        assert_eq!(lead.created_at.unwrap().timestamp(), 1548280113);
        assert_eq!(lead.custom_fields_values.as_ref().unwrap()[0].field_id, 3);
        assert_eq!(lead.contact_ids(), vec![5]);
        assert_eq!(lead.company_ids(), vec![9]);
    }

    #[test]
    fn test_partial_create_response_deserializes() {
        let lead: Lead =
            serde_json::from_str(r#"{"id": 10, "request_id": "0", "_links": {}}"#).unwrap();
        assert_eq!(lead.id, 10);
        assert!(lead.name.is_none());
    }

    #[test]
    fn test_create_payload_omits_unset_fields() {
        let lead = Lead {
            price: Some(100),
            ..Lead::named("New deal")
        };
        let json = serde_json::to_value(&lead).unwrap();
        assert_eq!(json, serde_json::json!({"name": "New deal", "price": 100}));
    }

    #[test]
    fn test_complex_lead_serialize() {
        let lead = ComplexLead {
            lead: Lead::named("Complex"),
            embedded: ComplexLeadEmbedded {
                contacts: vec![Contact {
                    first_name: Some("Ivan".to_string()),
                    ..Default::default()
                }],
                ..Default::default()
            },
        };
        let json = serde_json::to_value(&lead).unwrap();
        assert_eq!(json["name"], "Complex");
        assert_eq!(json["_embedded"]["contacts"][0]["first_name"], "Ivan");
        assert!(json["_embedded"].get("companies").is_none());
    }
}
