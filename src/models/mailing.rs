//! Mailing model and trait implementations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::is_zero;
use crate::query::{with_filter_value, QueryOption};
use crate::traits::{Create, Delete, Get, List, Resource, Update};

/// Lifecycle state of a mailing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MailingStatus {
    Draft,
    Scheduled,
    Sending,
    Sent,
    Stopped,
}

impl MailingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Sending => "sending",
            Self::Sent => "sent",
            Self::Stopped => "stopped",
        }
    }
}

/// A mailing sent to one or more segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mailing {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MailingStatus>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub segment_ids: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<u64>,
    #[serde(
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub scheduled_at: Option<DateTime<Utc>>,
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
    pub request_id: Option<String>,
}

impl Resource for Mailing {
    const PATH: &'static str = "mailings";
    const COLLECTION: &'static str = "mailings";
    const NAME: &'static str = "mailing";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Get for Mailing {}
impl List for Mailing {}
impl Create for Mailing {}
impl Update for Mailing {}
impl Delete for Mailing {}

/// Only mailings in `status`.
pub fn with_status(status: MailingStatus) -> QueryOption {
    with_filter_value("status", status.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{QueryKey, QueryParams};

    #[test]
    fn test_status_filter() {
        let mut params = QueryParams::new();
        params.apply(&[with_status(MailingStatus::Scheduled)]);
        assert_eq!(
            params.get(&QueryKey::Filter("status".into())),
            Some("scheduled")
        );
    }

    #[test]
    fn test_status_round_trips_as_snake_case() {
        let mailing: Mailing =
            serde_json::from_str(r#"{"id": 1, "status": "sent", "segment_ids": [4]}"#).unwrap();
        assert_eq!(mailing.status, Some(MailingStatus::Sent));
        assert_eq!(mailing.segment_ids, vec![4]);
    }
}
