//! Segment model and trait implementations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::common::{difference_ids, is_zero, union_ids};
use crate::requester::Requester;
use crate::traits::{Create, Delete, Get, List, Resource, Update};

/// A named group of contacts used as a mailing audience.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Segment {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub contact_ids: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customers_count: Option<u64>,
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

impl Resource for Segment {
    const PATH: &'static str = "segments";
    const COLLECTION: &'static str = "segments";
    const NAME: &'static str = "segment";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Get for Segment {}
impl List for Segment {}
impl Create for Segment {}
impl Update for Segment {}
impl Delete for Segment {}

/// Add contacts to a segment.
///
/// Fetches the segment, appends ids it does not already hold, and writes
/// the whole membership back. The two calls are not atomic: a concurrent
/// writer between them is overwritten.
#[tracing::instrument(skip(requester))]
pub async fn add_contacts(
    requester: &dyn Requester,
    segment_id: u64,
    contact_ids: &[u64],
) -> Result<Segment> {
    let mut segment = Segment::get(requester, segment_id, &[]).await?;
    segment.contact_ids = union_ids(&segment.contact_ids, contact_ids);
    Segment::update(requester, &segment).await
}

/// Remove contacts from a segment. Ids not in the segment are ignored.
///
/// Same read-modify-write caveat as [`add_contacts`].
#[tracing::instrument(skip(requester))]
pub async fn remove_contacts(
    requester: &dyn Requester,
    segment_id: u64,
    contact_ids: &[u64],
) -> Result<Segment> {
    let mut segment = Segment::get(requester, segment_id, &[]).await?;
    segment.contact_ids = difference_ids(&segment.contact_ids, contact_ids);
    Segment::update(requester, &segment).await
}
