//! Lead sources (integrations that feed leads into a pipeline).

use serde::{Deserialize, Serialize};

use crate::models::common::is_zero;
use crate::query::{with_filter_value, QueryOption};
use crate::traits::{Create, Delete, Get, List, Resource, Update};

/// A lead source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_id: Option<u64>,
    /// Identifier in the integration's own system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Whether this is the integration's default source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_code: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl Resource for Source {
    const PATH: &'static str = "sources";
    const COLLECTION: &'static str = "sources";
    const NAME: &'static str = "source";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Get for Source {}
impl List for Source {}
impl Create for Source {}
impl Update for Source {}
impl Delete for Source {}

/// Only the source with this external id.
pub fn with_external_id(external_id: impl Into<String>) -> QueryOption {
    with_filter_value("external_id", external_id)
}
