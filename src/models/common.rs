//! Shapes shared by several entity kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Entity kinds that own files, links and custom fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Leads,
    Contacts,
    Companies,
    Customers,
    CatalogElements,
}

impl EntityType {
    /// Path segment below `/api/v4/`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Leads => "leads",
            Self::Contacts => "contacts",
            Self::Companies => "companies",
            Self::Customers => "customers",
            Self::CatalogElements => "catalog_elements",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One custom field and its values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomFieldValue {
    pub field_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    pub values: Vec<FieldValue>,
}

/// A single custom field value. `value` is a string, number or bool
/// depending on the field type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldValue {
    pub value: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_code: Option<String>,
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: serde_json::Value::String(value.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A reference to a related entity inside `_embedded`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityRef {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_main: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

pub(crate) fn is_zero(value: &u64) -> bool {
    *value == 0
}

/// `existing` followed by every id of `added` not already present.
pub(crate) fn union_ids(existing: &[u64], added: &[u64]) -> Vec<u64> {
    let mut merged = existing.to_vec();
    for id in added {
        if !merged.contains(id) {
            merged.push(*id);
        }
    }
    merged
}

/// `existing` without any id in `removed`. Absent ids are ignored.
pub(crate) fn difference_ids(existing: &[u64], removed: &[u64]) -> Vec<u64> {
    existing
        .iter()
        .copied()
        .filter(|id| !removed.contains(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_dedupes() {
        assert_eq!(union_ids(&[1, 2], &[2, 3, 3]), vec![1, 2, 3]);
        assert_eq!(union_ids(&[], &[5]), vec![5]);
    }

    #[test]
    fn test_difference_ignores_absent() {
        assert_eq!(difference_ids(&[1, 2, 3], &[2, 9]), vec![1, 3]);
        assert_eq!(difference_ids(&[1], &[9]), vec![1]);
    }

    #[test]
    fn test_entity_type_path() {
        assert_eq!(EntityType::CatalogElements.to_string(), "catalog_elements");
        assert_eq!(
            serde_json::to_string(&EntityType::Leads).unwrap(),
            "\"leads\""
        );
    }
}
