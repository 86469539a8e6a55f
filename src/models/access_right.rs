//! Access rights: named permission sets assigned to users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::common::{difference_ids, is_zero, union_ids};
use crate::query::{with_filter_value, QueryOption};
use crate::requester::Requester;
use crate::traits::{Create, Delete, Get, List, Resource, Update};

/// Kind of access right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessRightType {
    /// Applies to a user group.
    Group,
    /// A reusable role.
    Role,
    /// Applies to individual users.
    User,
}

impl AccessRightType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Role => "role",
            Self::User => "user",
        }
    }
}

/// A permission set and the users it is assigned to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessRight {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub right_type: Option<AccessRightType>,
    pub user_ids: Vec<u64>,
    /// Per-entity permission matrix, kept as raw JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rights: Option<serde_json::Value>,
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

impl Resource for AccessRight {
    const PATH: &'static str = "access_rights";
    const COLLECTION: &'static str = "access_rights";
    const NAME: &'static str = "access right";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Get for AccessRight {}
impl List for AccessRight {}
impl Create for AccessRight {}
impl Update for AccessRight {}
impl Delete for AccessRight {}

/// Only access rights of `right_type`.
pub fn with_type(right_type: AccessRightType) -> QueryOption {
    with_filter_value("type", right_type.as_str())
}

/// Assign users to an access right.
///
/// Read-modify-write: fetches the current user list, adds ids not already
/// present, and patches the full list back. Not atomic; a concurrent change
/// between the two calls is lost.
#[tracing::instrument(skip(requester))]
pub async fn add_users(
    requester: &dyn Requester,
    access_right_id: u64,
    user_ids: &[u64],
) -> Result<AccessRight> {
    let mut right = AccessRight::get(requester, access_right_id, &[]).await?;
    right.user_ids = union_ids(&right.user_ids, user_ids);
    AccessRight::update(requester, &right).await
}

/// Unassign users from an access right. Ids not assigned are ignored.
///
/// Same read-modify-write caveat as [`add_users`].
#[tracing::instrument(skip(requester))]
pub async fn remove_users(
    requester: &dyn Requester,
    access_right_id: u64,
    user_ids: &[u64],
) -> Result<AccessRight> {
    let mut right = AccessRight::get(requester, access_right_id, &[]).await?;
    right.user_ids = difference_ids(&right.user_ids, user_ids);
    AccessRight::update(requester, &right).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_right_type_serialize() {
        assert_eq!(
            serde_json::to_string(&AccessRightType::Group).unwrap(),
            "\"group\""
        );
        assert!(matches!(
            serde_json::from_str::<AccessRightType>("\"role\"").unwrap(),
            AccessRightType::Role
        ));
    }

    #[test]
    fn test_access_right_deserialize() {
        let json = r#"{"id": 123, "name": "Managers", "type": "group", "user_ids": [1, 2]}"#;
        let right: AccessRight = serde_json::from_str(json).unwrap();
        assert_eq!(right.id, 123);
        assert_eq!(right.right_type, Some(AccessRightType::Group));
        assert_eq!(right.user_ids, vec![1, 2]);
    }
}
