//! Catalogs (lists) and their elements.
//!
//! Catalogs are ordinary resources. Elements live below a catalog
//! (`catalogs/<id>/elements`), so they are exposed as functions taking the
//! catalog id rather than through the operation traits.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;
use crate::error::{AmoError, Result};
use crate::models::common::{is_zero, CustomFieldValue};
use crate::query::{QueryOption, QueryParams};
use crate::request::{self, CREATE_OK, DELETE_OK, READ_OK};
use crate::requester::Requester;
use crate::traits::{Create, Get, List, Resource, Update};

/// A catalog (list) definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `regular`, `invoices` or `products`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub catalog_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_add_elements: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_show_in_cards: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_link_multiple: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_be_deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdk_widget_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl Resource for Catalog {
    const PATH: &'static str = "catalogs";
    const COLLECTION: &'static str = "catalogs";
    const NAME: &'static str = "catalog";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Get for Catalog {}
impl List for Catalog {}
impl Create for Catalog {}
impl Update for Catalog {}

/// One element of a catalog (a product, an invoice, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogElement {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
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
    pub custom_fields_values: Option<Vec<CustomFieldValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

const ELEMENTS: &str = "elements";

fn elements_path(catalog_id: u64) -> String {
    format!("catalogs/{catalog_id}/elements")
}

/// One page of elements of a catalog.
#[tracing::instrument(skip(requester, options))]
pub async fn list_elements(
    requester: &dyn Requester,
    catalog_id: u64,
    page: u32,
    limit: u32,
    options: &[QueryOption],
) -> Result<Vec<CatalogElement>> {
    let mut params = QueryParams::paginated(page, limit);
    params.apply(options);
    let envelope: Envelope<CatalogElement> =
        request::get_envelope(requester, &elements_path(catalog_id), ELEMENTS, Some(&params))
            .await?;
    Ok(envelope.items)
}

#[tracing::instrument(skip(requester))]
pub async fn get_element(
    requester: &dyn Requester,
    catalog_id: u64,
    element_id: u64,
) -> Result<CatalogElement> {
    let path = format!("{}/{element_id}", elements_path(catalog_id));
    request::get_one(requester, &path, None).await
}

#[tracing::instrument(skip(requester, elements), fields(count = elements.len()))]
pub async fn create_elements(
    requester: &dyn Requester,
    catalog_id: u64,
    elements: &[CatalogElement],
) -> Result<Vec<CatalogElement>> {
    request::send_json_list(
        requester,
        Method::POST,
        &elements_path(catalog_id),
        ELEMENTS,
        elements,
        CREATE_OK,
    )
    .await
}

/// Create one element.
///
/// # Errors
///
/// [`AmoError::EmptyResult`] if the response contained no elements.
pub async fn create_element(
    requester: &dyn Requester,
    catalog_id: u64,
    element: &CatalogElement,
) -> Result<CatalogElement> {
    create_elements(requester, catalog_id, std::slice::from_ref(element))
        .await?
        .into_iter()
        .next()
        .ok_or(AmoError::EmptyResult("catalog element"))
}

/// Update one element. A zero id fails without sending anything.
#[tracing::instrument(skip(requester, element), fields(id = element.id))]
pub async fn update_element(
    requester: &dyn Requester,
    catalog_id: u64,
    element: &CatalogElement,
) -> Result<CatalogElement> {
    let id = request::require_id(element.id, "catalog element")?;
    let path = format!("{}/{id}", elements_path(catalog_id));
    request::send_json(requester, Method::PATCH, &path, element, READ_OK).await
}

#[derive(Serialize)]
struct IdRef {
    id: u64,
}

/// Delete elements by id (`DELETE catalogs/<id>/elements` with an id list).
#[tracing::instrument(skip(requester))]
pub async fn delete_elements(
    requester: &dyn Requester,
    catalog_id: u64,
    element_ids: &[u64],
) -> Result<()> {
    let body: Vec<IdRef> = element_ids.iter().map(|&id| IdRef { id }).collect();
    request::send_unit(
        requester,
        Method::DELETE,
        &elements_path(catalog_id),
        Some(body.as_slice()),
        DELETE_OK,
    )
    .await
}
