//! amoCRM API client library.
//!
//! A Rust library for the amoCRM REST API (v4) using a trait-based
//! architecture where each operation (Get, List, Create, Update, Delete)
//! is a trait that entity types opt into.
//!
//! # Quick Start
//!
//! ```no_run
//! use amocrm::{with_companies, with_contacts, AmoClient, Create, Get, Lead, List};
//!
//! #[tokio::main]
//! async fn main() -> amocrm::Result<()> {
//!     // Create client from environment variables
//!     let client = AmoClient::from_env()?;
//!
//!     // Get a lead with its contacts and companies embedded
//!     let lead = Lead::get(&client, 42, &[with_contacts(), with_companies()]).await?;
//!     println!("Lead: {:?}, contacts {:?}", lead.name, lead.contact_ids());
//!
//!     // List the first page of leads
//!     let leads = Lead::list(&client, 1, 50, &[]).await?;
//!     println!("Found {} leads", leads.len());
//!
//!     // Create a lead
//!     let created = Lead::create(&client, &Lead::named("New deal")).await?;
//!     println!("Created lead {}", created.id);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Every operation takes a `&dyn` [`Requester`] rather than the concrete
//! [`AmoClient`], so tests can pass a [`mock::MockRequester`] instead.
//!
//! - [`Get`] - Fetch a single entity by ID
//! - [`List`] - Fetch paginated collections from the `_embedded` envelope
//! - [`Create`] - Bulk create, with a single-item convenience
//! - [`Update`] - `PATCH` by ID; a zero ID fails before any request
//! - [`Delete`] - Remove by ID
//!
//! Entities whose endpoints do not fit that shape (widgets, unsorted
//! items, catalog elements, files, links) expose module-level functions.
//!
//! Optional query parameters are passed as [`QueryOption`] values built by
//! functions such as [`with_contacts`], [`with_filter`] or
//! [`access_right::with_type`].
//!
//! # Configuration
//!
//! [`AmoClient::from_env`] reads:
//!
//! - `AMOCRM_BASE_URL` - Account URL, e.g. `https://example.amocrm.ru`
//! - `AMOCRM_API_KEY` - Long-lived access token

mod client;
pub mod envelope;
mod error;
pub mod mock;
mod models;
mod pagination;
pub mod query;
pub mod request;
mod requester;
mod traits;

// Re-export core types
pub use client::{AmoClient, DEFAULT_TIMEOUT};
pub use error::{AmoError, Result};
pub use pagination::{Page, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use requester::{ApiRequest, ApiResponse, Requester};

// Re-export traits
pub use traits::{Create, Delete, Get, List, Resource, Update};

// Re-export query options
pub use query::{
    with_catalog_elements, with_companies, with_contacts, with_customers, with_filter,
    with_filter_value, with_leads, with_limit, with_loss_reason, with_only_deleted, with_order,
    with_page, with_query, with_relation, with_source_id, QueryKey, QueryOption, QueryParams,
    Relation, SortOrder,
};

// Re-export models
pub use models::{
    access_right, catalog, file, lead, link, mailing, segment, source, unsorted, widget,
};
pub use models::{
    AccessRight, AccessRightType, Catalog, CatalogElement, Company, CompanyEmbedded,
    ComplexLead, ComplexLeadEmbedded, ComplexLeadResult, Contact, ContactEmbedded,
    CustomFieldValue, EntityFile, EntityLink, EntityRef, EntityType, FieldValue, Lead,
    LeadEmbedded, Mailing, MailingStatus, Segment, Source, Tag, UnsortedActionResult,
    UnsortedCategory, UnsortedItem, UnsortedSummary, Widget,
};
