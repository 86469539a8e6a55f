//! amoCRM entity types and their request builders.

pub mod access_right;
pub mod catalog;
mod common;
mod company;
mod contact;
pub mod file;
pub mod lead;
pub mod link;
pub mod mailing;
pub mod segment;
pub mod source;
pub mod unsorted;
pub mod widget;

pub use access_right::{AccessRight, AccessRightType};
pub use catalog::{Catalog, CatalogElement};
pub use common::{CustomFieldValue, EntityRef, EntityType, FieldValue, Tag};
pub use company::{Company, CompanyEmbedded};
pub use contact::{Contact, ContactEmbedded};
pub use file::EntityFile;
pub use lead::{ComplexLead, ComplexLeadEmbedded, ComplexLeadResult, Lead, LeadEmbedded};
pub use link::EntityLink;
pub use mailing::{Mailing, MailingStatus};
pub use segment::Segment;
pub use source::Source;
pub use unsorted::{UnsortedActionResult, UnsortedCategory, UnsortedItem, UnsortedSummary};
pub use widget::Widget;
