//! Trait definitions for amoCRM operations.
//!
//! Each entity type implements [`Resource`] to name its path and envelope
//! key, then opts into the operations its endpoint supports. The default
//! method bodies carry the shared request shape; entity modules only
//! override where the API deviates.

mod create;
mod delete;
mod get;
mod list;
mod resource;
mod update;

pub use create::Create;
pub use delete::Delete;
pub use get::Get;
pub use list::List;
pub use resource::Resource;
pub use update::Update;
