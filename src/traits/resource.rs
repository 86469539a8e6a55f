//! Resource description shared by the operation traits.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// An amoCRM entity addressed by a numeric id under a fixed path.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Path below `/api/v4/` (e.g. `leads`).
    const PATH: &'static str;

    /// Key under `_embedded` holding list results.
    const COLLECTION: &'static str;

    /// Singular name used in error messages.
    const NAME: &'static str;

    /// The entity's id; zero when not yet created.
    fn id(&self) -> u64;

    /// Path of one entity.
    fn item_path(id: u64) -> String {
        format!("{}/{id}", Self::PATH)
    }
}
