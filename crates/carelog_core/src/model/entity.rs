//! Contracts tying a record type to its collection key, locator and patch.

use crate::model::keys::CollectionKey;
use crate::model::locator::Locate;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record type stored as one element of a collection key.
pub trait CollectionEntity: Clone + Serialize + DeserializeOwned {
    /// Key holding the JSON array of records.
    const KEY: CollectionKey;
    /// The only addressing mode accepted by update/remove.
    type Locator: Locate<Self>;
    /// Partial update accepted by `update_at`.
    type Patch: Patch<Self>;

    /// Fills in an identifier before first persistence when the record has
    /// none. Records without identity keep the default no-op.
    fn ensure_id(&mut self) {}
}

/// Partial update: only fields carried by the patch change.
pub trait Patch<E> {
    fn apply_to(self, record: &mut E);
}
