//! Record addressing inside a collection.
//!
//! Each collection fixes one locator type through
//! [`crate::CollectionEntity::Locator`], so an index can never be passed where
//! an id is expected (or the reverse).

/// Zero-based position in stored (insertion) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByIndex(pub usize);

/// Stable record identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ById(pub String);

impl ById {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Records that carry a stable identifier.
pub trait Identified {
    fn id(&self) -> &str;
}

/// Resolves a locator to a position in a loaded collection.
pub trait Locate<E> {
    /// Returns the addressed position, or `None` when nothing matches.
    fn position(&self, records: &[E]) -> Option<usize>;
    /// Short label for log lines (`index` or `id`).
    fn mode(&self) -> &'static str;
}

impl<E> Locate<E> for ByIndex {
    fn position(&self, records: &[E]) -> Option<usize> {
        (self.0 < records.len()).then_some(self.0)
    }

    fn mode(&self) -> &'static str {
        "index"
    }
}

impl<E: Identified> Locate<E> for ById {
    fn position(&self, records: &[E]) -> Option<usize> {
        if self.0.is_empty() {
            return None;
        }
        records.iter().position(|record| record.id() == self.0)
    }

    fn mode(&self) -> &'static str {
        "id"
    }
}
