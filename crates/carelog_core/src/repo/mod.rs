//! Repository layer over the key-value substrate.
//!
//! # Responsibility
//! - Provide load/append/update/remove for every collection key.
//! - Keep key names and JSON encoding out of service and FFI callers.
//!
//! # Invariants
//! - Every mutation rewrites the whole collection; no delta writes.
//! - Every mutation returns the full post-operation collection.
//! - A locator that matches nothing is a no-op, not an error.

pub mod collection_repo;
