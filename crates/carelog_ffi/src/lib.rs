//! Flutter-facing bindings for the CareLog persistence layer.

pub mod api;
