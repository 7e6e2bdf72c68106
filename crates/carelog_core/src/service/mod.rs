//! Core use-case services.
//!
//! # Responsibility
//! - Expose typed collection and scalar-field entry points to callers.
//! - Keep FFI/screen layers decoupled from key names and encoding.

pub mod journal_service;
pub mod profile_service;
pub mod sample_data;
