//! JSON codec and default-seeding over the key-value substrate.
//!
//! # Responsibility
//! - Decode whole collections and scalar fields from stored strings.
//! - Encode whole collections back as JSON text.
//! - Fall back to caller-supplied defaults when a key was never written.
//!
//! # Invariants
//! - An absent key yields the defaults verbatim and writes nothing.
//! - A present but undecodable value is a [`StoreError::Decode`]; the stored
//!   value is left untouched so no data is silently reset.
//! - Flags are stored as the literal strings `"true"` / `"false"`.

use crate::kv::{KvError, KvStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Literal stored for a `true` flag.
pub const FLAG_TRUE: &str = "true";
/// Literal stored for a `false` flag.
pub const FLAG_FALSE: &str = "false";

/// Failure while loading or persisting journal data.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying storage failed.
    Kv(KvError),
    /// Stored value under `key` is not the expected JSON shape.
    Decode {
        key: String,
        source: serde_json::Error,
    },
    /// In-memory value under `key` could not be serialized.
    Encode {
        key: String,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kv(err) => write!(f, "{err}"),
            Self::Decode { key, source } => {
                write!(f, "stored value for `{key}` is not valid JSON: {source}")
            }
            Self::Encode { key, source } => {
                write!(f, "failed to encode value for `{key}`: {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Kv(err) => Some(err),
            Self::Decode { source, .. } | Self::Encode { source, .. } => Some(source),
        }
    }
}

impl From<KvError> for StoreError {
    fn from(value: KvError) -> Self {
        Self::Kv(value)
    }
}

/// Decodes one stored collection value.
pub fn decode_collection<T: DeserializeOwned>(key: &str, raw: &str) -> StoreResult<Vec<T>> {
    serde_json::from_str(raw).map_err(|source| StoreError::Decode {
        key: key.to_string(),
        source,
    })
}

/// Encodes a whole collection as JSON text.
pub fn encode_collection<T: Serialize>(key: &str, records: &[T]) -> StoreResult<String> {
    serde_json::to_string(records).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })
}

/// Loads a collection, returning `defaults` when the key is absent.
pub fn load_collection<T>(kv: &dyn KvStore, key: &str, defaults: &[T]) -> StoreResult<Vec<T>>
where
    T: DeserializeOwned + Clone,
{
    match kv.get(key)? {
        Some(raw) => decode_collection(key, &raw),
        None => Ok(defaults.to_vec()),
    }
}

/// Replaces the stored collection under `key` with `records`.
pub fn save_collection<T: Serialize>(
    kv: &dyn KvStore,
    key: &str,
    records: &[T],
) -> StoreResult<()> {
    let encoded = encode_collection(key, records)?;
    kv.set(key, &encoded)?;
    Ok(())
}

/// Loads a plain-text scalar, returning `default` when the key is absent.
pub fn load_scalar(kv: &dyn KvStore, key: &str, default: &str) -> StoreResult<String> {
    Ok(kv.get(key)?.unwrap_or_else(|| default.to_string()))
}

/// Encodes a flag as its stored literal.
pub fn encode_flag(value: bool) -> &'static str {
    if value {
        FLAG_TRUE
    } else {
        FLAG_FALSE
    }
}

/// Decodes a stored flag. Only the exact literal `"true"` is `true`.
pub fn decode_flag(raw: &str) -> bool {
    raw == FLAG_TRUE
}
