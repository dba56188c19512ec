//! Resource kinds and their payload shapes.
//!
//! Each kind declares a typed draft (create payload) and a typed patch
//! (partial-update payload) with named optional fields. Merging iterates
//! only over declared fields, so clients cannot inject arbitrary keys, and
//! none of the payload types carry an `owner` field: ownership is assigned
//! by the protocol from the authenticated identity.

pub mod item;
pub mod pantry;

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

pub use item::Item;
pub use pantry::Pantry;

/// Every collection the store must be able to hold.
pub const ALL_COLLECTIONS: &[&str] = &["items", "pantries", "users"];

/// A resource kind: its collection, its envelope label, and its payload types.
pub trait Resource: Send + Sync + 'static {
    /// Store collection and plural envelope key, e.g. `items`
    const COLLECTION: &'static str;
    /// Singular envelope key, e.g. `item`
    const LABEL: &'static str;

    type Draft: DeserializeOwned + Send;
    type Patch: DeserializeOwned + Send;

    /// Validate a draft and produce the attribute object to store.
    /// Failures list every violated field.
    fn attributes(draft: Self::Draft) -> Result<Map<String, Value>, HashMap<String, String>>;

    /// Produce the fields a patch actually changes. Omitted fields and
    /// fields sent as empty strings request no change and are absent from
    /// the result.
    fn changes(patch: Self::Patch) -> Result<Map<String, Value>, HashMap<String, String>>;
}

/// Deserialize a field that clients may blank out: `""` and `null` both
/// mean "no value here", so a full form can be submitted with unchanged
/// fields left blank without erasing stored data.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(other) => T::deserialize(other).map(Some).map_err(serde::de::Error::custom),
    }
}
