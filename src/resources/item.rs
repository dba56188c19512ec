use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{blank_as_none, Resource};

/// A tracked food/goods record: what it is, where it lives, when it expires,
/// and how much of it there is.
pub struct Item;

#[derive(Debug, Deserialize)]
pub struct ItemDraft {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub storage: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub expiration: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub volume: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ItemPatch {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub storage: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub expiration: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub volume: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub unit: Option<String>,
}

impl Resource for Item {
    const COLLECTION: &'static str = "items";
    const LABEL: &'static str = "item";

    type Draft = ItemDraft;
    type Patch = ItemPatch;

    fn attributes(draft: ItemDraft) -> Result<Map<String, Value>, HashMap<String, String>> {
        let mut field_errors = HashMap::new();
        let mut attrs = Map::new();

        match draft.name {
            Some(name) => {
                attrs.insert("name".to_string(), json!(name));
            }
            None => {
                field_errors.insert("name".to_string(), "is required".to_string());
            }
        }
        match draft.storage {
            Some(storage) => {
                attrs.insert("storage".to_string(), json!(storage));
            }
            None => {
                field_errors.insert("storage".to_string(), "is required".to_string());
            }
        }
        match draft.expiration {
            Some(expiration) => {
                attrs.insert("expiration".to_string(), json!(expiration));
            }
            None => {
                field_errors.insert("expiration".to_string(), "is required".to_string());
            }
        }
        match draft.volume {
            Some(volume) => {
                attrs.insert("volume".to_string(), json!(volume));
            }
            None => {
                field_errors.insert("volume".to_string(), "is required".to_string());
            }
        }
        match draft.unit {
            Some(unit) => {
                attrs.insert("unit".to_string(), json!(unit));
            }
            None => {
                field_errors.insert("unit".to_string(), "is required".to_string());
            }
        }

        if field_errors.is_empty() {
            Ok(attrs)
        } else {
            Err(field_errors)
        }
    }

    fn changes(patch: ItemPatch) -> Result<Map<String, Value>, HashMap<String, String>> {
        let mut fields = Map::new();
        if let Some(name) = patch.name {
            fields.insert("name".to_string(), json!(name));
        }
        if let Some(storage) = patch.storage {
            fields.insert("storage".to_string(), json!(storage));
        }
        if let Some(expiration) = patch.expiration {
            fields.insert("expiration".to_string(), json!(expiration));
        }
        if let Some(volume) = patch.volume {
            fields.insert("volume".to_string(), json!(volume));
        }
        if let Some(unit) = patch.unit {
            fields.insert("unit".to_string(), json!(unit));
        }
        Ok(fields)
    }
}
