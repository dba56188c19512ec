use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use super::{blank_as_none, Resource};

/// A user's pantry: a list of item references with quantities.
pub struct Pantry;

#[derive(Debug, Deserialize)]
pub struct EntryDraft {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub item: Option<Uuid>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub quantity: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PantryDraft {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub items: Option<Vec<EntryDraft>>,
}

/// A patch replaces the entry list wholesale; entries are not addressable
/// individually.
#[derive(Debug, Deserialize)]
pub struct PantryPatch {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub items: Option<Vec<EntryDraft>>,
}

impl Resource for Pantry {
    const COLLECTION: &'static str = "pantries";
    const LABEL: &'static str = "pantry";

    type Draft = PantryDraft;
    type Patch = PantryPatch;

    fn attributes(draft: PantryDraft) -> Result<Map<String, Value>, HashMap<String, String>> {
        let entries = entries_to_value(draft.items.unwrap_or_default())?;

        let mut attrs = Map::new();
        attrs.insert("items".to_string(), entries);
        Ok(attrs)
    }

    fn changes(patch: PantryPatch) -> Result<Map<String, Value>, HashMap<String, String>> {
        let mut fields = Map::new();
        if let Some(items) = patch.items {
            fields.insert("items".to_string(), entries_to_value(items)?);
        }
        Ok(fields)
    }
}

fn entries_to_value(entries: Vec<EntryDraft>) -> Result<Value, HashMap<String, String>> {
    let mut field_errors = HashMap::new();
    let mut values = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        let item = match entry.item {
            Some(item) => Some(item),
            None => {
                field_errors.insert(format!("items[{}].item", index), "is required".to_string());
                None
            }
        };
        let quantity = match entry.quantity {
            Some(quantity) => Some(quantity),
            None => {
                field_errors
                    .insert(format!("items[{}].quantity", index), "is required".to_string());
                None
            }
        };

        if let (Some(item), Some(quantity)) = (item, quantity) {
            values.push(json!({ "item": item, "quantity": quantity }));
        }
    }

    if field_errors.is_empty() {
        Ok(Value::Array(values))
    } else {
        Err(field_errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn draft_defaults_to_empty_entry_list() {
        let draft: PantryDraft = serde_json::from_value(json!({})).unwrap();
        let attrs = Pantry::attributes(draft).unwrap();
        assert_eq!(attrs["items"], json!([]));
    }

    #[test]
    fn entries_keep_item_and_quantity() {
        let id = Uuid::new_v4();
        let draft: PantryDraft = serde_json::from_value(json!({
            "items": [{ "item": id, "quantity": 3 }]
        }))
        .unwrap();

        let attrs = Pantry::attributes(draft).unwrap();
        assert_eq!(attrs["items"], json!([{ "item": id, "quantity": 3 }]));
    }

    #[test]
    fn incomplete_entries_are_reported_by_position() {
        let draft: PantryDraft = serde_json::from_value(json!({
            "items": [
                { "item": Uuid::new_v4(), "quantity": 1 },
                { "quantity": 2 },
                { "item": Uuid::new_v4() }
            ]
        }))
        .unwrap();

        let errors = Pantry::attributes(draft).unwrap_err();
        assert!(errors.contains_key("items[1].item"));
        assert!(errors.contains_key("items[2].quantity"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn patch_without_items_changes_nothing() {
        let patch: PantryPatch = serde_json::from_value(json!({})).unwrap();
        let fields = Pantry::changes(patch).unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn patch_replaces_entry_list() {
        let id = Uuid::new_v4();
        let patch: PantryPatch = serde_json::from_value(json!({
            "items": [{ "item": id, "quantity": 5 }]
        }))
        .unwrap();

        let fields = Pantry::changes(patch).unwrap();
        assert_eq!(fields["items"], json!([{ "item": id, "quantity": 5 }]));
    }
}
