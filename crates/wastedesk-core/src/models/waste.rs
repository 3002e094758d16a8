use serde::{Deserialize, Serialize};

use super::{deserialize_id, Resource};

/// A waste item awaiting (or done with) collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteItem {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub collected: bool,
}

impl WasteItem {
    pub fn status(&self) -> &'static str {
        if self.collected {
            "Collected"
        } else {
            "Pending"
        }
    }

    /// Collected items are read-only: no second collection, no deletion.
    pub fn is_actionable(&self) -> bool {
        !self.collected
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewWasteItem {
    pub name: String,
    pub address: String,
}

/// Partial update for `PUT /residuos/:id`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WasteItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collected: Option<bool>,
}

impl WasteItemUpdate {
    pub fn collected() -> Self {
        Self {
            collected: Some(true),
            ..Default::default()
        }
    }
}

impl Resource for WasteItem {
    type Draft = NewWasteItem;
    type Patch = WasteItemUpdate;

    const COLLECTION: &'static str = "residuos";
    const SINGULAR: &'static str = "waste item";
    const PLURAL: &'static str = "waste items";

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collected_update_serializes_single_field() {
        let body = serde_json::to_value(WasteItemUpdate::collected()).unwrap();
        assert_eq!(body, serde_json::json!({ "collected": true }));
    }

    #[test]
    fn test_waste_item_defaults() {
        let item: WasteItem = serde_json::from_str(r#"{"id": 4, "name": "Glass"}"#).unwrap();
        assert_eq!(item.id, "4");
        assert_eq!(item.address, "");
        assert!(!item.collected);
        assert!(item.is_actionable());
        assert_eq!(item.status(), "Pending");
    }

    #[test]
    fn test_collected_item_is_not_actionable() {
        let item: WasteItem =
            serde_json::from_str(r#"{"id": "a1", "name": "Batteries", "address": "Rua A, 10", "collected": true}"#)
                .unwrap();
        assert!(!item.is_actionable());
        assert_eq!(item.status(), "Collected");
    }
}
