//! Restaurant catalog: the raw records the index is built from.
//!
//! Records come from an external ingestion pipeline as one combined JSON
//! array and are read-only here. Source data is messy — every scalar field
//! is optional and numeric fields sometimes arrive as strings — so the
//! accessors normalize everything to text and fall back to `"Unknown"`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::core::errors::ApiError;

/// Placeholder rendered for any absent field.
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestaurantRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "stringish")]
    pub rating: Option<String>,
    #[serde(default, deserialize_with = "stringish")]
    pub cost_for_two: Option<String>,
    #[serde(default)]
    pub cuisines: Vec<String>,
    /// Day → opening-interval text. A `BTreeMap` keeps the rendered hours
    /// block deterministic regardless of source JSON key order.
    #[serde(default)]
    pub operational_hours: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub photos: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub menu_items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "stringish")]
    pub price: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub food_type: Option<String>,
}

impl RestaurantRecord {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn location(&self) -> &str {
        self.location.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn address(&self) -> &str {
        self.address.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn contact(&self) -> &str {
        self.contact.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn rating(&self) -> &str {
        self.rating.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn cost_for_two(&self) -> &str {
        self.cost_for_two.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn cuisines_joined(&self, sep: &str) -> String {
        self.cuisines.join(sep)
    }
}

impl MenuItem {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn price(&self) -> &str {
        self.price.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn food_type(&self) -> &str {
        self.food_type.as_deref().unwrap_or(UNKNOWN)
    }
}

/// Accepts a JSON string or number and normalizes to text.
fn stringish<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

/// Load the combined restaurant catalog from disk.
pub fn load_records(path: &Path) -> Result<Vec<RestaurantRecord>, ApiError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ApiError::Internal(format!("failed to read catalog {}: {}", path.display(), e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| ApiError::Internal(format!("failed to parse catalog {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_rating_and_cost_parse_as_text() {
        let record: RestaurantRecord = serde_json::from_str(
            r#"{"name": "Spice Hub", "rating": 4.5, "cost_for_two": 800}"#,
        )
        .unwrap();
        assert_eq!(record.rating(), "4.5");
        assert_eq!(record.cost_for_two(), "800");
    }

    #[test]
    fn missing_fields_default_to_unknown() {
        let record: RestaurantRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record.name(), UNKNOWN);
        assert_eq!(record.location(), UNKNOWN);
        assert!(record.cuisines.is_empty());
        assert!(record.menu_items.is_empty());
    }

    #[test]
    fn menu_item_fields_are_lenient() {
        let item: MenuItem =
            serde_json::from_str(r#"{"name": "Butter Chicken", "price": 350}"#).unwrap();
        assert_eq!(item.price(), "350");
        assert_eq!(item.food_type(), UNKNOWN);
    }
}
