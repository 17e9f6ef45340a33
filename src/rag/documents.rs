//! Document synthesis: one restaurant record fans out into several
//! searchable documents, one per structural facet.
//!
//! Five facets are produced:
//! - overview (one per restaurant)
//! - per-item (one per menu item)
//! - cuisine (one per restaurant, only when it has cuisine tags)
//! - location (one per restaurant, always)
//! - menu section (one per distinct food-type bucket)
//!
//! Synthesis is pure and deterministic: no I/O, and absent fields render
//! as `"Unknown"` instead of failing. The metadata enum is closed — each
//! document type carries exactly the fields needed to present a restaurant
//! reference without re-reading the source record, because the index is
//! the only data available at query time.

use serde::{Deserialize, Serialize};

use crate::catalog::{MenuItem, RestaurantRecord};

/// Cap on illustrative items listed in a cuisine document.
const CUISINE_ITEM_LIMIT: usize = 10;

/// The five synthesis facets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    RestaurantInfo,
    MenuItem,
    CuisineInfo,
    LocationInfo,
    MenuSection,
}

/// Per-type metadata. Serializes with a `type` tag matching [`DocumentKind`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentMetadata {
    RestaurantInfo {
        name: String,
        location: String,
        rating: String,
        cuisines: String,
        cost: String,
        url: String,
        contact: String,
        address: String,
    },
    MenuItem {
        restaurant: String,
        item_name: String,
        price: String,
        food_type: String,
        restaurant_location: String,
        restaurant_cuisines: String,
        restaurant_rating: String,
        restaurant_url: String,
    },
    CuisineInfo {
        restaurant: String,
        cuisines: String,
        location: String,
        rating: String,
        cost: String,
        url: String,
    },
    LocationInfo {
        restaurant: String,
        location: String,
        address: String,
        cuisines: String,
        rating: String,
        cost: String,
        url: String,
    },
    MenuSection {
        restaurant: String,
        food_type: String,
        item_count: usize,
        location: String,
        cuisines: String,
        rating: String,
        cost: String,
        url: String,
    },
}

impl DocumentMetadata {
    pub fn kind(&self) -> DocumentKind {
        match self {
            DocumentMetadata::RestaurantInfo { .. } => DocumentKind::RestaurantInfo,
            DocumentMetadata::MenuItem { .. } => DocumentKind::MenuItem,
            DocumentMetadata::CuisineInfo { .. } => DocumentKind::CuisineInfo,
            DocumentMetadata::LocationInfo { .. } => DocumentKind::LocationInfo,
            DocumentMetadata::MenuSection { .. } => DocumentKind::MenuSection,
        }
    }

    /// The restaurant this document belongs to.
    pub fn restaurant_name(&self) -> &str {
        match self {
            DocumentMetadata::RestaurantInfo { name, .. } => name,
            DocumentMetadata::MenuItem { restaurant, .. }
            | DocumentMetadata::CuisineInfo { restaurant, .. }
            | DocumentMetadata::LocationInfo { restaurant, .. }
            | DocumentMetadata::MenuSection { restaurant, .. } => restaurant,
        }
    }
}

/// The unit stored in the vector index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDocument {
    pub id: String,
    pub text: String,
    pub metadata: DocumentMetadata,
}

/// Synthesize every document for one record.
///
/// `index` is the restaurant's allocator-assigned position and is the sole
/// variable part of the document ids, so ids are collision-free as long as
/// indices are.
pub fn synthesize(record: &RestaurantRecord, index: usize) -> Vec<SearchDocument> {
    let mut docs = Vec::with_capacity(4 + record.menu_items.len());

    docs.push(SearchDocument {
        id: format!("restaurant_{}", index),
        text: overview_text(record),
        metadata: DocumentMetadata::RestaurantInfo {
            name: record.name().to_string(),
            location: record.location().to_string(),
            rating: record.rating().to_string(),
            cuisines: record.cuisines_joined(","),
            cost: record.cost_for_two().to_string(),
            url: record.url().to_string(),
            contact: record.contact().to_string(),
            address: record.address().to_string(),
        },
    });

    for (item_index, item) in record.menu_items.iter().enumerate() {
        docs.push(SearchDocument {
            id: format!("item_{}_{}", index, item_index),
            text: menu_item_text(record, item),
            metadata: DocumentMetadata::MenuItem {
                restaurant: record.name().to_string(),
                item_name: item.name().to_string(),
                price: item.price().to_string(),
                food_type: item.food_type().to_string(),
                restaurant_location: record.location().to_string(),
                restaurant_cuisines: record.cuisines_joined(","),
                restaurant_rating: record.rating().to_string(),
                restaurant_url: record.url().to_string(),
            },
        });
    }

    if !record.cuisines.is_empty() {
        docs.push(SearchDocument {
            id: format!("cuisine_{}", index),
            text: cuisine_text(record),
            metadata: DocumentMetadata::CuisineInfo {
                restaurant: record.name().to_string(),
                cuisines: record.cuisines_joined(","),
                location: record.location().to_string(),
                rating: record.rating().to_string(),
                cost: record.cost_for_two().to_string(),
                url: record.url().to_string(),
            },
        });
    }

    // Location document is produced even when the location fields are all
    // unknown, so location-phrased queries always have a landing document.
    docs.push(SearchDocument {
        id: format!("location_{}", index),
        text: location_text(record),
        metadata: DocumentMetadata::LocationInfo {
            restaurant: record.name().to_string(),
            location: record.location().to_string(),
            address: record.address().to_string(),
            cuisines: record.cuisines_joined(","),
            rating: record.rating().to_string(),
            cost: record.cost_for_two().to_string(),
            url: record.url().to_string(),
        },
    });

    for (food_type, items) in group_by_food_type(&record.menu_items) {
        docs.push(SearchDocument {
            id: format!("menu_{}_{}", index, food_type),
            text: menu_section_text(record, &food_type, &items),
            metadata: DocumentMetadata::MenuSection {
                restaurant: record.name().to_string(),
                food_type: food_type.clone(),
                item_count: items.len(),
                location: record.location().to_string(),
                cuisines: record.cuisines_joined(","),
                rating: record.rating().to_string(),
                cost: record.cost_for_two().to_string(),
                url: record.url().to_string(),
            },
        });
    }

    docs
}

/// Buckets menu items by food-type tag in first-seen order; untagged items
/// land in "Other".
fn group_by_food_type(items: &[MenuItem]) -> Vec<(String, Vec<&MenuItem>)> {
    let mut groups: Vec<(String, Vec<&MenuItem>)> = Vec::new();
    for item in items {
        let food_type = item
            .food_type
            .clone()
            .unwrap_or_else(|| "Other".to_string());
        match groups.iter_mut().find(|(ft, _)| *ft == food_type) {
            Some((_, bucket)) => bucket.push(item),
            None => groups.push((food_type, vec![item])),
        }
    }
    groups
}

fn hours_block(record: &RestaurantRecord) -> String {
    let Some(hours) = record.operational_hours.as_ref() else {
        return String::new();
    };
    let mut block = String::from("Hours of Operation:\n");
    for (day, interval) in hours {
        block.push_str(&format!("  {}: {}\n", day, interval));
    }
    block
}

fn overview_text(record: &RestaurantRecord) -> String {
    let mut photos_block = String::new();
    if let Some(photos) = record.photos.as_ref().filter(|p| !p.is_empty()) {
        photos_block.push_str("Photos:\n");
        for url in photos {
            photos_block.push_str(&format!("  {}\n", url));
        }
    }

    let menu_summary = if record.menu_items.is_empty() {
        String::new()
    } else {
        format!("Menu Items: {} items available\n", record.menu_items.len())
    };

    format!(
        "Restaurant Name: {}\n\
         Location: {}\n\
         Cost for Two: {}\n\
         Rating: {}\n\
         Website URL: {}\n\
         Address: {}\n\
         Contact: {}\n\
         Cuisines: {}\n\
         {}\n{}\n{}\n\
         Description: {}\n",
        record.name(),
        record.location(),
        record.cost_for_two(),
        record.rating(),
        record.url(),
        record.address(),
        record.contact(),
        record.cuisines_joined(", "),
        hours_block(record),
        photos_block,
        menu_summary,
        record.description(),
    )
}

fn menu_item_text(record: &RestaurantRecord, item: &MenuItem) -> String {
    format!(
        "Restaurant: {}\n\
         Menu Item: {}\n\
         Price: {}\n\
         Food Type: {}\n\
         Description: {}\n\
         Restaurant Info:\n\
         \x20 - Cuisines: {}\n\
         \x20 - Location: {}\n\
         \x20 - Address: {}\n\
         \x20 - Rating: {}\n\
         \x20 - Cost for Two: {}\n\
         \x20 - Website: {}\n\
         \x20 - Contact: {}\n",
        record.name(),
        item.name(),
        item.price(),
        item.food_type(),
        item.description(),
        record.cuisines_joined(", "),
        record.location(),
        record.address(),
        record.rating(),
        record.cost_for_two(),
        record.url(),
        record.contact(),
    )
}

fn cuisine_text(record: &RestaurantRecord) -> String {
    // Items whose food-type tag textually overlaps any cuisine keyword.
    let matching: Vec<String> = record
        .menu_items
        .iter()
        .filter(|item| {
            let food_type = item.food_type().to_lowercase();
            record
                .cuisines
                .iter()
                .any(|cuisine| food_type.contains(&cuisine.to_lowercase()))
        })
        .map(|item| format!("- {}: {}", item.name(), item.price()))
        .collect();

    let items_block = if matching.is_empty() {
        "No specific items found".to_string()
    } else {
        let mut block = matching[..matching.len().min(CUISINE_ITEM_LIMIT)].join("\n");
        if matching.len() > CUISINE_ITEM_LIMIT {
            block.push_str(&format!(
                "\n... and {} more items",
                matching.len() - CUISINE_ITEM_LIMIT
            ));
        }
        block
    };

    let cuisines = record.cuisines_joined(", ");
    format!(
        "Restaurant: {}\n\
         Cuisine Types: {}\n\
         Restaurant serves {} food.\n\
         Location: {}\n\
         Address: {}\n\
         Rating: {}\n\
         Cost for Two: {}\n\
         Website: {}\n\
         Contact: {}\n\
         \nPopular items in these cuisines:\n{}\n",
        record.name(),
        cuisines,
        cuisines,
        record.location(),
        record.address(),
        record.rating(),
        record.cost_for_two(),
        record.url(),
        record.contact(),
        items_block,
    )
}

fn location_text(record: &RestaurantRecord) -> String {
    format!(
        "Restaurant: {}\n\
         Location: {}\n\
         Full Address: {}\n\
         This restaurant is located in {}.\n\
         Contact: {}\n\
         Website: {}\n\
         Cuisines: {}\n\
         Rating: {}\n\
         Cost for Two: {}\n\
         {}\n",
        record.name(),
        record.location(),
        record.address(),
        record.location(),
        record.contact(),
        record.url(),
        record.cuisines_joined(", "),
        record.rating(),
        record.cost_for_two(),
        hours_block(record),
    )
}

fn menu_section_text(record: &RestaurantRecord, food_type: &str, items: &[&MenuItem]) -> String {
    let items_block: Vec<String> = items
        .iter()
        .map(|item| {
            format!(
                "  • Item: {}\n    Price: {}\n    Description: {}",
                item.name(),
                item.price(),
                item.description(),
            )
        })
        .collect();

    format!(
        "Restaurant: {}\n\
         Food Category: {}\n\
         Restaurant Details:\n\
         \x20 - Location: {}\n\
         \x20 - Address: {}\n\
         \x20 - Cuisines: {}\n\
         \x20 - Rating: {}\n\
         \x20 - Cost for Two: {}\n\
         \x20 - Website: {}\n\
         \x20 - Contact: {}\n\
         \nMenu Items ({} items in {} category):\n{}\n",
        record.name(),
        food_type,
        record.location(),
        record.address(),
        record.cuisines_joined(", "),
        record.rating(),
        record.cost_for_two(),
        record.url(),
        record.contact(),
        items.len(),
        food_type,
        items_block.join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RestaurantRecord;

    fn spice_hub() -> RestaurantRecord {
        serde_json::from_str(
            r#"{
                "name": "Spice Hub",
                "rating": 4.5,
                "cuisines": ["Indian"],
                "menu_items": [
                    {"name": "Butter Chicken", "price": "₹350", "food_type": "Non-Veg Indian"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn empty_record_synthesizes_with_unknown_fields() {
        let record = RestaurantRecord::default();
        let docs = synthesize(&record, 0);

        // Overview and location are always produced; no cuisines, no items.
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "restaurant_0");
        assert_eq!(docs[1].id, "location_0");
        assert!(docs[0].text.contains("Restaurant Name: Unknown"));
        assert!(docs[1].text.contains("Full Address: Unknown"));
    }

    #[test]
    fn spice_hub_emits_all_facets() {
        let docs = synthesize(&spice_hub(), 3);
        assert!(docs.len() >= 4);

        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert!(ids.contains(&"restaurant_3"));
        assert!(ids.contains(&"item_3_0"));
        assert!(ids.contains(&"cuisine_3"));
        assert!(ids.contains(&"location_3"));
        assert!(ids.contains(&"menu_3_Non-Veg Indian"));

        let cuisine_doc = docs.iter().find(|d| d.id == "cuisine_3").unwrap();
        assert!(cuisine_doc.text.contains("Indian"));
        assert!(cuisine_doc.text.contains("Butter Chicken"));
    }

    #[test]
    fn ids_within_one_record_are_distinct() {
        let docs = synthesize(&spice_hub(), 0);
        let mut ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), docs.len());
    }

    #[test]
    fn untagged_items_bucket_under_other() {
        let record: RestaurantRecord = serde_json::from_str(
            r#"{"name": "X", "menu_items": [
                {"name": "Chips"},
                {"name": "Dal", "food_type": "Veg"},
                {"name": "Water"}
            ]}"#,
        )
        .unwrap();

        let docs = synthesize(&record, 0);
        let other = docs.iter().find(|d| d.id == "menu_0_Other").unwrap();
        assert!(other.text.contains("Chips"));
        assert!(other.text.contains("Water"));
        match &other.metadata {
            DocumentMetadata::MenuSection { item_count, .. } => assert_eq!(*item_count, 2),
            meta => panic!("unexpected metadata: {:?}", meta),
        }
    }

    #[test]
    fn cuisine_doc_caps_items_and_counts_remainder() {
        let items: Vec<String> = (0..13)
            .map(|i| format!(r#"{{"name": "Dish {}", "price": "₹100", "food_type": "Veg Indian"}}"#, i))
            .collect();
        let json = format!(
            r#"{{"name": "Big Menu", "cuisines": ["Indian"], "menu_items": [{}]}}"#,
            items.join(",")
        );
        let record: RestaurantRecord = serde_json::from_str(&json).unwrap();

        let docs = synthesize(&record, 0);
        let cuisine_doc = docs.iter().find(|d| d.id == "cuisine_0").unwrap();
        assert!(cuisine_doc.text.contains("Dish 9"));
        assert!(!cuisine_doc.text.contains("Dish 10:"));
        assert!(cuisine_doc.text.contains("... and 3 more items"));
    }

    #[test]
    fn cuisine_match_is_case_insensitive_substring() {
        let record: RestaurantRecord = serde_json::from_str(
            r#"{"name": "X", "cuisines": ["indian"], "menu_items": [
                {"name": "Dal", "food_type": "INDIAN veg"}
            ]}"#,
        )
        .unwrap();

        let docs = synthesize(&record, 0);
        let cuisine_doc = docs.iter().find(|d| d.id == "cuisine_0").unwrap();
        assert!(cuisine_doc.text.contains("- Dal:"));
    }

    #[test]
    fn metadata_serializes_with_type_tag() {
        let docs = synthesize(&spice_hub(), 0);
        let value = serde_json::to_value(&docs[0].metadata).unwrap();
        assert_eq!(value["type"], "restaurant_info");
        assert_eq!(value["name"], "Spice Hub");
        assert_eq!(value["cuisines"], "Indian");
    }
}
