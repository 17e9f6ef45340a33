//! Context assembly: turns a raw candidate set into one bounded context
//! block for the grounded prompt.
//!
//! Candidates are partitioned by document type, restaurant overviews are
//! re-ranked by distance and deduplicated per restaurant, each section is
//! capped, and the sections are serialized in a fixed order. The length
//! cap is applied only after full assembly, never mid-section.

use serde::{Deserialize, Serialize};

use super::documents::DocumentKind;
use super::store::QueryCandidate;

/// Appended when the assembled context exceeds the configured cap.
pub const TRUNCATION_MARKER: &str = "...\n[Context truncated due to size]";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextBuilderConfig {
    /// Deduplicated restaurant overview blocks to keep.
    pub max_restaurant_blocks: usize,
    pub max_cuisine_blocks: usize,
    pub max_location_blocks: usize,
    pub max_section_blocks: usize,
    pub max_item_blocks: usize,
    /// Hard cap on the assembled context, in characters.
    pub max_context_chars: usize,
}

impl Default for ContextBuilderConfig {
    fn default() -> Self {
        Self {
            max_restaurant_blocks: 8,
            max_cuisine_blocks: 5,
            max_location_blocks: 5,
            max_section_blocks: 8,
            max_item_blocks: 12,
            max_context_chars: 16_000,
        }
    }
}

pub struct ContextBuilder {
    config: ContextBuilderConfig,
}

impl ContextBuilder {
    pub fn new(config: ContextBuilderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ContextBuilderConfig {
        &self.config
    }

    /// Assemble the context block.
    ///
    /// Returns the empty string for an empty candidate set; the caller must
    /// treat that as "no grounding available" and take the ungrounded path.
    pub fn assemble(&self, candidates: &[QueryCandidate]) -> String {
        if candidates.is_empty() {
            return String::new();
        }

        // Restaurant overviews get explicit ranking: best distance first,
        // one block per restaurant name. The store's ordering is not
        // trusted here.
        let mut restaurant_hits: Vec<&QueryCandidate> = candidates
            .iter()
            .filter(|c| c.metadata.kind() == DocumentKind::RestaurantInfo)
            .collect();
        restaurant_hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut seen_restaurants: Vec<&str> = Vec::new();
        let mut restaurant_blocks: Vec<&str> = Vec::new();
        for candidate in restaurant_hits {
            let name = candidate.metadata.restaurant_name();
            if seen_restaurants.contains(&name) {
                continue;
            }
            seen_restaurants.push(name);
            restaurant_blocks.push(&candidate.document);
        }

        // The remaining sections keep the store's candidate order.
        let by_kind = |kind: DocumentKind| -> Vec<&str> {
            candidates
                .iter()
                .filter(|c| c.metadata.kind() == kind)
                .map(|c| c.document.as_str())
                .collect()
        };
        let cuisine_blocks = by_kind(DocumentKind::CuisineInfo);
        let location_blocks = by_kind(DocumentKind::LocationInfo);
        let section_blocks = by_kind(DocumentKind::MenuSection);
        let item_blocks = by_kind(DocumentKind::MenuItem);

        let mut parts: Vec<String> = Vec::new();

        if !restaurant_blocks.is_empty() {
            parts.push("RESTAURANT INFORMATION:".to_string());
            for (i, block) in restaurant_blocks
                .iter()
                .take(self.config.max_restaurant_blocks)
                .enumerate()
            {
                parts.push(format!("Restaurant Option #{}:", i + 1));
                parts.push((*block).to_string());
            }
        }

        let mut push_section = |header: &str, blocks: &[&str], cap: usize| {
            if !blocks.is_empty() {
                parts.push(format!("\n{}", header));
                parts.extend(blocks.iter().take(cap).map(|b| (*b).to_string()));
            }
        };

        push_section(
            "CUISINE INFORMATION:",
            &cuisine_blocks,
            self.config.max_cuisine_blocks,
        );
        push_section(
            "LOCATION INFORMATION:",
            &location_blocks,
            self.config.max_location_blocks,
        );
        push_section(
            "MENU SECTIONS:",
            &section_blocks,
            self.config.max_section_blocks,
        );
        push_section("MENU ITEMS:", &item_blocks, self.config.max_item_blocks);

        let context = parts.join("\n\n");

        // Char-based cap: document text is not ASCII (prices, names).
        if context.chars().count() > self.config.max_context_chars {
            let truncated: String = context.chars().take(self.config.max_context_chars).collect();
            return format!("{}{}", truncated, TRUNCATION_MARKER);
        }

        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::documents::DocumentMetadata;

    fn overview(name: &str, distance: f32) -> QueryCandidate {
        QueryCandidate {
            document: format!("Restaurant Name: {}\nRating: 4.0\n", name),
            metadata: DocumentMetadata::RestaurantInfo {
                name: name.to_string(),
                location: "Delhi".to_string(),
                rating: "4.0".to_string(),
                cuisines: "Indian".to_string(),
                cost: "800".to_string(),
                url: "Unknown".to_string(),
                contact: "Unknown".to_string(),
                address: "Unknown".to_string(),
            },
            distance,
        }
    }

    fn item(restaurant: &str, item_name: &str, distance: f32) -> QueryCandidate {
        QueryCandidate {
            document: format!("Restaurant: {}\nMenu Item: {}\n", restaurant, item_name),
            metadata: DocumentMetadata::MenuItem {
                restaurant: restaurant.to_string(),
                item_name: item_name.to_string(),
                price: "₹100".to_string(),
                food_type: "Veg".to_string(),
                restaurant_location: "Delhi".to_string(),
                restaurant_cuisines: "Indian".to_string(),
                restaurant_rating: "4.0".to_string(),
                restaurant_url: "Unknown".to_string(),
            },
            distance,
        }
    }

    #[test]
    fn empty_candidates_yield_empty_context() {
        let builder = ContextBuilder::new(ContextBuilderConfig::default());
        assert_eq!(builder.assemble(&[]), "");
    }

    #[test]
    fn restaurants_are_sorted_by_distance_and_deduplicated() {
        let builder = ContextBuilder::new(ContextBuilderConfig::default());
        let candidates = vec![
            overview("Far Fork", 0.9),
            overview("Spice Hub", 0.2),
            overview("Spice Hub", 0.5),
        ];

        let context = builder.assemble(&candidates);

        // Best-distance restaurant comes first.
        let spice = context.find("Restaurant Name: Spice Hub").unwrap();
        let far = context.find("Restaurant Name: Far Fork").unwrap();
        assert!(spice < far);

        // Duplicate appears exactly once.
        assert_eq!(context.matches("Restaurant Name: Spice Hub").count(), 1);
        assert!(context.contains("Restaurant Option #1:"));
        assert!(context.contains("Restaurant Option #2:"));
    }

    #[test]
    fn per_section_caps_are_enforced() {
        let builder = ContextBuilder::new(ContextBuilderConfig::default());
        let mut candidates: Vec<QueryCandidate> = (0..10)
            .map(|i| overview(&format!("R{}", i), i as f32))
            .collect();
        candidates.extend((0..15).map(|i| item("R0", &format!("Dish {}", i), 0.1)));

        let context = builder.assemble(&candidates);

        assert_eq!(context.matches("Restaurant Option #").count(), 8);
        assert_eq!(context.matches("Menu Item: Dish").count(), 12);
    }

    #[test]
    fn section_headers_appear_in_fixed_order() {
        let builder = ContextBuilder::new(ContextBuilderConfig::default());
        let candidates = vec![item("Spice Hub", "Dal", 0.3), overview("Spice Hub", 0.2)];

        let context = builder.assemble(&candidates);
        let restaurants = context.find("RESTAURANT INFORMATION:").unwrap();
        let items = context.find("MENU ITEMS:").unwrap();
        assert!(restaurants < items);
        assert!(!context.contains("CUISINE INFORMATION:"));
        assert!(!context.contains("LOCATION INFORMATION:"));
        assert!(!context.contains("MENU SECTIONS:"));
    }

    #[test]
    fn oversized_context_is_truncated_with_marker() {
        let config = ContextBuilderConfig {
            max_context_chars: 200,
            ..Default::default()
        };
        let builder = ContextBuilder::new(config);
        let candidates = vec![
            overview("A Very Long Restaurant Name Indeed", 0.1),
            overview("Another Quite Long Restaurant Name", 0.2),
            overview("Third Long Restaurant Name Entry", 0.3),
        ];

        let context = builder.assemble(&candidates);
        assert!(context.ends_with(TRUNCATION_MARKER));
        assert!(context.chars().count() <= 200 + TRUNCATION_MARKER.chars().count());
    }
}
