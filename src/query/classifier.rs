//! Lexical query classifier.
//!
//! A query is routed to retrieval iff it contains at least one term from a
//! fixed dining vocabulary. Deliberately recall-biased: a stray keyword in
//! a non-food query costs one wasted retrieval, while a missed restaurant
//! query costs a useless answer.

/// Dining vocabulary checked by [`is_domain_relevant`].
const FOOD_RELATED_KEYWORDS: &[&str] = &[
    "restaurant", "food", "meal", "eat", "dining", "lunch", "dinner",
    "breakfast", "menu", "cuisine", "dish", "price", "rating",
    "vegetarian", "non-veg", "location", "address", "cost", "veg",
    "cafe", "pizzeria", "bistro", "diner", "eatery",
    "bar", "pub", "coffee shop", "bakery", "patisserie", "dessert",
    "spicy", "sweet", "savory", "appetizer", "starter", "main course",
    "entree", "side dish", "snack", "beverage", "drink", "cocktail",
    "wine", "beer", "coffee", "tea", "juice", "smoothie", "milkshake",
    "takeout", "delivery", "dine-in", "reservation", "table", "wait time",
    "review", "recommend", "popular", "special", "discount", "offer",
    "deal", "promotion", "coupon", "chef", "signature dish", "specialty",
    "authentic", "fusion", "traditional", "modern", "fast food", "fine dining",
    "casual dining", "family-friendly", "romantic", "outdoor seating", "ambiance",
];

/// True iff the lowercased query contains any dining keyword.
pub fn is_domain_relevant(query: &str) -> bool {
    let lowered = query.to_lowercase();
    FOOD_RELATED_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restaurant_queries_are_relevant() {
        assert!(is_domain_relevant("vegetarian restaurants in Delhi"));
        assert!(is_domain_relevant("Where can I get good SUSHI for dinner?"));
        assert!(is_domain_relevant("cheap lunch near me"));
    }

    #[test]
    fn general_queries_are_not() {
        assert!(!is_domain_relevant("How tall is Mount Everest?"));
        assert!(!is_domain_relevant("Explain quantum computing"));
    }

    #[test]
    fn matching_is_case_insensitive_containment() {
        assert!(is_domain_relevant("BEST PIZZERIA?"));
        // Incidental substring hits ("bar" in barometer, "eat" in weather)
        // still route to retrieval; accepted tradeoff.
        assert!(is_domain_relevant("what does a barometer measure"));
        assert!(is_domain_relevant("what's the weather today"));
    }
}
