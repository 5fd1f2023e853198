/// Allergen keywords screened against every ingredient. Plain substring
/// containment, no stemming or negation: "soy-free" still matches "soy".
const ALLERGEN_KEYWORDS: &[&str] = &[
    "milk",
    "dairy",
    "lactose",
    "wheat",
    "gluten",
    "soy",
    "peanut",
    "tree nut",
    "egg",
    "fish",
    "shellfish",
    "sesame",
    "mustard",
    "crustacean",
];

/// Sentinel allergy tag meaning "no allergies declared".
pub const NONE_SENTINEL: &str = "none";

/// Scans an ingredient list for known allergen keywords. Output is
/// capitalized, deduplicated, and kept in first-seen order. One ingredient
/// can contribute several allergens.
pub fn detect_allergens(ingredients: &[String]) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for ingredient in ingredients {
        let lower = ingredient.to_lowercase();
        for keyword in ALLERGEN_KEYWORDS {
            if lower.contains(keyword) {
                let label = capitalize(keyword);
                if !found.contains(&label) {
                    found.push(label);
                }
            }
        }
    }
    found
}

/// Intersects detected allergens with the user's declared allergies. Either
/// side containing the other as a case-insensitive substring counts as a
/// match; results are deduplicated by user term, first-seen order.
pub fn match_user_allergies(detected: &[String], user_allergies: &[String]) -> Vec<String> {
    if user_allergies.is_empty() || user_allergies.iter().any(|a| a == NONE_SENTINEL) {
        return Vec::new();
    }

    let mut matches: Vec<String> = Vec::new();
    for allergy in user_allergies {
        let allergy_lower = allergy.to_lowercase();
        for found in detected {
            let found_lower = found.to_lowercase();
            if found_lower.contains(&allergy_lower) || allergy_lower.contains(&found_lower) {
                if !matches.contains(allergy) {
                    matches.push(allergy.clone());
                }
            }
        }
    }
    matches
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredients(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn detects_allergens_by_substring() {
        let found = detect_allergens(&ingredients(&["Wheat flour", "Milk powder", "Salt"]));
        assert_eq!(found, vec!["Wheat", "Milk"]);
    }

    #[test]
    fn one_ingredient_can_match_several_keywords() {
        let found = detect_allergens(&ingredients(&["milk lactose concentrate"]));
        assert_eq!(found, vec!["Milk", "Lactose"]);
    }

    #[test]
    fn duplicates_are_collapsed_in_first_seen_order() {
        let found = detect_allergens(&ingredients(&["soy lecithin", "soy protein", "egg white"]));
        assert_eq!(found, vec!["Soy", "Egg"]);
    }

    #[test]
    fn negations_are_not_understood() {
        // Known heuristic limitation, kept on purpose.
        let found = detect_allergens(&ingredients(&["soy-free seasoning"]));
        assert_eq!(found, vec!["Soy"]);
    }

    #[test]
    fn none_sentinel_suppresses_all_matches() {
        let detected = ingredients(&["Soy", "Gluten"]);
        assert!(match_user_allergies(&detected, &ingredients(&["none"])).is_empty());
        assert!(match_user_allergies(&detected, &[]).is_empty());
    }

    #[test]
    fn matches_are_case_insensitive_and_deduplicated() {
        let detected = ingredients(&["Soy", "Gluten"]);
        let user = ingredients(&["Soy"]);
        assert_eq!(match_user_allergies(&detected, &user), vec!["Soy"]);
    }

    #[test]
    fn substring_works_in_both_directions() {
        let detected = ingredients(&["Tree nut"]);
        let user = ingredients(&["nut"]);
        assert_eq!(match_user_allergies(&detected, &user), vec!["nut"]);
    }
}
