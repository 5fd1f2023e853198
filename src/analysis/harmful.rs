use super::types::{HarmfulIngredientMatch, Severity};

struct HarmfulEntry {
    key: &'static str,
    severity: Severity,
    e_number: &'static str,
    description: &'static str,
}

/// Severity-annotated table backing the detailed harmful-ingredient report.
/// Kept as an ordered slice: the first key that matches an ingredient wins,
/// so definition order is part of the behavior.
const HARMFUL_TABLE: &[HarmfulEntry] = &[
    HarmfulEntry {
        key: "palm oil",
        severity: Severity::High,
        e_number: "N/A",
        description:
            "High in saturated fats. May contribute to cardiovascular issues when consumed in excess.",
    },
    HarmfulEntry {
        key: "e635",
        severity: Severity::Medium,
        e_number: "E635",
        description:
            "Disodium 5'-ribonucleotides. Flavor enhancer that may cause allergic reactions in sensitive individuals.",
    },
    HarmfulEntry {
        key: "e150d",
        severity: Severity::Low,
        e_number: "E150d",
        description:
            "Caramel color. Generally safe but may contain trace amounts of 4-MEI, a potential carcinogen.",
    },
    HarmfulEntry {
        key: "msg",
        severity: Severity::Medium,
        e_number: "E621",
        description:
            "Monosodium glutamate. May cause headaches and allergic reactions in sensitive individuals.",
    },
    HarmfulEntry {
        key: "high fructose corn syrup",
        severity: Severity::High,
        e_number: "N/A",
        description:
            "Linked to obesity, diabetes, and metabolic syndrome when consumed in excess.",
    },
    HarmfulEntry {
        key: "artificial",
        severity: Severity::Medium,
        e_number: "Various",
        description:
            "Artificial additives may cause allergic reactions and health issues in some individuals.",
    },
];

/// Broader keyword list used only for the boolean safe/harmful flag in the
/// ingredient display list. Deliberately NOT the same set as HARMFUL_TABLE;
/// the two must stay distinct to reproduce existing behavior.
const HARMFUL_KEYWORDS: &[&str] = &[
    "palm oil",
    "e635",
    "e150",
    "msg",
    "e621",
    "high fructose",
    "artificial",
    "hydrogenated",
    "trans fat",
    "sodium benzoate",
    "e211",
];

/// Emits at most one match per ingredient: the first table key (in
/// definition order) contained in the lowercased ingredient. The match
/// carries the original ingredient string.
pub fn identify_harmful_ingredients(ingredients: &[String]) -> Vec<HarmfulIngredientMatch> {
    let mut matches = Vec::new();
    for ingredient in ingredients {
        let lower = ingredient.to_lowercase();
        for entry in HARMFUL_TABLE {
            if lower.contains(entry.key) {
                matches.push(HarmfulIngredientMatch {
                    name: ingredient.clone(),
                    severity: entry.severity,
                    e_number: entry.e_number.to_string(),
                    description: entry.description.to_string(),
                });
                break;
            }
        }
    }
    matches
}

pub fn is_harmful_ingredient(ingredient: &str) -> bool {
    let lower = ingredient.to_lowercase();
    HARMFUL_KEYWORDS.iter().any(|k| lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredients(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn hfcs_matches_with_high_severity() {
        let matches = identify_harmful_ingredients(&ingredients(&["High Fructose Corn Syrup"]));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "High Fructose Corn Syrup");
        assert_eq!(matches[0].severity, Severity::High);
        assert_eq!(matches[0].e_number, "N/A");
    }

    #[test]
    fn at_most_one_match_per_ingredient_in_table_order() {
        // Contains both "msg" and "e150d"; e150d comes first in the table.
        let matches = identify_harmful_ingredients(&ingredients(&["e150d with msg traces"]));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].e_number, "E150d");
        assert_eq!(matches[0].severity, Severity::Low);
    }

    #[test]
    fn palm_oil_match_keeps_original_string() {
        let matches = identify_harmful_ingredients(&ingredients(&["Refined PALM OIL"]));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Refined PALM OIL");
        assert_eq!(matches[0].severity, Severity::High);
    }

    #[test]
    fn clean_ingredients_produce_no_matches() {
        assert!(identify_harmful_ingredients(&ingredients(&["Water", "Sea salt"])).is_empty());
    }

    #[test]
    fn boolean_flag_covers_keywords_outside_the_severity_table() {
        // "hydrogenated" is only in the flag list, not the severity table.
        assert!(is_harmful_ingredient("partially hydrogenated soybean oil"));
        assert!(identify_harmful_ingredients(&ingredients(&[
            "partially hydrogenated soybean oil"
        ]))
        .is_empty());
    }

    #[test]
    fn boolean_flag_is_case_insensitive() {
        assert!(is_harmful_ingredient("Sodium Benzoate"));
        assert!(!is_harmful_ingredient("olive oil"));
    }
}
