use lazy_static::lazy_static;
use regex::Regex;

use super::types::NutritionFacts;

/// Closed list of brands we can recognize on a label. Matching is a plain
/// case-insensitive substring test against each OCR line.
const KNOWN_BRANDS: &[&str] = &[
    "Nestlé",
    "Kellogg's",
    "Coca-Cola",
    "Pepsi",
    "Unilever",
    "P&G",
    "General Mills",
];

lazy_static! {
    static ref INGREDIENTS_RE: Regex = Regex::new(r"(?i)ingredients[:\s]*([^.]+)").unwrap();
    static ref CALORIES_RE: Regex = Regex::new(r"(?i)calories?[:\s]*(\d+)").unwrap();
    static ref PROTEIN_RE: Regex = Regex::new(r"(?i)protein[:\s]*([0-9.]+)\s*g").unwrap();
    static ref FAT_RE: Regex = Regex::new(r"(?i)fat[:\s]*([0-9.]+)\s*g").unwrap();
    static ref CARBS_RE: Regex = Regex::new(r"(?i)carb(?:ohydrate)?s?[:\s]*([0-9.]+)\s*g").unwrap();
    static ref SODIUM_RE: Regex = Regex::new(r"(?i)sodium[:\s]*([0-9.]+)\s*(mg|g)").unwrap();
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLabel {
    pub product_name: String,
    pub brand: String,
    pub ingredients: Vec<String>,
    pub nutrition: NutritionFacts,
}

/// Best-effort extraction from a raw OCR text blob. Never fails: anything
/// the patterns cannot find stays at its default. The caller decides whether
/// an empty input is a hard error.
pub fn parse(text: &str) -> ParsedLabel {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    ParsedLabel {
        product_name: extract_product_name(&lines),
        brand: extract_brand(&lines),
        ingredients: extract_ingredients(text),
        nutrition: extract_nutrition_facts(text),
    }
}

/// Heuristic: the product name is the first line that does not look like an
/// ingredient list, nutrition table, or measurement. A short brand line or a
/// name containing a stray "g" gets skipped; that is accepted noise.
pub fn extract_product_name(lines: &[&str]) -> String {
    lines
        .iter()
        .find(|line| {
            let lower = line.to_lowercase();
            !lower.contains("ingredients")
                && !lower.contains("nutrition")
                && !lower.contains("serving")
                && !line.contains('%')
                && !line.contains('g')
                && line.len() > 3
                && line.len() < 50
        })
        .map(|l| (*l).to_string())
        .unwrap_or_else(|| "Unknown Product".to_string())
}

pub fn extract_brand(lines: &[&str]) -> String {
    for line in lines {
        let lower = line.to_lowercase();
        for brand in KNOWN_BRANDS {
            if lower.contains(&brand.to_lowercase()) {
                return (*brand).to_string();
            }
        }
    }
    "Unknown Brand".to_string()
}

/// Captures everything after the first "ingredients" marker up to the next
/// period and splits it on commas/semicolons.
pub fn extract_ingredients(text: &str) -> Vec<String> {
    let Some(caps) = INGREDIENTS_RE.captures(text) else {
        return Vec::new();
    };
    caps[1]
        .split([',', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn extract_nutrition_facts(text: &str) -> NutritionFacts {
    let mut nutrition = NutritionFacts::default();

    if let Some(caps) = CALORIES_RE.captures(text) {
        if let Ok(v) = caps[1].parse::<f64>() {
            nutrition.calories = v;
        }
    }
    if let Some(caps) = PROTEIN_RE.captures(text) {
        if let Ok(v) = caps[1].parse::<f64>() {
            nutrition.protein = v;
        }
    }
    if let Some(caps) = FAT_RE.captures(text) {
        if let Ok(v) = caps[1].parse::<f64>() {
            nutrition.total_fat = v;
        }
    }
    if let Some(caps) = CARBS_RE.captures(text) {
        if let Ok(v) = caps[1].parse::<f64>() {
            nutrition.total_carbs = v;
        }
    }
    if let Some(caps) = SODIUM_RE.captures(text) {
        if let Ok(v) = caps[1].parse::<f64>() {
            // Normalize to mg; labels sometimes give sodium in grams.
            nutrition.sodium = if caps[2].eq_ignore_ascii_case("mg") {
                v
            } else {
                v * 1000.0
            };
        }
    }

    nutrition
}
