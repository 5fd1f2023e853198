use serde::{Deserialize, Serialize};

/// Per-serving nutrition values. Everything defaults to zero so a lossy
/// parse still yields a usable record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionFacts {
    pub serving_size: String,
    pub calories: f64,
    pub total_fat: f64,
    pub saturated_fat: f64,
    pub trans_fat: f64,
    pub cholesterol: f64,
    pub sodium: f64,
    pub total_carbs: f64,
    pub fiber: f64,
    pub sugars: f64,
    pub protein: f64,
    pub vitamin_a: f64,
    pub vitamin_c: f64,
    pub calcium: f64,
    pub iron: f64,
    pub potassium: f64,
}

impl Default for NutritionFacts {
    fn default() -> Self {
        Self {
            serving_size: "100g".into(),
            calories: 0.0,
            total_fat: 0.0,
            saturated_fat: 0.0,
            trans_fat: 0.0,
            cholesterol: 0.0,
            sodium: 0.0,
            total_carbs: 0.0,
            fiber: 0.0,
            sugars: 0.0,
            protein: 0.0,
            vitamin_a: 0.0,
            vitamin_c: 0.0,
            calcium: 0.0,
            iron: 0.0,
            potassium: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthTag {
    Healthy,
    Risky,
    Avoid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub safe: bool,
    pub harmful: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarmfulIngredientMatch {
    /// The ingredient string as it appeared on the label, not the table key.
    pub name: String,
    pub severity: Severity,
    pub e_number: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllergenWarnings {
    pub detected: Vec<String>,
    pub user_allergies: Vec<String>,
    pub matches: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub carbs: u8,
    pub protein: u8,
    pub fat: u8,
}

/// Pre-scoring view of a product, as produced by the text parser or the
/// product-database normalizer.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInfo {
    pub product_name: String,
    pub brand: String,
    pub barcode: Option<String>,
    pub category: String,
    pub ingredients: Vec<String>,
    pub allergens: Vec<String>,
    pub nutrition: NutritionFacts,
    pub image_url: Option<String>,
}

/// Fully analyzed product, stored verbatim as the scan-history result blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub name: String,
    pub brand: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub ingredients: Vec<Ingredient>,
    pub nutrition: NutritionFacts,
    pub allergen_warnings: AllergenWarnings,
    pub harmful_ingredients: Vec<HarmfulIngredientMatch>,
    pub health_score: u8,
    pub health_tag: HealthTag,
    pub macros: MacroSplit,
}
