use serde::Deserialize;

use super::types::{NutritionFacts, ProductInfo};

/// Raw product record as returned by the Open Food Facts API. Only the
/// fields we map are deserialized; everything else is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OffProduct {
    pub product_name: Option<String>,
    pub brands: Option<String>,
    pub categories: Option<String>,
    pub serving_size: Option<String>,
    pub ingredients_text: Option<String>,
    #[serde(default)]
    pub allergens_tags: Vec<String>,
    #[serde(default)]
    pub nutriments: OffNutriments,
    pub image_front_url: Option<String>,
}

/// Per-100g nutriment keys. Absent values default to 0.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OffNutriments {
    #[serde(rename = "energy-kcal_100g", default)]
    pub energy_kcal: f64,
    #[serde(rename = "fat_100g", default)]
    pub fat: f64,
    #[serde(rename = "saturated-fat_100g", default)]
    pub saturated_fat: f64,
    #[serde(rename = "trans-fat_100g", default)]
    pub trans_fat: f64,
    #[serde(rename = "cholesterol_100g", default)]
    pub cholesterol: f64,
    #[serde(rename = "sodium_100g", default)]
    pub sodium: f64,
    #[serde(rename = "carbohydrates_100g", default)]
    pub carbohydrates: f64,
    #[serde(rename = "fiber_100g", default)]
    pub fiber: f64,
    #[serde(rename = "sugars_100g", default)]
    pub sugars: f64,
    #[serde(rename = "proteins_100g", default)]
    pub proteins: f64,
    #[serde(rename = "vitamin-a_100g", default)]
    pub vitamin_a: f64,
    #[serde(rename = "vitamin-c_100g", default)]
    pub vitamin_c: f64,
    #[serde(rename = "calcium_100g", default)]
    pub calcium: f64,
    #[serde(rename = "iron_100g", default)]
    pub iron: f64,
    #[serde(rename = "potassium_100g", default)]
    pub potassium: f64,
}

/// Maps an Open Food Facts record into the internal product shape.
/// Ingredient text splits on commas; allergen tags lose their "en:" prefix
/// and internal hyphens; a missing front image falls back to the CDN path
/// keyed by barcode.
pub fn normalize(product: OffProduct, barcode: &str) -> ProductInfo {
    let ingredients = product
        .ingredients_text
        .as_deref()
        .map(|text| {
            text.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let allergens = product
        .allergens_tags
        .iter()
        .map(|tag| tag.trim_start_matches("en:").replace('-', " "))
        .collect();

    let n = &product.nutriments;
    let nutrition = NutritionFacts {
        serving_size: product.serving_size.clone().unwrap_or_else(|| "100g".into()),
        calories: n.energy_kcal,
        total_fat: n.fat,
        saturated_fat: n.saturated_fat,
        trans_fat: n.trans_fat,
        cholesterol: n.cholesterol,
        sodium: n.sodium,
        total_carbs: n.carbohydrates,
        fiber: n.fiber,
        sugars: n.sugars,
        protein: n.proteins,
        vitamin_a: n.vitamin_a,
        vitamin_c: n.vitamin_c,
        calcium: n.calcium,
        iron: n.iron,
        potassium: n.potassium,
    };

    let image_url = product.image_front_url.clone().unwrap_or_else(|| {
        format!("https://images.openfoodfacts.org/images/products/{barcode}/front_en.jpg")
    });

    ProductInfo {
        product_name: product
            .product_name
            .unwrap_or_else(|| "Unknown Product".into()),
        brand: product.brands.unwrap_or_else(|| "Unknown Brand".into()),
        barcode: Some(barcode.to_string()),
        category: product.categories.unwrap_or_else(|| "Food Product".into()),
        ingredients,
        allergens,
        nutrition,
        image_url: Some(image_url),
    }
}
