pub mod allergens;
pub mod harmful;
pub mod normalize;
pub mod parser;
pub mod score;
pub mod types;

use types::{AllergenWarnings, Ingredient, ProductInfo, ProductRecord};

/// Turns a pre-scoring product view into the final analyzed record: health
/// score and tag, macro split, per-ingredient safety flags, detailed harmful
/// matches, and allergen intersection with the user's declared allergies.
/// Pure function; identical inputs yield identical records.
pub fn analyze(info: ProductInfo, user_allergies: &[String]) -> ProductRecord {
    let health_score = score::health_score(&info.nutrition);
    let health_tag = score::health_tag(health_score);
    let macros = score::macro_split(&info.nutrition);
    let harmful_ingredients = harmful::identify_harmful_ingredients(&info.ingredients);
    let matches = allergens::match_user_allergies(&info.allergens, user_allergies);

    let ingredients = info
        .ingredients
        .iter()
        .map(|name| {
            let is_harmful = harmful::is_harmful_ingredient(name);
            Ingredient {
                name: name.clone(),
                safe: !is_harmful,
                harmful: is_harmful,
            }
        })
        .collect();

    ProductRecord {
        name: info.product_name,
        brand: info.brand,
        barcode: info.barcode,
        category: info.category,
        image_url: info.image_url,
        ingredients,
        nutrition: info.nutrition,
        allergen_warnings: AllergenWarnings {
            detected: info.allergens,
            user_allergies: user_allergies.to_vec(),
            matches,
        },
        harmful_ingredients,
        health_score,
        health_tag,
        macros,
    }
}
