use bytes::Bytes;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::analysis::{
    self, allergens, normalize, parser,
    types::{ProductInfo, ProductRecord},
};
use crate::error::ScanError;
use crate::history::repo::{self as history_repo, ScanType};
use crate::state::AppState;

/// Progression of a single scan. Each scan walks this sequence once; Failed
/// is terminal and the caller may simply start a new scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStage {
    Idle,
    Extracting,
    Parsing,
    Scoring,
    Complete,
    Failed,
}

impl ScanStage {
    fn advance(&mut self, next: ScanStage) {
        debug!(from = ?self, to = ?next, "scan stage");
        *self = next;
    }
}

/// Explicit per-scan session context instead of ambient user state.
#[derive(Debug, Clone)]
pub struct ScanContext {
    pub user_id: Uuid,
    pub allergies: Vec<String>,
}

/// Image path: OCR the label, parse it, score it. Empty OCR output is a
/// hard extraction failure; everything past that degrades silently to
/// defaults.
pub async fn analyze_image(
    state: &AppState,
    ctx: &ScanContext,
    image: Bytes,
) -> Result<ProductRecord, ScanError> {
    let mut stage = ScanStage::Idle;

    stage.advance(ScanStage::Extracting);
    let text = match state.vision.detect_text(&image).await {
        Ok(Some(text)) if !text.trim().is_empty() => text,
        Ok(_) => {
            stage.advance(ScanStage::Failed);
            return Err(ScanError::Extraction(
                "No text could be extracted from the image. Please ensure the text is clearly visible.".into(),
            ));
        }
        Err(e) => {
            stage.advance(ScanStage::Failed);
            return Err(e);
        }
    };

    stage.advance(ScanStage::Parsing);
    let parsed = parser::parse(&text);
    let detected = allergens::detect_allergens(&parsed.ingredients);
    let info = ProductInfo {
        product_name: parsed.product_name,
        brand: parsed.brand,
        barcode: None,
        category: "Food Product".into(),
        ingredients: parsed.ingredients,
        allergens: detected,
        nutrition: parsed.nutrition,
        image_url: None,
    };

    stage.advance(ScanStage::Scoring);
    let record = analysis::analyze(info, &ctx.allergies);

    stage.advance(ScanStage::Complete);
    info!(user_id = %ctx.user_id, product = %record.name, score = record.health_score, "image scan complete");
    persist_history(state, ctx.user_id, ScanType::Image, record.clone());
    Ok(record)
}

/// Barcode path: read the code from the image (or accept a pre-known one),
/// resolve it against the product database, normalize, score.
pub async fn analyze_barcode(
    state: &AppState,
    ctx: &ScanContext,
    barcode: Option<String>,
    image: Option<Bytes>,
) -> Result<ProductRecord, ScanError> {
    let mut stage = ScanStage::Idle;

    stage.advance(ScanStage::Extracting);
    let code = match barcode {
        Some(code) if !code.trim().is_empty() => code,
        _ => {
            let Some(image) = image else {
                stage.advance(ScanStage::Failed);
                return Err(ScanError::Extraction(
                    "No barcode or barcode image was provided.".into(),
                ));
            };
            match state.vision.detect_barcode(&image).await {
                Ok(Some(code)) => code,
                Ok(None) => {
                    stage.advance(ScanStage::Failed);
                    return Err(ScanError::Extraction(
                        "Failed to extract barcode. Please ensure the barcode is clearly visible.".into(),
                    ));
                }
                Err(e) => {
                    stage.advance(ScanStage::Failed);
                    return Err(e);
                }
            }
        }
    };

    stage.advance(ScanStage::Parsing);
    let product = match state.products.by_barcode(&code).await {
        Ok(Some(product)) => product,
        Ok(None) => {
            stage.advance(ScanStage::Failed);
            return Err(ScanError::ProductNotFound);
        }
        Err(e) => {
            stage.advance(ScanStage::Failed);
            return Err(e);
        }
    };
    let info = normalize::normalize(product, &code);

    stage.advance(ScanStage::Scoring);
    let record = analysis::analyze(info, &ctx.allergies);

    stage.advance(ScanStage::Complete);
    info!(user_id = %ctx.user_id, barcode = %code, product = %record.name, score = record.health_score, "barcode scan complete");
    persist_history(state, ctx.user_id, ScanType::Barcode, record.clone());
    Ok(record)
}

/// Fire-and-forget history append: the visible result never waits on it and
/// a failure only gets logged.
fn persist_history(state: &AppState, user_id: Uuid, scan_type: ScanType, record: ProductRecord) {
    let db = state.db.clone();
    tokio::spawn(async move {
        if let Err(e) = history_repo::insert_scan(&db, user_id, scan_type, &record, None).await {
            warn!(error = %e, %user_id, "history save failed (scan result unaffected)");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalize::OffProduct;
    use crate::analysis::types::{HealthTag, Severity};
    use crate::clients::{ProductLookup, VisionClient};
    use axum::async_trait;
    use std::sync::Arc;

    struct FixedVision {
        text: Option<String>,
        barcode: Option<String>,
    }

    #[async_trait]
    impl VisionClient for FixedVision {
        async fn detect_text(&self, _image: &Bytes) -> Result<Option<String>, ScanError> {
            Ok(self.text.clone())
        }
        async fn detect_barcode(&self, _image: &Bytes) -> Result<Option<String>, ScanError> {
            Ok(self.barcode.clone())
        }
    }

    struct FixedLookup {
        product: Option<serde_json::Value>,
    }

    #[async_trait]
    impl ProductLookup for FixedLookup {
        async fn by_barcode(&self, _barcode: &str) -> Result<Option<OffProduct>, ScanError> {
            Ok(self
                .product
                .clone()
                .map(|v| serde_json::from_value(v).expect("valid product fixture")))
        }
    }

    fn state_with(
        text: Option<&str>,
        barcode: Option<&str>,
        product: Option<serde_json::Value>,
    ) -> AppState {
        let base = AppState::fake();
        AppState::from_parts(
            base.db,
            base.config,
            Arc::new(FixedVision {
                text: text.map(str::to_string),
                barcode: barcode.map(str::to_string),
            }),
            Arc::new(FixedLookup { product }),
        )
    }

    fn ctx(allergies: &[&str]) -> ScanContext {
        ScanContext {
            user_id: Uuid::new_v4(),
            allergies: allergies.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn image_scan_analyzes_ocr_text() {
        let state = state_with(
            Some("Choco Bar\nINGREDIENTS: Wheat flour, Palm oil, Milk powder."),
            None,
            None,
        );
        let record = analyze_image(&state, &ctx(&["wheat"]), Bytes::from_static(b"jpeg"))
            .await
            .expect("scan succeeds");

        assert_eq!(record.name, "Choco Bar");
        assert!(record.allergen_warnings.detected.contains(&"Wheat".into()));
        assert_eq!(record.allergen_warnings.matches, vec!["wheat"]);
        assert_eq!(record.harmful_ingredients.len(), 1);
        assert_eq!(record.harmful_ingredients[0].severity, Severity::High);
        assert_eq!(record.health_score, 100);
        assert_eq!(record.health_tag, HealthTag::Healthy);
    }

    #[tokio::test]
    async fn image_scan_fails_without_text() {
        let state = state_with(None, None, None);
        let err = analyze_image(&state, &ctx(&[]), Bytes::from_static(b"jpeg"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::Extraction(_)));

        let blank = state_with(Some("   \n  "), None, None);
        let err = analyze_image(&blank, &ctx(&[]), Bytes::from_static(b"jpeg"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::Extraction(_)));
    }

    #[tokio::test]
    async fn barcode_scan_normalizes_database_hit() {
        let product = serde_json::json!({
            "product_name": "Oat Crunch",
            "brands": "General Mills",
            "ingredients_text": "Whole grain oats, sugar",
            "allergens_tags": ["en:gluten"],
            "nutriments": { "energy-kcal_100g": 365, "proteins_100g": 13.2 }
        });
        let state = state_with(None, Some("737628064502"), Some(product));
        let record = analyze_barcode(&state, &ctx(&["none"]), None, Some(Bytes::from_static(b"png")))
            .await
            .expect("scan succeeds");

        assert_eq!(record.name, "Oat Crunch");
        assert_eq!(record.barcode.as_deref(), Some("737628064502"));
        assert_eq!(record.allergen_warnings.detected, vec!["gluten"]);
        assert!(record.allergen_warnings.matches.is_empty());
        assert_eq!(record.nutrition.calories, 365.0);
    }

    #[tokio::test]
    async fn barcode_scan_accepts_preknown_code() {
        let state = state_with(None, None, Some(serde_json::json!({"product_name": "X"})));
        let record = analyze_barcode(&state, &ctx(&[]), Some("123".into()), None)
            .await
            .expect("scan succeeds");
        assert_eq!(record.barcode.as_deref(), Some("123"));
    }

    #[tokio::test]
    async fn barcode_scan_total_miss_is_product_not_found() {
        let state = state_with(None, Some("000"), None);
        let err = analyze_barcode(&state, &ctx(&[]), Some("000".into()), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::ProductNotFound));
    }

    #[tokio::test]
    async fn barcode_scan_without_code_or_image_fails_extraction() {
        let state = state_with(None, None, None);
        let err = analyze_barcode(&state, &ctx(&[]), None, None).await.unwrap_err();
        assert!(matches!(err, ScanError::Extraction(_)));
    }

    #[tokio::test]
    async fn undetectable_barcode_fails_extraction() {
        let state = state_with(None, None, None);
        let err = analyze_barcode(&state, &ctx(&[]), None, Some(Bytes::from_static(b"png")))
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::Extraction(_)));
    }
}
