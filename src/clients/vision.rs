use axum::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use serde::Deserialize;
use tracing::debug;

use crate::error::ScanError;

/// Vision/OCR service consumed as a black box: image bytes in, detected
/// text or barcode out. Implemented against Google Vision in production and
/// faked in tests.
#[async_trait]
pub trait VisionClient: Send + Sync {
    /// Full-text annotation of the image, or None when nothing was detected.
    async fn detect_text(&self, image: &Bytes) -> Result<Option<String>, ScanError>;

    /// Raw value of the first barcode found in the image, if any.
    async fn detect_barcode(&self, image: &Bytes) -> Result<Option<String>, ScanError>;
}

#[derive(Clone)]
pub struct GoogleVision {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GoogleVision {
    pub fn new(http: reqwest::Client, endpoint: &str, api_key: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn annotate(&self, image: &Bytes, feature: &str) -> Result<AnnotateResult, ScanError> {
        let body = serde_json::json!({
            "requests": [{
                "image": { "content": BASE64.encode(image) },
                "features": [{ "type": feature, "maxResults": 10 }]
            }]
        });

        let url = format!("{}?key={}", self.endpoint, self.api_key);
        let response = self.http.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(ScanError::Upstream(format!(
                "vision API returned {}",
                response.status()
            )));
        }

        let mut annotated: AnnotateResponse = response.json().await?;
        debug!(feature, "vision annotate call completed");
        let first = annotated.responses.drain(..).next().unwrap_or_default();
        Ok(first)
    }
}

#[async_trait]
impl VisionClient for GoogleVision {
    async fn detect_text(&self, image: &Bytes) -> Result<Option<String>, ScanError> {
        let result = self.annotate(image, "TEXT_DETECTION").await?;
        Ok(result.full_text_annotation.map(|a| a.text))
    }

    async fn detect_barcode(&self, image: &Bytes) -> Result<Option<String>, ScanError> {
        let result = self.annotate(image, "BARCODE_DETECTION").await?;
        Ok(result
            .barcode_annotations
            .into_iter()
            .next()
            .map(|b| b.raw_value))
    }
}

#[derive(Debug, Default, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateResult>,
}

#[derive(Debug, Default, Deserialize)]
struct AnnotateResult {
    #[serde(rename = "fullTextAnnotation")]
    full_text_annotation: Option<FullTextAnnotation>,
    #[serde(rename = "barcodeAnnotations", default)]
    barcode_annotations: Vec<BarcodeAnnotation>,
}

#[derive(Debug, Deserialize)]
struct FullTextAnnotation {
    text: String,
}

#[derive(Debug, Deserialize)]
struct BarcodeAnnotation {
    #[serde(rename = "rawValue")]
    raw_value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotate_response_parses_text_detection() {
        let json = r#"{"responses":[{"fullTextAnnotation":{"text":"INGREDIENTS: milk"}}]}"#;
        let parsed: AnnotateResponse = serde_json::from_str(json).expect("parse");
        let text = parsed.responses[0]
            .full_text_annotation
            .as_ref()
            .map(|a| a.text.clone());
        assert_eq!(text.as_deref(), Some("INGREDIENTS: milk"));
    }

    #[test]
    fn annotate_response_parses_barcodes_and_tolerates_empty() {
        let json = r#"{"responses":[{"barcodeAnnotations":[{"rawValue":"737628064502"}]}]}"#;
        let parsed: AnnotateResponse = serde_json::from_str(json).expect("parse");
        assert_eq!(parsed.responses[0].barcode_annotations[0].raw_value, "737628064502");

        let empty: AnnotateResponse = serde_json::from_str(r#"{"responses":[{}]}"#).expect("parse");
        assert!(empty.responses[0].full_text_annotation.is_none());
        assert!(empty.responses[0].barcode_annotations.is_empty());
    }
}
