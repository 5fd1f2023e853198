use axum::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::analysis::normalize::OffProduct;
use crate::error::ScanError;

/// Barcode-to-product resolution, consumed as a black box. A miss is
/// `Ok(None)`; only transport/service failures are errors.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    async fn by_barcode(&self, barcode: &str) -> Result<Option<OffProduct>, ScanError>;
}

/// Open Food Facts lookup with an optional secondary webhook tried when the
/// primary database misses.
#[derive(Clone)]
pub struct OpenFoodFacts {
    http: reqwest::Client,
    base_url: String,
    fallback_url: Option<String>,
}

impl OpenFoodFacts {
    pub fn new(http: reqwest::Client, base_url: &str, fallback_url: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            fallback_url,
        }
    }

    async fn primary(&self, barcode: &str) -> Result<Option<OffProduct>, ScanError> {
        let url = format!("{}/product/{}.json", self.base_url, barcode);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ScanError::Upstream(format!(
                "product database returned {}",
                response.status()
            )));
        }

        let body: OffLookupResponse = response.json().await?;
        if body.status == 1 {
            Ok(body.product)
        } else {
            Ok(None)
        }
    }

    async fn fallback(&self, barcode: &str) -> Result<Option<OffProduct>, ScanError> {
        let Some(url) = &self.fallback_url else {
            return Ok(None);
        };
        let response = self
            .http
            .post(url)
            .json(&serde_json::json!({ "barcode": barcode }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Ok(None);
        }
        Ok(response.json::<Option<OffProduct>>().await.unwrap_or(None))
    }
}

#[async_trait]
impl ProductLookup for OpenFoodFacts {
    async fn by_barcode(&self, barcode: &str) -> Result<Option<OffProduct>, ScanError> {
        match self.primary(barcode).await {
            Ok(Some(product)) => {
                debug!(barcode, "product found in primary database");
                return Ok(Some(product));
            }
            Ok(None) => debug!(barcode, "primary database miss"),
            Err(e) => {
                if self.fallback_url.is_none() {
                    return Err(e);
                }
                warn!(barcode, error = %e, "primary lookup failed, trying fallback");
            }
        }
        self.fallback(barcode).await
    }
}

#[derive(Debug, Deserialize)]
struct OffLookupResponse {
    #[serde(default)]
    status: i64,
    product: Option<OffProduct>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_response_gates_on_status() {
        let hit: OffLookupResponse = serde_json::from_str(
            r#"{"status":1,"product":{"product_name":"Oat Crunch"}}"#,
        )
        .expect("parse");
        assert_eq!(hit.status, 1);
        assert_eq!(
            hit.product.and_then(|p| p.product_name).as_deref(),
            Some("Oat Crunch")
        );

        let miss: OffLookupResponse =
            serde_json::from_str(r#"{"status":0,"status_verbose":"product not found"}"#)
                .expect("parse");
        assert_eq!(miss.status, 0);
        assert!(miss.product.is_none());
    }
}
