use axum::http::StatusCode;
use thiserror::Error;

/// Failures a scan can surface to the user. Messages are human-readable;
/// there are no internal error codes in the contract.
#[derive(Debug, Error)]
pub enum ScanError {
    /// No text or barcode could be extracted from the image.
    #[error("{0}")]
    Extraction(String),

    #[error("Product not found in our database. The barcode might not be in our system yet.")]
    ProductNotFound,

    /// An external service (vision, product database, profile store) failed.
    #[error("upstream service error: {0}")]
    Upstream(String),
}

impl ScanError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ProductNotFound => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<reqwest::Error> for ScanError {
    fn from(e: reqwest::Error) -> Self {
        Self::Upstream(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ScanError::Extraction("no text".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ScanError::ProductNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ScanError::Upstream("boom".into()).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn messages_are_user_facing() {
        let e = ScanError::ProductNotFound;
        assert!(e.to_string().contains("not found"));
    }
}
