use serde::Deserialize;

/// POST /scan/image { "image_b64": "..." }
#[derive(Debug, Deserialize)]
pub struct ScanImageRequest {
    pub image_b64: String,
}

/// POST /scan/barcode with either a pre-known code or a barcode photo.
#[derive(Debug, Deserialize)]
pub struct ScanBarcodeRequest {
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub image_b64: Option<String>,
}
