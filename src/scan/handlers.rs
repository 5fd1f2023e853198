use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use tracing::{error, instrument, warn};
use uuid::Uuid;

use crate::{
    analysis::types::ProductRecord,
    auth::AuthUser,
    error::ScanError,
    profile::repo as profile_repo,
    scan::{
        dto::{ScanBarcodeRequest, ScanImageRequest},
        service::{self, ScanContext},
    },
    state::AppState,
};

pub fn scan_routes() -> Router<AppState> {
    Router::new()
        .route("/scan/image", post(scan_image))
        .route("/scan/barcode", post(scan_barcode))
}

fn decode_image(b64: &str) -> Result<Bytes, (StatusCode, String)> {
    // Tolerate a data-URL prefix from browser FileReader output.
    let raw = b64.rsplit(',').next().unwrap_or(b64);
    BASE64
        .decode(raw)
        .map(Bytes::from)
        .map_err(|_| (StatusCode::BAD_REQUEST, "invalid base64 image".into()))
}

async fn load_context(
    state: &AppState,
    user_id: Uuid,
) -> Result<ScanContext, (StatusCode, String)> {
    let allergies = profile_repo::get_allergies(&state.db, user_id)
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, "failed to load user allergies");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
    Ok(ScanContext { user_id, allergies })
}

fn scan_error(e: ScanError) -> (StatusCode, String) {
    warn!(error = %e, "scan failed");
    (e.status(), e.to_string())
}

#[instrument(skip(state, payload))]
pub async fn scan_image(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ScanImageRequest>,
) -> Result<Json<ProductRecord>, (StatusCode, String)> {
    let image = decode_image(&payload.image_b64)?;
    if image.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "image_b64 is required".into()));
    }

    let ctx = load_context(&state, user_id).await?;
    let record = service::analyze_image(&state, &ctx, image)
        .await
        .map_err(scan_error)?;
    Ok(Json(record))
}

#[instrument(skip(state, payload))]
pub async fn scan_barcode(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ScanBarcodeRequest>,
) -> Result<Json<ProductRecord>, (StatusCode, String)> {
    if payload.barcode.is_none() && payload.image_b64.is_none() {
        return Err((
            StatusCode::BAD_REQUEST,
            "either barcode or image_b64 is required".into(),
        ));
    }

    let image = payload
        .image_b64
        .as_deref()
        .map(decode_image)
        .transpose()?;

    let ctx = load_context(&state, user_id).await?;
    let record = service::analyze_barcode(&state, &ctx, payload.barcode, image)
        .await
        .map_err(scan_error)?;
    Ok(Json(record))
}
