use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::{auth::AuthUser, profile::repo, state::AppState};

pub fn allergy_routes() -> Router<AppState> {
    Router::new().route(
        "/user/allergies",
        get(get_allergies).post(update_allergies),
    )
}

#[derive(Debug, Deserialize)]
pub struct UpdateAllergiesRequest {
    pub allergies: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateAllergiesResponse {
    pub message: String,
}

#[instrument(skip(state))]
pub async fn get_allergies(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    let allergies = repo::get_allergies(&state.db, user_id).await.map_err(|e| {
        error!(error = %e, %user_id, "get_allergies failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    Ok(Json(allergies))
}

#[instrument(skip(state, payload))]
pub async fn update_allergies(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateAllergiesRequest>,
) -> Result<Json<UpdateAllergiesResponse>, (StatusCode, String)> {
    repo::replace_allergies(&state.db, user_id, &payload.allergies)
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, "replace_allergies failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    info!(%user_id, count = payload.allergies.len(), "allergies updated");
    Ok(Json(UpdateAllergiesResponse {
        message: "Allergies updated successfully".into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_deserializes_sentinel() {
        let req: UpdateAllergiesRequest =
            serde_json::from_str(r#"{"allergies":["none"]}"#).unwrap();
        assert_eq!(req.allergies, vec!["none"]);
    }
}
