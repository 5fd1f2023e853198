use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{error, instrument};
use uuid::Uuid;

use crate::{auth::AuthUser, history::repo, state::AppState};

pub fn history_routes() -> Router<AppState> {
    Router::new().route("/scan-history", get(list_history))
}

#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub scan_type: String,
    pub created_at: OffsetDateTime,
    pub product: Option<HistoryProduct>,
    pub result_data: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct HistoryProduct {
    pub id: Uuid,
    pub name: String,
    pub brand: Option<String>,
    pub ingredients: Vec<String>,
    pub allergens: Vec<String>,
    pub nutrition_facts: Option<serde_json::Value>,
}

fn split_tags(field: Option<String>) -> Vec<String> {
    field
        .map(|s| {
            s.split(", ")
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[instrument(skip(state))]
pub async fn list_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<HistoryEntry>>, (StatusCode, String)> {
    let rows = repo::list_recent(&state.db, user_id, state.config.history_limit)
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, "list_recent failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    let entries = rows
        .into_iter()
        .map(|row| HistoryEntry {
            id: row.id,
            scan_type: row.scan_type,
            created_at: row.created_at,
            product: row.product_id.map(|pid| HistoryProduct {
                id: pid,
                name: row.name.clone().unwrap_or_else(|| "Unknown Product".into()),
                brand: row.brand.clone(),
                ingredients: split_tags(row.ingredients.clone()),
                allergens: split_tags(row.allergens.clone()),
                nutrition_facts: row.nutrition_facts.clone(),
            }),
            result_data: row.result_data,
        })
        .collect();

    Ok(Json(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_tags_handles_empty_and_lists() {
        assert!(split_tags(None).is_empty());
        assert!(split_tags(Some(String::new())).is_empty());
        assert_eq!(
            split_tags(Some("Milk, Wheat flour".into())),
            vec!["Milk", "Wheat flour"]
        );
    }
}
