use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::analysis::types::ProductRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanType {
    Image,
    Barcode,
}

impl ScanType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Barcode => "barcode",
        }
    }
}

/// Joined row read back for the history listing.
#[derive(Debug, Clone, FromRow)]
pub struct ScanHistoryRow {
    pub id: Uuid,
    pub scan_type: String,
    pub created_at: OffsetDateTime,
    pub product_id: Option<Uuid>,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub ingredients: Option<String>,
    pub allergens: Option<String>,
    pub nutrition_facts: Option<serde_json::Value>,
    pub result_data: Option<serde_json::Value>,
}

/// Appends the analyzed product and its scan-history entry. One product row
/// per scan, as in the original schema; the full record is kept as an
/// opaque JSON blob in `result_data`.
pub async fn insert_scan(
    db: &PgPool,
    user_id: Uuid,
    scan_type: ScanType,
    record: &ProductRecord,
    image_path: Option<&str>,
) -> anyhow::Result<Uuid> {
    let mut tx = db.begin().await?;

    let detected = record.allergen_warnings.detected.join(", ");
    let ingredients = record
        .ingredients
        .iter()
        .map(|i| i.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let (product_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO products (barcode, name, brand, ingredients, allergens, nutrition_facts, image_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(record.barcode.as_deref())
    .bind(&record.name)
    .bind(&record.brand)
    .bind(&ingredients)
    .bind(&detected)
    .bind(serde_json::to_value(&record.nutrition)?)
    .bind(record.image_url.as_deref())
    .fetch_one(&mut *tx)
    .await?;

    let (scan_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO scan_history (user_id, product_id, scan_type, image_path, result_data)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(product_id)
    .bind(scan_type.as_str())
    .bind(image_path)
    .bind(serde_json::to_value(record)?)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(scan_id)
}

/// Most recent entries for a user, newest first, joined with the product row.
pub async fn list_recent(
    db: &PgPool,
    user_id: Uuid,
    limit: i64,
) -> anyhow::Result<Vec<ScanHistoryRow>> {
    let rows = sqlx::query_as::<_, ScanHistoryRow>(
        r#"
        SELECT sh.id, sh.scan_type, sh.created_at, sh.product_id, sh.result_data,
               p.name, p.brand, p.ingredients, p.allergens, p.nutrition_facts
        FROM scan_history sh
        LEFT JOIN products p ON sh.product_id = p.id
        WHERE sh.user_id = $1
        ORDER BY sh.created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
