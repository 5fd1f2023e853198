use sqlx::PgPool;
use uuid::Uuid;

/// Flat allergy-tag list for a user, insertion order preserved.
pub async fn get_allergies(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<String>> {
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT allergy_type
        FROM user_allergies
        WHERE user_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(|(a,)| a).collect())
}

/// Replaces the user's allergy tags wholesale (delete then insert), so the
/// stored set always mirrors the last selection, sentinel included.
pub async fn replace_allergies(
    db: &PgPool,
    user_id: Uuid,
    allergies: &[String],
) -> anyhow::Result<()> {
    let mut tx = db.begin().await?;

    sqlx::query("DELETE FROM user_allergies WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    for allergy in allergies {
        sqlx::query("INSERT INTO user_allergies (user_id, allergy_type) VALUES ($1, $2)")
            .bind(user_id)
            .bind(allergy)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}
