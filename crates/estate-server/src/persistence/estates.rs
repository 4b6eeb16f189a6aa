//! Estate persistence operations.

use anyhow::Result;
use chrono::{DateTime, Utc};
use estate_core::models::{Estate, EstateId};
use sqlx::SqlitePool;

/// Insert a new estate.
pub async fn insert_estate(pool: &SqlitePool, estate: &Estate) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO estates (id, width, length, created_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(estate.id.as_str())
    .bind(i64::from(estate.width))
    .bind(i64::from(estate.length))
    .bind(estate.created_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Load one estate by id.
pub async fn load_estate(pool: &SqlitePool, id: &EstateId) -> Result<Option<Estate>> {
    let row = sqlx::query_as::<_, EstateRow>(
        "SELECT id, width, length, created_at FROM estates WHERE id = ?1",
    )
    .bind(id.as_str())
    .fetch_optional(pool)
    .await?;

    row.map(Estate::try_from).transpose()
}

// Internal row type for SQLx
#[derive(sqlx::FromRow)]
struct EstateRow {
    id: String,
    width: i64,
    length: i64,
    created_at: String,
}

impl TryFrom<EstateRow> for Estate {
    type Error = anyhow::Error;

    fn try_from(row: EstateRow) -> Result<Self> {
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(Estate {
            id: EstateId::new(row.id),
            width: u32::try_from(row.width)?,
            length: u32::try_from(row.length)?,
            created_at,
        })
    }
}
