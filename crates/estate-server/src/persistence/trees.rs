//! Tree persistence operations.

use anyhow::Result;
use chrono::{DateTime, Utc};
use estate_core::models::{EstateId, Tree, TreeId};
use sqlx::SqlitePool;

/// Insert a tree.
///
/// No conflict clause: the `(estate_id, x, y)` unique constraint and the
/// estate foreign key surface as database errors for the caller to classify.
pub async fn insert_tree(pool: &SqlitePool, tree: &Tree) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO trees (id, estate_id, x, y, height, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(tree.id.as_str())
    .bind(tree.estate_id.as_str())
    .bind(i64::from(tree.x))
    .bind(i64::from(tree.y))
    .bind(i64::from(tree.height))
    .bind(tree.created_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Load all trees of an estate.
pub async fn load_trees(pool: &SqlitePool, estate_id: &EstateId) -> Result<Vec<Tree>> {
    let rows = sqlx::query_as::<_, TreeRow>(
        "SELECT id, estate_id, x, y, height, created_at FROM trees WHERE estate_id = ?1",
    )
    .bind(estate_id.as_str())
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
}

// Internal row type for SQLx
#[derive(sqlx::FromRow)]
struct TreeRow {
    id: String,
    estate_id: String,
    x: i64,
    y: i64,
    height: i64,
    created_at: String,
}

impl TryFrom<TreeRow> for Tree {
    type Error = anyhow::Error;

    fn try_from(row: TreeRow) -> Result<Self> {
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(Tree {
            id: TreeId::new(row.id),
            estate_id: EstateId::new(row.estate_id),
            x: u32::try_from(row.x)?,
            y: u32::try_from(row.y)?,
            height: u32::try_from(row.height)?,
            created_at,
        })
    }
}
