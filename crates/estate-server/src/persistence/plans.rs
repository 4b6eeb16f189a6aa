//! Drone plan persistence operations.

use anyhow::Result;
use chrono::{DateTime, Utc};
use estate_core::models::{EstateId, StoredPlan};
use sqlx::SqlitePool;

/// Upsert the plan for an estate.
///
/// A plan derived from an older tree snapshot never replaces a newer one.
pub async fn upsert_plan(pool: &SqlitePool, estate_id: &EstateId, plan: &StoredPlan) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO drone_plans (estate_id, distance, tree_count, computed_at)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(estate_id) DO UPDATE SET
            distance = excluded.distance,
            tree_count = excluded.tree_count,
            computed_at = excluded.computed_at
        WHERE excluded.tree_count >= drone_plans.tree_count
        "#,
    )
    .bind(estate_id.as_str())
    .bind(i64::try_from(plan.distance)?)
    .bind(i64::try_from(plan.tree_count)?)
    .bind(plan.computed_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Load the plan for an estate if it was derived from the current tree layout.
pub async fn load_current_plan(pool: &SqlitePool, estate_id: &EstateId) -> Result<Option<StoredPlan>> {
    let row = sqlx::query_as::<_, PlanRow>(
        r#"
        SELECT p.distance, p.tree_count, p.computed_at
        FROM drone_plans p
        WHERE p.estate_id = ?1
          AND p.tree_count = (SELECT COUNT(*) FROM trees t WHERE t.estate_id = ?1)
        "#,
    )
    .bind(estate_id.as_str())
    .fetch_optional(pool)
    .await?;

    row.map(StoredPlan::try_from).transpose()
}

// Internal row type for SQLx
#[derive(sqlx::FromRow)]
struct PlanRow {
    distance: i64,
    tree_count: i64,
    computed_at: String,
}

impl TryFrom<PlanRow> for StoredPlan {
    type Error = anyhow::Error;

    fn try_from(row: PlanRow) -> Result<Self> {
        let computed_at = DateTime::parse_from_rfc3339(&row.computed_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(StoredPlan {
            distance: u64::try_from(row.distance)?,
            tree_count: u64::try_from(row.tree_count)?,
            computed_at,
        })
    }
}
