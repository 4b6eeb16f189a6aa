//! SQLite-backed [`EstateGateway`].
//!
//! Driver errors are classified here so that the core only sees named
//! outcomes: unique violations become `UniquenessConflict`, foreign key
//! violations become `ForeignKeyViolation`, everything else is opaque.

use chrono::Utc;
use estate_core::gateway::{EstateGateway, GatewayError, GatewayResult};
use estate_core::models::{Estate, EstateId, StoredPlan, Tree, TreeId};
use uuid::Uuid;

use super::db::Database;
use super::{estates, plans, trees};

#[derive(Clone)]
pub struct SqliteGateway {
    db: Database,
}

impl SqliteGateway {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// Map a persistence error onto the gateway taxonomy.
pub fn classify(err: anyhow::Error) -> GatewayError {
    if let Some(db_err) = err
        .downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
    {
        if db_err.is_unique_violation() {
            return GatewayError::UniquenessConflict;
        }
        if db_err.is_foreign_key_violation() {
            return GatewayError::ForeignKeyViolation;
        }
    }
    tracing::error!("Storage error: {:#}", err);
    GatewayError::storage(err)
}

impl EstateGateway for SqliteGateway {
    async fn get_estate(&self, id: &EstateId) -> GatewayResult<Option<Estate>> {
        estates::load_estate(self.db.pool(), id)
            .await
            .map_err(classify)
    }

    async fn get_trees(&self, id: &EstateId) -> GatewayResult<Vec<Tree>> {
        trees::load_trees(self.db.pool(), id).await.map_err(classify)
    }

    async fn insert_estate(&self, width: u32, length: u32) -> GatewayResult<Estate> {
        let estate = Estate {
            id: EstateId::new(Uuid::new_v4().to_string()),
            width,
            length,
            created_at: Utc::now(),
        };
        estates::insert_estate(self.db.pool(), &estate)
            .await
            .map_err(classify)?;
        Ok(estate)
    }

    async fn insert_tree_if_absent(
        &self,
        estate_id: &EstateId,
        x: u32,
        y: u32,
        height: u32,
    ) -> GatewayResult<Tree> {
        let tree = Tree {
            id: TreeId::new(Uuid::new_v4().to_string()),
            estate_id: estate_id.clone(),
            x,
            y,
            height,
            created_at: Utc::now(),
        };
        trees::insert_tree(self.db.pool(), &tree)
            .await
            .map_err(classify)?;
        Ok(tree)
    }

    async fn get_flight_distance(&self, id: &EstateId) -> GatewayResult<Option<StoredPlan>> {
        plans::load_current_plan(self.db.pool(), id)
            .await
            .map_err(classify)
    }

    async fn put_flight_distance(&self, id: &EstateId, plan: &StoredPlan) -> GatewayResult<()> {
        plans::upsert_plan(self.db.pool(), id, plan)
            .await
            .map_err(classify)
    }
}
