//! In-memory gateway backed by DashMap.
//!
//! Each estate owns a cell map guarded by its DashMap shard, so the
//! occupancy check and the insert happen under one lock.

use crate::gateway::{EstateGateway, GatewayError, GatewayResult};
use crate::models::{Cell, Estate, EstateId, StoredPlan, Tree, TreeId};
use chrono::Utc;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct MemoryGateway {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    estates: DashMap<EstateId, Estate>,
    plots: DashMap<EstateId, HashMap<Cell, Tree>>,
    plans: DashMap<EstateId, StoredPlan>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored estates.
    pub fn estate_count(&self) -> usize {
        self.inner.estates.len()
    }

    fn tree_count(&self, id: &EstateId) -> u64 {
        self.inner
            .plots
            .get(id)
            .map(|plots| plots.len() as u64)
            .unwrap_or(0)
    }
}

impl EstateGateway for MemoryGateway {
    async fn get_estate(&self, id: &EstateId) -> GatewayResult<Option<Estate>> {
        Ok(self.inner.estates.get(id).map(|e| e.value().clone()))
    }

    async fn get_trees(&self, id: &EstateId) -> GatewayResult<Vec<Tree>> {
        Ok(self
            .inner
            .plots
            .get(id)
            .map(|plots| plots.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn insert_estate(&self, width: u32, length: u32) -> GatewayResult<Estate> {
        let estate = Estate {
            id: EstateId::new(Uuid::new_v4().to_string()),
            width,
            length,
            created_at: Utc::now(),
        };
        self.inner.plots.insert(estate.id.clone(), HashMap::new());
        self.inner.estates.insert(estate.id.clone(), estate.clone());
        Ok(estate)
    }

    async fn insert_tree_if_absent(
        &self,
        estate_id: &EstateId,
        x: u32,
        y: u32,
        height: u32,
    ) -> GatewayResult<Tree> {
        let mut plots = self
            .inner
            .plots
            .get_mut(estate_id)
            .ok_or(GatewayError::ForeignKeyViolation)?;

        let cell = Cell::new(x, y);
        if plots.contains_key(&cell) {
            return Err(GatewayError::UniquenessConflict);
        }

        let tree = Tree {
            id: TreeId::new(Uuid::new_v4().to_string()),
            estate_id: estate_id.clone(),
            x,
            y,
            height,
            created_at: Utc::now(),
        };
        plots.insert(cell, tree.clone());
        Ok(tree)
    }

    async fn get_flight_distance(&self, id: &EstateId) -> GatewayResult<Option<StoredPlan>> {
        let current = self.tree_count(id);
        Ok(self
            .inner
            .plans
            .get(id)
            .map(|plan| *plan.value())
            .filter(|plan| plan.tree_count == current))
    }

    async fn put_flight_distance(&self, id: &EstateId, plan: &StoredPlan) -> GatewayResult<()> {
        if !self.inner.estates.contains_key(id) {
            return Err(GatewayError::ForeignKeyViolation);
        }
        // an older snapshot never replaces a newer plan
        self.inner
            .plans
            .entry(id.clone())
            .and_modify(|stored| {
                if plan.tree_count >= stored.tree_count {
                    *stored = *plan;
                }
            })
            .or_insert(*plan);
        Ok(())
    }
}
