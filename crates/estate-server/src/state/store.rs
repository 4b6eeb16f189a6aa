//! Application state: the configured gateway and the core components built on it.

use anyhow::Result;
use estate_core::gateway::{EstateGateway, GatewayResult};
use estate_core::models::{Estate, EstateId, StoredPlan, Tree};
use estate_core::{MemoryGateway, PathPlanner, StatsEngine, TreeRegistry};

use crate::config::{Config, StorageBackend};
use crate::persistence::{init_database, SqliteGateway};

/// Gateway selected at start-up.
#[derive(Clone)]
pub enum Storage {
    Sqlite(SqliteGateway),
    Memory(MemoryGateway),
}

impl Storage {
    pub async fn open(config: &Config) -> Result<Self> {
        match config.storage {
            StorageBackend::Sqlite => {
                let db =
                    init_database(&config.database_path, config.database_max_connections).await?;
                Ok(Self::Sqlite(SqliteGateway::new(db)))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on shutdown");
                Ok(Self::Memory(MemoryGateway::new()))
            }
        }
    }
}

impl EstateGateway for Storage {
    async fn get_estate(&self, id: &EstateId) -> GatewayResult<Option<Estate>> {
        match self {
            Self::Sqlite(g) => g.get_estate(id).await,
            Self::Memory(g) => g.get_estate(id).await,
        }
    }

    async fn get_trees(&self, id: &EstateId) -> GatewayResult<Vec<Tree>> {
        match self {
            Self::Sqlite(g) => g.get_trees(id).await,
            Self::Memory(g) => g.get_trees(id).await,
        }
    }

    async fn insert_estate(&self, width: u32, length: u32) -> GatewayResult<Estate> {
        match self {
            Self::Sqlite(g) => g.insert_estate(width, length).await,
            Self::Memory(g) => g.insert_estate(width, length).await,
        }
    }

    async fn insert_tree_if_absent(
        &self,
        estate_id: &EstateId,
        x: u32,
        y: u32,
        height: u32,
    ) -> GatewayResult<Tree> {
        match self {
            Self::Sqlite(g) => g.insert_tree_if_absent(estate_id, x, y, height).await,
            Self::Memory(g) => g.insert_tree_if_absent(estate_id, x, y, height).await,
        }
    }

    async fn get_flight_distance(&self, id: &EstateId) -> GatewayResult<Option<StoredPlan>> {
        match self {
            Self::Sqlite(g) => g.get_flight_distance(id).await,
            Self::Memory(g) => g.get_flight_distance(id).await,
        }
    }

    async fn put_flight_distance(&self, id: &EstateId, plan: &StoredPlan) -> GatewayResult<()> {
        match self {
            Self::Sqlite(g) => g.put_flight_distance(id, plan).await,
            Self::Memory(g) => g.put_flight_distance(id, plan).await,
        }
    }
}

/// Shared state handed to every request handler.
pub struct AppState {
    config: Config,
    registry: TreeRegistry<Storage>,
    stats: StatsEngine<Storage>,
    planner: PathPlanner<Storage>,
}

impl AppState {
    pub fn new(storage: Storage, config: Config) -> Self {
        Self {
            registry: TreeRegistry::new(storage.clone()),
            stats: StatsEngine::new(storage.clone()),
            planner: PathPlanner::new(storage, config.planner),
            config,
        }
    }

    /// Open the configured storage and build the state on top of it.
    pub async fn from_config(config: Config) -> Result<Self> {
        let storage = Storage::open(&config).await?;
        Ok(Self::new(storage, config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &TreeRegistry<Storage> {
        &self.registry
    }

    pub fn stats(&self) -> &StatsEngine<Storage> {
        &self.stats
    }

    pub fn planner(&self) -> &PathPlanner<Storage> {
        &self.planner
    }
}
