pub mod error;
pub mod gateway;
pub mod grid;
pub mod memory;
pub mod models;
pub mod planner;
pub mod registry;
pub mod stats;

pub use error::{EstateError, EstateResult};
pub use gateway::{EstateGateway, GatewayError, GatewayResult};
pub use grid::{contains, EstateGrid, ScanOrder, MAX_ESTATE_SIDE};
pub use memory::MemoryGateway;
pub use models::{
    Cell, DronePlan, Estate, EstateId, EstateStats, NewEstate, NewTree, StoredPlan, Tree, TreeId,
};
pub use planner::{flight_distance, plan_within, HeightMap, PathPlanner, PlannerConfig};
pub use registry::{validate_height, TreeRegistry, MAX_TREE_HEIGHT_M};
pub use stats::{summarize_heights, StatsEngine};
