//! Survey flight planning.
//!
//! The drone takes off from the ground, passes over every cell of the estate
//! in a serpentine sweep at the clearance altitude of that cell, and lands
//! after the last one. Fixing the sweep order reduces the 3-D flight to a
//! 1-D sum over consecutive cells:
//!
//! ```text
//! total = alt(first)
//!       + sum(cell_spacing + |alt(next) - alt(prev)|)
//!       + alt(last)
//! ```
//!
//! where `alt(cell) = tree_height(cell) + clearance` and empty cells have a
//! tree height of zero.

use crate::error::{EstateError, EstateResult};
use crate::gateway::EstateGateway;
use crate::grid::{EstateGrid, ScanOrder};
use crate::models::{Cell, DronePlan, Estate, EstateId, StoredPlan, Tree};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Meters flown above the tallest obstacle of a cell (and above bare ground)
    pub clearance_m: u32,
    /// Horizontal distance charged for one grid step
    pub cell_spacing_m: u32,
    pub scan_order: ScanOrder,
    /// Derive missing plans on read instead of reporting them unavailable
    pub compute_on_demand: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            clearance_m: 1,
            cell_spacing_m: 1,
            scan_order: ScanOrder::RowMajor,
            compute_on_demand: true,
        }
    }
}

/// Tree heights of one estate, keyed by cell. Cells without an entry are
/// bare ground, so memory grows with the number of trees, not the grid.
#[derive(Debug, Clone)]
pub struct HeightMap {
    grid: EstateGrid,
    heights: HashMap<Cell, u32>,
}

impl HeightMap {
    pub fn new(grid: EstateGrid) -> Self {
        Self {
            grid,
            heights: HashMap::new(),
        }
    }

    pub fn from_trees(grid: EstateGrid, trees: &[Tree]) -> Self {
        let mut map = Self::new(grid);
        for tree in trees {
            if !map.set(Cell::new(tree.x, tree.y), tree.height) {
                tracing::warn!(
                    tree_id = %tree.id,
                    x = tree.x,
                    y = tree.y,
                    "Ignoring tree outside estate bounds"
                );
            }
        }
        map
    }

    /// Record a height. Returns false when the cell is outside the grid.
    pub fn set(&mut self, cell: Cell, height: u32) -> bool {
        if !self.grid.contains(i64::from(cell.x), i64::from(cell.y)) {
            return false;
        }
        self.heights.insert(cell, height);
        true
    }

    pub fn height(&self, cell: Cell) -> u32 {
        self.heights.get(&cell).copied().unwrap_or(0)
    }

    pub fn grid(&self) -> EstateGrid {
        self.grid
    }

    /// The sweep split into tree cells and the bare runs between them.
    fn spans(&self, order: ScanOrder) -> Vec<Span> {
        let planted: BTreeMap<u64, u32> = self
            .heights
            .iter()
            .map(|(cell, height)| (self.grid.survey_position(order, *cell), *height))
            .collect();

        let mut spans = Vec::with_capacity(planted.len() * 2 + 1);
        let mut next = 0;
        for (position, height) in planted {
            if position > next {
                spans.push(Span::Bare {
                    start: next,
                    len: position - next,
                });
            }
            spans.push(Span::Tree { position, height });
            next = position + 1;
        }
        let total = self.grid.cell_count();
        if total > next {
            spans.push(Span::Bare {
                start: next,
                len: total - next,
            });
        }
        spans
    }
}

#[derive(Debug, Clone, Copy)]
enum Span {
    Tree { position: u64, height: u32 },
    /// `len` consecutive empty cells, all flown at the clearance altitude
    Bare { start: u64, len: u64 },
}

/// A visited cell, by sweep position.
#[derive(Debug, Clone, Copy)]
struct Stop {
    position: u64,
    altitude_m: u64,
    /// Distance flown from take-off until arriving over this cell
    arrival_m: u64,
}

impl Stop {
    fn landing_m(&self) -> u64 {
        self.arrival_m.saturating_add(self.altitude_m)
    }

    /// Move `steps` cells further at the same altitude.
    fn advance(self, steps: u64, spacing: u64) -> Self {
        Self {
            position: self.position + steps,
            altitude_m: self.altitude_m,
            arrival_m: self
                .arrival_m
                .saturating_add(steps.saturating_mul(spacing)),
        }
    }
}

/// Walks the spans of a sweep, keeping the last cell reached.
struct Sweep {
    spacing: u64,
    clearance: u64,
    last: Option<Stop>,
}

impl Sweep {
    fn new(config: &PlannerConfig) -> Self {
        Self {
            spacing: u64::from(config.cell_spacing_m),
            clearance: u64::from(config.clearance_m),
            last: None,
        }
    }

    /// First cell of a span and the number of cells it covers.
    fn enter(&self, span: Span) -> (Stop, u64) {
        let (position, altitude_m, len) = match span {
            Span::Tree { position, height } => (position, u64::from(height) + self.clearance, 1),
            Span::Bare { start, len } => (start, self.clearance, len),
        };
        let arrival_m = match self.last {
            None => altitude_m,
            Some(prev) => prev
                .arrival_m
                .saturating_add(self.spacing)
                .saturating_add(prev.altitude_m.abs_diff(altitude_m)),
        };
        let stop = Stop {
            position,
            altitude_m,
            arrival_m,
        };
        (stop, len)
    }

    fn total_m(&self) -> u64 {
        self.last.map(|stop| stop.landing_m()).unwrap_or(0)
    }
}

/// Total take-off to landing distance for a full survey.
///
/// Runs of empty cells are charged arithmetically, so the cost depends on
/// the number of trees rather than the size of the estate. Distances that
/// exceed `u64` saturate.
pub fn flight_distance(map: &HeightMap, config: &PlannerConfig) -> u64 {
    let mut sweep = Sweep::new(config);
    for span in map.spans(config.scan_order) {
        let (first, len) = sweep.enter(span);
        sweep.last = Some(first.advance(len - 1, sweep.spacing));
    }
    sweep.total_m()
}

/// Survey under a distance budget.
///
/// The drone only moves on to the next cell if it could still land from
/// there within `max_distance`. When the budget runs out it lands over the
/// last cell reached, reported as `rest`. If not even the first cell fits,
/// the drone never takes off.
pub fn plan_within(map: &HeightMap, config: &PlannerConfig, max_distance: u64) -> DronePlan {
    let grid = map.grid();
    let order = config.scan_order;
    let mut sweep = Sweep::new(config);

    for span in map.spans(order) {
        let (first, len) = sweep.enter(span);
        if first.landing_m() > max_distance {
            return match sweep.last {
                Some(prev) => DronePlan {
                    distance: prev.landing_m(),
                    rest: Some(grid.survey_cell(order, prev.position)),
                },
                None => DronePlan {
                    distance: 0,
                    rest: Some(grid.survey_cell(order, first.position)),
                },
            };
        }

        // landing cost only grows along a bare run
        let spare = max_distance - first.landing_m();
        let steps = match sweep.spacing {
            0 => len - 1,
            spacing => (spare / spacing).min(len - 1),
        };
        let reached = first.advance(steps, sweep.spacing);
        if steps < len - 1 {
            return DronePlan {
                distance: reached.landing_m(),
                rest: Some(grid.survey_cell(order, reached.position)),
            };
        }
        sweep.last = Some(reached);
    }

    DronePlan {
        distance: sweep.total_m(),
        rest: None,
    }
}

/// Computes and caches survey distances for stored estates.
#[derive(Clone)]
pub struct PathPlanner<G> {
    gateway: G,
    config: PlannerConfig,
}

impl<G: EstateGateway> PathPlanner<G> {
    pub fn new(gateway: G, config: PlannerConfig) -> Self {
        Self { gateway, config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Flight distance for a full survey of the estate.
    ///
    /// A stored plan matching the current tree layout is returned as is;
    /// otherwise the distance is derived from a fresh snapshot and stored,
    /// unless on-demand computation is disabled.
    pub async fn compute_flight_distance(&self, estate_id: &EstateId) -> EstateResult<u64> {
        let estate = self.require_estate(estate_id).await?;

        if let Some(plan) = self.gateway.get_flight_distance(estate_id).await? {
            return Ok(plan.distance);
        }
        if !self.config.compute_on_demand {
            return Err(EstateError::NoPlanAvailable(estate_id.clone()));
        }

        let plan = self.derive(&estate).await?;
        if let Err(err) = self.gateway.put_flight_distance(estate_id, &plan).await {
            tracing::warn!(estate_id = %estate_id, "Failed to store drone plan: {}", err);
        }
        Ok(plan.distance)
    }

    /// Recompute and store the plan regardless of any cached value.
    pub async fn refresh_plan(&self, estate_id: &EstateId) -> EstateResult<StoredPlan> {
        let estate = self.require_estate(estate_id).await?;
        let plan = self.derive(&estate).await?;
        self.gateway.put_flight_distance(estate_id, &plan).await?;
        tracing::info!(
            estate_id = %estate_id,
            distance = plan.distance,
            trees = plan.tree_count,
            "Refreshed drone plan"
        );
        Ok(plan)
    }

    /// Survey under a distance budget; see [`plan_within`].
    pub async fn plan_with_limit(
        &self,
        estate_id: &EstateId,
        max_distance: u64,
    ) -> EstateResult<DronePlan> {
        let estate = self.require_estate(estate_id).await?;
        if !self.config.compute_on_demand
            && self.gateway.get_flight_distance(estate_id).await?.is_none()
        {
            return Err(EstateError::NoPlanAvailable(estate_id.clone()));
        }

        let trees = self.gateway.get_trees(estate_id).await?;
        let map = HeightMap::from_trees(EstateGrid::of(&estate), &trees);
        Ok(plan_within(&map, &self.config, max_distance))
    }

    async fn require_estate(&self, estate_id: &EstateId) -> EstateResult<Estate> {
        self.gateway
            .get_estate(estate_id)
            .await?
            .ok_or_else(|| EstateError::EstateNotFound(estate_id.clone()))
    }

    async fn derive(&self, estate: &Estate) -> EstateResult<StoredPlan> {
        let trees = self.gateway.get_trees(&estate.id).await?;
        let map = HeightMap::from_trees(EstateGrid::of(estate), &trees);
        let distance = flight_distance(&map, &self.config);
        tracing::debug!(
            estate_id = %estate.id,
            cells = map.grid().cell_count(),
            trees = trees.len(),
            distance,
            "Derived drone plan"
        );
        Ok(StoredPlan {
            distance,
            tree_count: trees.len() as u64,
            computed_at: Utc::now(),
        })
    }
}
