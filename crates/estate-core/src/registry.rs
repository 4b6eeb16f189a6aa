//! Estate creation and tree placement.

use crate::error::{EstateError, EstateResult};
use crate::gateway::{EstateGateway, GatewayError};
use crate::grid::EstateGrid;
use crate::models::{Cell, Estate, EstateId, NewEstate, NewTree, Tree};

/// Trees must be strictly shorter than this many meters.
pub const MAX_TREE_HEIGHT_M: i64 = 30;

/// Validate a raw height into the accepted `[0, 30)` range.
pub fn validate_height(height: i64) -> EstateResult<u32> {
    if (0..MAX_TREE_HEIGHT_M).contains(&height) {
        Ok(height as u32)
    } else {
        Err(EstateError::InvalidHeight(height))
    }
}

/// Mediates every write that reaches the gateway.
#[derive(Clone)]
pub struct TreeRegistry<G> {
    gateway: G,
}

impl<G: EstateGateway> TreeRegistry<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn create_estate(&self, request: NewEstate) -> EstateResult<Estate> {
        let grid = EstateGrid::new(request.width, request.length)?;
        let estate = self
            .gateway
            .insert_estate(grid.width(), grid.length())
            .await?;
        tracing::info!(
            estate_id = %estate.id,
            width = estate.width,
            length = estate.length,
            "Created estate"
        );
        Ok(estate)
    }

    pub async fn get_estate(&self, estate_id: &EstateId) -> EstateResult<Estate> {
        self.gateway
            .get_estate(estate_id)
            .await?
            .ok_or_else(|| EstateError::EstateNotFound(estate_id.clone()))
    }

    /// Plant a tree.
    ///
    /// The occupancy check is left to the gateway's atomic insert; a prior
    /// read never guarantees the cell is still free.
    pub async fn place_tree(&self, estate_id: &EstateId, request: NewTree) -> EstateResult<Tree> {
        let height = validate_height(request.height)?;
        let estate = self.get_estate(estate_id).await?;
        let cell = EstateGrid::of(&estate).cell(request.x, request.y)?;

        let tree = self
            .gateway
            .insert_tree_if_absent(estate_id, cell.x, cell.y, height)
            .await
            .map_err(|err| placement_error(err, estate_id, cell))?;

        tracing::debug!(
            estate_id = %estate_id,
            tree_id = %tree.id,
            x = tree.x,
            y = tree.y,
            height = tree.height,
            "Planted tree"
        );
        Ok(tree)
    }
}

fn placement_error(err: GatewayError, estate_id: &EstateId, cell: Cell) -> EstateError {
    match err {
        GatewayError::UniquenessConflict => EstateError::PlotOccupied(cell),
        // Estate removed between the lookup and the insert
        GatewayError::ForeignKeyViolation => EstateError::EstateNotFound(estate_id.clone()),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGateway;

    fn registry() -> TreeRegistry<MemoryGateway> {
        TreeRegistry::new(MemoryGateway::new())
    }

    async fn estate(registry: &TreeRegistry<MemoryGateway>, width: i64, length: i64) -> Estate {
        registry
            .create_estate(NewEstate { width, length })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn create_estate_rejects_non_positive_dimensions() {
        let registry = registry();
        let err = registry
            .create_estate(NewEstate {
                width: -1,
                length: -5,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, EstateError::InvalidDimension { .. }));
    }

    #[tokio::test]
    async fn height_bounds_are_enforced() {
        let registry = registry();
        let estate = estate(&registry, 5, 5).await;

        let err = registry
            .place_tree(&estate.id, NewTree { x: 0, y: 0, height: 30 })
            .await
            .unwrap_err();
        assert!(matches!(err, EstateError::InvalidHeight(30)));

        let err = registry
            .place_tree(&estate.id, NewTree { x: 0, y: 0, height: -1 })
            .await
            .unwrap_err();
        assert!(matches!(err, EstateError::InvalidHeight(-1)));

        let tree = registry
            .place_tree(&estate.id, NewTree { x: 0, y: 0, height: 29 })
            .await
            .unwrap();
        assert_eq!(tree.height, 29);
    }

    #[tokio::test]
    async fn height_is_checked_before_the_estate_lookup() {
        let registry = registry();
        let err = registry
            .place_tree(&EstateId::new("nope"), NewTree { x: 0, y: 0, height: 40 })
            .await
            .unwrap_err();
        assert!(matches!(err, EstateError::InvalidHeight(40)));
    }

    #[tokio::test]
    async fn missing_estate_is_not_found() {
        let registry = registry();
        let err = registry
            .place_tree(&EstateId::new("nope"), NewTree { x: 0, y: 0, height: 3 })
            .await
            .unwrap_err();
        assert!(matches!(err, EstateError::EstateNotFound(_)));
    }

    #[tokio::test]
    async fn off_by_one_coordinates_are_out_of_bounds() {
        let registry = registry();
        let estate = estate(&registry, 10, 20).await;

        for (x, y) in [(10, 0), (0, 20), (10, 20), (-1, 0)] {
            let err = registry
                .place_tree(&estate.id, NewTree { x, y, height: 5 })
                .await
                .unwrap_err();
            assert!(matches!(err, EstateError::OutOfBounds { .. }), "({x}, {y})");
        }
    }

    #[tokio::test]
    async fn second_placement_on_a_plot_is_rejected() {
        let registry = registry();
        let estate = estate(&registry, 3, 3).await;

        registry
            .place_tree(&estate.id, NewTree { x: 2, y: 1, height: 10 })
            .await
            .unwrap();
        let err = registry
            .place_tree(&estate.id, NewTree { x: 2, y: 1, height: 12 })
            .await
            .unwrap_err();
        assert!(matches!(err, EstateError::PlotOccupied(Cell { x: 2, y: 1 })));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_placements_leave_one_tree() {
        let gateway = MemoryGateway::new();
        let registry = TreeRegistry::new(gateway.clone());
        let estate = estate(&registry, 4, 4).await;

        let mut handles = Vec::new();
        for height in 0..16 {
            let registry = registry.clone();
            let id = estate.id.clone();
            handles.push(tokio::spawn(async move {
                registry
                    .place_tree(&id, NewTree { x: 1, y: 2, height })
                    .await
            }));
        }

        let mut placed = 0;
        let mut occupied = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => placed += 1,
                Err(EstateError::PlotOccupied(_)) => occupied += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(placed, 1);
        assert_eq!(occupied, 15);
        assert_eq!(gateway.get_trees(&estate.id).await.unwrap().len(), 1);
    }
}
