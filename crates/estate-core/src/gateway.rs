//! Storage boundary consumed by the core.
//!
//! Implementations translate driver-specific failures into [`GatewayError`]
//! so the core only ever sees named outcomes.

use crate::error::EstateError;
use crate::models::{Estate, EstateId, StoredPlan, Tree};
use std::future::Future;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// A tree already occupies the requested cell.
    #[error("uniqueness conflict")]
    UniquenessConflict,

    /// The referenced estate does not exist.
    #[error("foreign key violation")]
    ForeignKeyViolation,

    #[error("{0}")]
    Storage(String),
}

impl GatewayError {
    pub fn storage(err: impl std::fmt::Display) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<GatewayError> for EstateError {
    fn from(err: GatewayError) -> Self {
        EstateError::StorageFailure(err.to_string())
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Durable store of estates, trees and derived plans.
///
/// Every read returns fully committed records. `insert_tree_if_absent` must
/// be atomic with respect to the `(estate_id, x, y)` uniqueness check.
pub trait EstateGateway: Clone + Send + Sync + 'static {
    fn get_estate(
        &self,
        id: &EstateId,
    ) -> impl Future<Output = GatewayResult<Option<Estate>>> + Send;

    /// All trees of an estate, in no particular order.
    fn get_trees(&self, id: &EstateId) -> impl Future<Output = GatewayResult<Vec<Tree>>> + Send;

    /// Persist a new estate and allocate its id.
    fn insert_estate(
        &self,
        width: u32,
        length: u32,
    ) -> impl Future<Output = GatewayResult<Estate>> + Send;

    /// Insert a tree unless its cell is taken.
    fn insert_tree_if_absent(
        &self,
        estate_id: &EstateId,
        x: u32,
        y: u32,
        height: u32,
    ) -> impl Future<Output = GatewayResult<Tree>> + Send;

    /// The stored plan for an estate, only if it matches the current tree layout.
    fn get_flight_distance(
        &self,
        id: &EstateId,
    ) -> impl Future<Output = GatewayResult<Option<StoredPlan>>> + Send;

    fn put_flight_distance(
        &self,
        id: &EstateId,
        plan: &StoredPlan,
    ) -> impl Future<Output = GatewayResult<()>> + Send;
}
