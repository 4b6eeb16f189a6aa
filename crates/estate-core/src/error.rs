//! Error taxonomy shared by the core components.

use crate::grid::MAX_ESTATE_SIDE;
use crate::models::{Cell, EstateId};
use thiserror::Error;

/// Errors surfaced by the registry and the engines.
#[derive(Error, Debug)]
pub enum EstateError {
    #[error(
        "width and length must be between 1 and {max} (got {width}x{length})",
        max = MAX_ESTATE_SIDE
    )]
    InvalidDimension { width: i64, length: i64 },

    #[error("tree height must be within 0 to 29 meters (got {0})")]
    InvalidHeight(i64),

    #[error("coordinates ({x}, {y}) are outside the {width}x{length} estate")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        length: u32,
    },

    #[error("plot ({}, {}) already has a tree", .0.x, .0.y)]
    PlotOccupied(Cell),

    #[error("estate not found: {0}")]
    EstateNotFound(EstateId),

    #[error("no drone plan available for estate {0}")]
    NoPlanAvailable(EstateId),

    #[error("storage failure: {0}")]
    StorageFailure(String),
}

impl EstateError {
    /// True for errors detected by validation before any storage call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimension { .. } | Self::InvalidHeight(_) | Self::OutOfBounds { .. }
        )
    }

    /// True for outcomes that mean "nothing to return here".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EstateNotFound(_) | Self::NoPlanAvailable(_))
    }
}

pub type EstateResult<T> = Result<T, EstateError>;
