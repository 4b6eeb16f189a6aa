//! Core data models for estates, trees and survey results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque estate identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EstateId(String);

impl EstateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EstateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque tree identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreeId(String);

impl TreeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A rectangular parcel of land. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estate {
    pub id: EstateId,
    /// Extent along x (number of columns)
    pub width: u32,
    /// Extent along y (number of rows)
    pub length: u32,
    pub created_at: DateTime<Utc>,
}

/// A tree occupying exactly one cell of an estate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub id: TreeId,
    pub estate_id: EstateId,
    pub x: u32,
    pub y: u32,
    /// Height in whole meters, always below 30
    pub height: u32,
    pub created_at: DateTime<Utc>,
}

/// Request to create an estate.
///
/// Dimensions are signed so that negative input reaches validation
/// instead of failing deserialization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NewEstate {
    pub width: i64,
    pub length: i64,
}

/// Request to plant a tree on an estate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NewTree {
    pub x: i64,
    pub y: i64,
    pub height: i64,
}

/// Aggregate tree-height statistics for one estate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstateStats {
    pub count: u64,
    #[serde(rename = "max")]
    pub max_height: u32,
    #[serde(rename = "min")]
    pub min_height: u32,
    #[serde(rename = "median")]
    pub median_height: u32,
}

/// A grid cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Result of a survey flight computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DronePlan {
    pub distance: u64,
    /// Cell where a distance-limited flight lands; absent when the full
    /// survey fits within the limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<Cell>,
}

/// A persisted flight distance together with the snapshot it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPlan {
    pub distance: u64,
    /// Number of trees in the snapshot; trees are append-only, so this
    /// doubles as a version of the estate's tree layout.
    pub tree_count: u64,
    pub computed_at: DateTime<Utc>,
}
