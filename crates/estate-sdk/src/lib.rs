//! Estate SDK - client library for the estate survey service.
//!
//! Wraps the REST API in typed calls: create estates, plant trees, read
//! height statistics and drone survey plans.

pub mod client;

pub use client::{ClientError, ClientResult, EstateClient};
pub use estate_core::models::{DronePlan, Estate, EstateStats, NewEstate, NewTree, StoredPlan};
