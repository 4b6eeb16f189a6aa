//! Persistence layer for the estate server.
//!
//! Provides SQLite-backed storage for estates, trees and drone plans behind
//! the core's gateway trait.

pub mod db;
pub mod estates;
pub mod gateway;
pub mod plans;
pub mod trees;

pub use db::{init_database, Database};
pub use gateway::SqliteGateway;
