//! Estate CLI - command line tools for the estate survey service.
//!
//! Binaries:
//! - estate: create estates, plant trees, read stats and drone plans
//! - demo_scenario: seed a random estate and compare the server's plan
//!   with a locally computed one

pub mod scenario;

pub use scenario::{random_plantings, Planting};
