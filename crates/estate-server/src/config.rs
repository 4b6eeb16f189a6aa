//! Server configuration from environment.

use estate_core::{PlannerConfig, ScanOrder};
use std::env;

/// Which gateway implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

impl StorageBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "sqlite" | "sql" | "db" => Some(Self::Sqlite),
            "memory" | "mem" | "inmemory" => Some(Self::Memory),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub storage: StorageBackend,
    pub database_path: String,
    pub database_max_connections: u32,
    pub planner: PlannerConfig,
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = PlannerConfig::default();
        Self {
            server_port: parse_env("ESTATE_PORT").unwrap_or(3000),
            storage: env::var("ESTATE_STORAGE")
                .ok()
                .and_then(|s| StorageBackend::parse(&s))
                .unwrap_or(StorageBackend::Sqlite),
            database_path: env::var("ESTATE_DATABASE_PATH")
                .unwrap_or_else(|_| "data/estates.db".to_string()),
            database_max_connections: parse_env("ESTATE_DATABASE_MAX_CONNECTIONS").unwrap_or(5),
            planner: PlannerConfig {
                clearance_m: parse_env("ESTATE_PLAN_CLEARANCE_M").unwrap_or(defaults.clearance_m),
                cell_spacing_m: parse_env("ESTATE_PLAN_CELL_SPACING_M")
                    .unwrap_or(defaults.cell_spacing_m),
                scan_order: env::var("ESTATE_PLAN_SCAN_ORDER")
                    .ok()
                    .and_then(|s| s.parse::<ScanOrder>().ok())
                    .unwrap_or(defaults.scan_order),
                compute_on_demand: env::var("ESTATE_PLAN_ON_DEMAND")
                    .ok()
                    .and_then(|s| parse_bool(&s))
                    .unwrap_or(defaults.compute_on_demand),
            },
            log_json: env::var("ESTATE_LOG_JSON")
                .ok()
                .and_then(|s| parse_bool(&s))
                .unwrap_or(false),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_backend_aliases() {
        assert_eq!(StorageBackend::parse("SQLite"), Some(StorageBackend::Sqlite));
        assert_eq!(StorageBackend::parse(" memory "), Some(StorageBackend::Memory));
        assert_eq!(StorageBackend::parse("postgres"), None);
    }

    #[test]
    fn bool_flags() {
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
