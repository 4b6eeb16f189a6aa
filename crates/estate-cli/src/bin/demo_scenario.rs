//! Demo scenario - seed a random estate and survey it.
//!
//! Creates an estate, plants random trees on distinct plots, then checks
//! that the server's stats and drone plan agree with a local computation.
//!
//! Usage:
//!   cargo run -p estate-cli --bin demo_scenario -- --width 8 --length 5 --trees 12

use anyhow::{bail, Context};
use clap::Parser;
use estate_cli::scenario::{height_map, random_plantings};
use estate_core::{flight_distance, plan_within, summarize_heights, EstateGrid, PlannerConfig};
use estate_sdk::EstateClient;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser, Debug)]
#[command(author, version, about = "Seed a random estate and compare its survey plan")]
struct Args {
    /// Estate server URL
    #[arg(long, default_value = "http://localhost:3000")]
    url: String,

    #[arg(long, default_value_t = 8)]
    width: i64,

    #[arg(long, default_value_t = 5)]
    length: i64,

    /// Number of trees to plant
    #[arg(long, default_value_t = 12)]
    trees: usize,

    /// RNG seed for a reproducible layout
    #[arg(long)]
    seed: Option<u64>,

    /// Distance budget for the partial survey
    #[arg(long)]
    budget: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let grid = EstateGrid::new(args.width, args.length).context("invalid estate size")?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let client = EstateClient::new(&args.url);
    println!("Connecting to estate server at {}...", client.base_url());

    let estate_id = client.create_estate(args.width, args.length).await?;
    println!("Created estate {} ({}x{})", estate_id, args.width, args.length);

    let plantings = random_plantings(&mut rng, grid, args.trees);
    for p in &plantings {
        client.plant_tree(&estate_id, p.x, p.y, p.height).await?;
        println!("  planted ({}, {}) height {}", p.x, p.y, p.height);
    }

    // Server planner runs with defaults unless configured otherwise.
    let config = PlannerConfig::default();
    let map = height_map(grid, &plantings);
    let heights: Vec<u32> = plantings.iter().map(|p| p.height as u32).collect();
    let expected_stats = summarize_heights(&heights);
    let expected_distance = flight_distance(&map, &config);

    let stats = client.stats(&estate_id).await?;
    println!(
        "Stats: count={} min={} max={} median={}",
        stats.count, stats.min_height, stats.max_height, stats.median_height
    );
    if stats != expected_stats {
        bail!("stats mismatch: server {:?}, local {:?}", stats, expected_stats);
    }

    let plan = client.drone_plan(&estate_id, None).await?;
    println!(
        "Drone plan: {} m (local {} m)",
        plan.distance, expected_distance
    );
    if plan.distance != expected_distance {
        eprintln!("Server planner config differs from defaults; skipping budget check");
        return Ok(());
    }

    let budget = args.budget.unwrap_or(expected_distance / 2);
    let partial = client.drone_plan(&estate_id, Some(budget)).await?;
    let local = plan_within(&map, &config, budget);
    match partial.rest {
        Some(cell) => println!(
            "With a {} m budget the drone rests at ({}, {}) after {} m",
            budget, cell.x, cell.y, partial.distance
        ),
        None => println!("A {} m budget covers the whole survey", budget),
    }
    if partial != local {
        bail!("budget plan mismatch: server {:?}, local {:?}", partial, local);
    }

    println!("Demo complete.");
    Ok(())
}
