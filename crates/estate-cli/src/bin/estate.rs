//! Command line client for the estate survey service.
//!
//! Usage:
//!   estate create-estate --width 10 --length 20
//!   estate plant-tree <ESTATE_ID> --x 1 --y 2 --height 15
//!   estate stats <ESTATE_ID>
//!   estate drone-plan <ESTATE_ID> [--max-distance 100] [--refresh]

use clap::{Parser, Subcommand};
use estate_sdk::EstateClient;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(author, version, about = "Manage estates and their drone surveys")]
struct Args {
    /// Estate server URL
    #[arg(long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new estate
    CreateEstate {
        #[arg(long)]
        width: i64,
        #[arg(long)]
        length: i64,
    },
    /// Show an estate
    Show { estate_id: String },
    /// Plant a tree on a plot
    PlantTree {
        estate_id: String,
        #[arg(long)]
        x: i64,
        #[arg(long)]
        y: i64,
        #[arg(long)]
        height: i64,
    },
    /// Tree height statistics
    Stats { estate_id: String },
    /// Survey flight distance
    DronePlan {
        estate_id: String,
        /// Stop the survey once this distance is used up
        #[arg(long)]
        max_distance: Option<u64>,
        /// Recompute and store the plan first
        #[arg(long)]
        refresh: bool,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let client = EstateClient::new(&args.url);

    match args.command {
        Command::CreateEstate { width, length } => {
            let id = client.create_estate(width, length).await?;
            println!("{}", id);
        }
        Command::Show { estate_id } => {
            print_json(&client.get_estate(&estate_id).await?)?;
        }
        Command::PlantTree {
            estate_id,
            x,
            y,
            height,
        } => {
            let id = client.plant_tree(&estate_id, x, y, height).await?;
            println!("{}", id);
        }
        Command::Stats { estate_id } => {
            print_json(&client.stats(&estate_id).await?)?;
        }
        Command::DronePlan {
            estate_id,
            max_distance,
            refresh,
        } => {
            if refresh {
                let stored = client.refresh_drone_plan(&estate_id).await?;
                eprintln!(
                    "Stored plan: {} m over {} trees",
                    stored.distance, stored.tree_count
                );
            }
            print_json(&client.drone_plan(&estate_id, max_distance).await?)?;
        }
    }

    Ok(())
}
