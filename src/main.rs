//! Kitchen binary entry point.
//!
//! Runs a full workload: place every order on a timed cadence, pick each one
//! up after a randomized delay, then replay the action log into the
//! submission document.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::Mutex;

use kitchen_core::actions::{parse_actions, write_submission, ActionLog};
use kitchen_core::harness;
use kitchen_core::{HarnessConfig, Kitchen, KitchenConfig, Result};

#[derive(Debug, Parser)]
#[command(name = "kitchen", about = "Multi-tier perishable order cache driver")]
struct Args {
    /// JSON file with the order workload; synthetic orders when omitted.
    #[arg(long)]
    orders: Option<PathBuf>,

    /// Number of synthetic orders when no workload file is given.
    #[arg(long, default_value_t = 20)]
    count: usize,

    /// Heater capacity.
    #[arg(long, default_value_t = 6)]
    heater: usize,

    /// Cooler capacity.
    #[arg(long, default_value_t = 6)]
    cooler: usize,

    /// Shelf capacity.
    #[arg(long, default_value_t = 12)]
    shelf: usize,

    /// Shelf decay multiplier for hot/cold orders.
    #[arg(long, default_value_t = 2)]
    decay: u32,

    /// Inverse order rate.
    #[arg(long, default_value = "500ms", value_parser = humantime::parse_duration)]
    rate: Duration,

    /// Minimum pickup delay.
    #[arg(long, default_value = "4s", value_parser = humantime::parse_duration)]
    min: Duration,

    /// Maximum pickup delay.
    #[arg(long, default_value = "8s", value_parser = humantime::parse_duration)]
    max: Duration,

    /// Where to write the submission document; stdout when omitted.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    kitchen_core::observability::init_tracing();

    let orders = match &args.orders {
        Some(path) => harness::load_orders(path)?,
        None => harness::synthetic_orders(args.count),
    };
    tracing::info!(orders = orders.len(), "workload loaded");

    let kitchen_config = KitchenConfig {
        heater_capacity: args.heater,
        cooler_capacity: args.cooler,
        shelf_capacity: args.shelf,
        decay_factor: args.decay,
    };
    let harness_config = HarnessConfig {
        rate: args.rate,
        min_pickup: args.min,
        max_pickup: args.max,
    };

    let (log, buffer) = ActionLog::in_memory();
    let kitchen = Arc::new(Mutex::new(Kitchen::new(kitchen_config, log)));

    let report = harness::run(kitchen, orders, &harness_config).await;
    tracing::info!(
        placed = report.placed,
        rejected = report.rejected,
        delivered = report.delivered,
        expired = report.expired,
        missing = report.missing,
        "workload complete"
    );

    let actions = parse_actions(std::io::Cursor::new(buffer.contents()))?;
    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            write_submission(std::io::BufWriter::new(file), &actions)?;
            tracing::info!(actions = actions.len(), output = %path.display(), "submission written");
        }
        None => write_submission(std::io::stdout().lock(), &actions)?,
    }

    Ok(())
}
