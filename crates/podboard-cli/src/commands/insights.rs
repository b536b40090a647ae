use std::path::PathBuf;

use clap::Args;
use podboard_core::{compute_insights, Config};

#[derive(Args)]
pub struct InsightsArgs {
    /// Booking list to summarize (JSON array); empty store when omitted
    #[arg(long)]
    pub bookings: Option<PathBuf>,
    /// Config file with the pod catalog and hours
    #[arg(long, default_value = "podboard.toml")]
    pub config: PathBuf,
}

pub fn run(args: InsightsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default(&args.config);
    let store = super::load_store(args.bookings.as_deref())?;

    // One-shot runs have no session history, so no duplicate attempts.
    let snapshot = compute_insights(&store, &config.catalog(), 0);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
