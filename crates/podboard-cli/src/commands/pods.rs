use std::path::PathBuf;

use clap::Args;
use podboard_core::Config;

#[derive(Args)]
pub struct PodsArgs {
    /// Config file with the pod catalog and hours
    #[arg(long, default_value = "podboard.toml")]
    pub config: PathBuf,
}

pub fn run(args: PodsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default(&args.config);
    println!("{}", serde_json::to_string_pretty(config.catalog().pods())?);
    Ok(())
}
