use std::path::PathBuf;

use clap::Args;
use podboard_core::{parse_student_ids, BookingRequest, Config, RuleEngine};

#[derive(Args)]
pub struct CheckArgs {
    /// Pod id, e.g. POD-A
    pub pod: String,
    /// Slot time, HH:MM
    pub time: String,
    /// Comma-separated student IDs
    pub students: String,
    /// Validate against an existing booking list (JSON array)
    #[arg(long)]
    pub bookings: Option<PathBuf>,
    /// Config file with the pod catalog and hours
    #[arg(long, default_value = "podboard.toml")]
    pub config: PathBuf,
}

pub fn run(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default(&args.config);
    let catalog = config.catalog();
    let store = super::load_store(args.bookings.as_deref())?;

    let request = BookingRequest::new(&args.pod, &args.time, parse_student_ids(&args.students));
    let report = RuleEngine::new(&catalog, &config.hours).validate(&request, &store);

    if report.is_valid() {
        println!("ok: {} at {} is bookable", args.pod, args.time);
        return Ok(());
    }
    for message in report.messages() {
        println!("violation: {message}");
    }
    Err(format!("{} rule violation(s)", report.violations.len()).into())
}
