use clap::{Parser, Subcommand};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "podboard-cli", version, about = "Study pod booking CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive booking shell
    Shell(commands::shell::ShellArgs),
    /// Show the pod catalog
    Pods(commands::pods::PodsArgs),
    /// Validate a booking request without booking it
    Check(commands::check::CheckArgs),
    /// Compute insights over a booking list
    Insights(commands::insights::InsightsArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Shell(args) => commands::shell::run(args),
        Commands::Pods(args) => commands::pods::run(args),
        Commands::Check(args) => commands::check::run(args),
        Commands::Insights(args) => commands::insights::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
