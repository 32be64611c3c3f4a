use clap::{Parser, Subcommand};
use sever_cli::commands;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "headless driver for sever encounters")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted fight against an encounter definition
    Simulate {
        /// Path to the encounter TOML
        path: String,
        /// RNG seed for a reproducible fight
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Fixed tick length in seconds
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,
        /// Scripted player damage per second
        #[arg(long, default_value_t = 40.0)]
        dps: f32,
        /// Let every thread-break QTE time out
        #[arg(long)]
        fail_qtes: bool,
        /// Give up after this much simulated time
        #[arg(long, default_value_t = 600.0)]
        max_secs: f32,
    },
    /// Validate an encounter definition without running it
    Validate {
        /// Path to the encounter TOML, or a directory of them
        path: String,
    },
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Simulate {
            path,
            seed,
            dt,
            dps,
            fail_qtes,
            max_secs,
        } => commands::simulate(&path, seed, dt, dps, fail_qtes, max_secs),
        Commands::Validate { path } => commands::validate(&path),
    }
}
