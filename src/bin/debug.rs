//! Hospital Hub debug scripts
//!
//! One-shot maintenance against the debug database. Every subcommand opens
//! the database, does its one job, and disconnects.

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use hospital_hub::scripts::{
    inspect_hospital, list_hospitals, run_script, seed_demo_data, toggle_first_verification,
};
use hospital_hub::Config;

#[derive(Parser)]
#[command(name = "hospital-debug")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect and patch hospital records in the debug database")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// SQLite database file (overrides config and HOSPITAL_HUB_DATABASE)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one hospital with its manager and ratings
    Inspect {
        /// Hospital id
        id: String,
    },

    /// Flip the verification flag of the first hospital
    ToggleVerified,

    /// List all hospitals
    List,

    /// Insert demo data into an empty database
    Seed,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Config::load_reported(path)?,
        None => Config::discover(),
    };
    hospital_hub::logging::init_logging(&loaded.config.logging);
    loaded.report();
    let config = loaded.config;

    let path = cli
        .database
        .unwrap_or_else(|| PathBuf::from(&config.database.path));
    tracing::info!(path = ?path, "Using database");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Inspect { id } => {
            run_script(&path, |db| inspect_hospital(db, &id, &mut out))?;
        }
        Commands::ToggleVerified => {
            run_script(&path, |db| toggle_first_verification(db, &mut out))?;
        }
        Commands::List => {
            run_script(&path, |db| list_hospitals(db, &mut out))?;
        }
        Commands::Seed => {
            run_script(&path, |db| seed_demo_data(db, &mut out))?;
        }
    }

    out.flush()?;
    Ok(())
}
