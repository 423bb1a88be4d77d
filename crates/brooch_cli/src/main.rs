//! Operator entry point for the brooch catalog store.
//!
//! # Responsibility
//! - Open the store once, run one maintenance command, close the store.
//! - Keep output as `key=value` lines for quick shell checks.

use brooch_core::{
    default_log_level, init_logging, CatalogStore, Entity, StoreConfig, DB_PATH_ENV,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Maintenance commands for the brooch catalog database.
#[derive(Parser, Debug)]
#[command(name = "brooch_cli", version)]
struct CliArgs {
    /// Database file; created when absent.
    #[arg(long, env = DB_PATH_ENV)]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files. Logging stays off without it.
    #[arg(long)]
    log_dir: Option<String>,

    /// Log level used with `--log-dir`.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Create missing tables and exit.
    Init,
    /// Clear every table, then load the demo catalog.
    SeedFixtures,
    /// Delete all rows from every table.
    Clear,
    /// Print row counts per table.
    Stats,
}

impl CliArgs {
    fn config(&self) -> StoreConfig {
        self.db.clone().map(StoreConfig::new).unwrap_or_default()
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    if let Some(log_dir) = args.log_dir.as_deref() {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(message) = init_logging(level, log_dir) {
            eprintln!("logging disabled: {message}");
        }
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error={message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), String> {
    let config = args.config();
    let mut store = CatalogStore::open(&config).map_err(|err| err.to_string())?;
    println!("db={}", config.db_path.display());

    let outcome = match args.command {
        Command::Init => {
            println!("schema=ok");
            Ok(())
        }
        Command::SeedFixtures => store
            .load_fixture_data()
            .map(|seeded| {
                for entry in seeded {
                    println!(
                        "seeded image_id={} category_id={} product_id={}",
                        entry.image_id, entry.category_id, entry.product_id
                    );
                }
            })
            .map_err(|err| err.to_string()),
        Command::Clear => store
            .clear_tables()
            .map(|()| println!("cleared=ok"))
            .map_err(|err| err.to_string()),
        Command::Stats => print_stats(&store),
    };

    let closed = store.close_connection().map_err(|err| err.to_string());
    outcome.and(closed)
}

fn print_stats(store: &CatalogStore) -> Result<(), String> {
    for entity in Entity::ALL {
        let count = store.row_count(entity).map_err(|err| err.to_string())?;
        println!("{}={count}", entity.table());
    }
    Ok(())
}
