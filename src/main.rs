//! Fitlog CLI - HTTP API server and local data tooling.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fitlog::app;
use fitlog::infra::init_db;

#[derive(Parser)]
#[command(name = "fitlog")]
#[command(version = "0.1.0")]
#[command(about = "Personal strength training log")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Insert mock workouts for development
    Seed {
        /// Number of workouts to generate
        #[arg(short, long, default_value = "10")]
        count: u32,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Delete all recorded workouts and lifts
    Wipe {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Print all data as a JSON export
    Export {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Import data from a JSON export file
    Import {
        /// Path to the export file
        #[arg(short, long)]
        file: PathBuf,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

fn default_db_path() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("fitlog").join("fitlog.db")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Serve { port, database } => {
            let db_path = database.unwrap_or_else(default_db_path);
            tracing::info!("DB path: {:?}", db_path);
            let pool = init_db(&db_path)?;
            fitlog::api::start_server(port, pool).await?;
        }
        Commands::Seed { count, database } => {
            let pool = init_db(&database.unwrap_or_else(default_db_path))?;
            let created = app::seed_mock_data(&pool, count)?;
            for w in &created {
                println!(
                    "{}: {} lifts ({} -> {})",
                    w.day,
                    w.lifts.len(),
                    w.mood_in,
                    w.mood_out
                );
            }
            println!("Inserted {} mock workouts", created.len());
        }
        Commands::Wipe { database } => {
            let pool = init_db(&database.unwrap_or_else(default_db_path))?;
            app::wipe_all(&pool)?;
            println!("All workout data deleted");
        }
        Commands::Export { database } => {
            let pool = init_db(&database.unwrap_or_else(default_db_path))?;
            println!("{}", app::export_json_string(&pool)?);
        }
        Commands::Import { file, database } => {
            let pool = init_db(&database.unwrap_or_else(default_db_path))?;
            let json = std::fs::read_to_string(&file)?;
            let result = app::import_json_string(&pool, &json)?;
            println!(
                "Imported {} workouts ({} lifts), skipped {} duplicates",
                result.workouts, result.lifts, result.skipped_duplicates
            );
        }
    }

    Ok(())
}
