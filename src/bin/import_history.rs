//! Backfill the draw archive from a JSON export of past 2D results.
//!
//! The file holds an array of records in the same shape the
//! `/api/twodhistory` endpoints use. The archive database is taken from the
//! usual `LOTTERY_LIVE__DATABASE__*` settings.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lottery_live::adapters::history::{connect, PostgresHistoryRepository};
use lottery_live::application::{ImportHistoryCommand, ImportHistoryHandler};
use lottery_live::config::AppConfig;
use lottery_live::domain::lottery::HistoryRecord;

#[derive(Parser, Debug)]
#[command(author, version, about = "Imports past 2D results into the draw archive", long_about = None)]
struct Args {
    /// JSON file containing an array of history records.
    #[arg(short, long, env = "LOTTERY_LIVE_IMPORT_FILE", default_value = "import-2d-data.json")]
    file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = AppConfig::load()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    config.validate()?;
    let database = config
        .database
        .as_ref()
        .ok_or("LOTTERY_LIVE__DATABASE__URL must be set to import history")?;

    let bytes = tokio::fs::read(&args.file).await?;
    let records: Vec<HistoryRecord> = serde_json::from_slice(&bytes)?;
    tracing::info!(file = %args.file.display(), records = records.len(), "Loaded history export");

    let pool = connect(database).await?;
    let handler = ImportHistoryHandler::new(Arc::new(PostgresHistoryRepository::new(pool)));
    let report = handler.handle(ImportHistoryCommand { records }).await;

    println!("Import completed");
    println!("  inserted:          {}", report.inserted);
    println!("  already present:   {}", report.already_present);
    println!("  skipped (no noon): {}", report.skipped_incomplete);
    println!("  invalid:           {}", report.invalid);
    println!("  failed:            {}", report.failed);
    println!("  total processed:   {}", report.processed());

    if report.failed > 0 {
        return Err(format!("{} records could not be imported", report.failed).into());
    }
    Ok(())
}
