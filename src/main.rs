mod csv_log;
mod fetch;
mod parser;
mod pipeline;
mod record;
mod settings;
mod store;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::csv_log::CsvLog;
use crate::fetch::{FileSource, HttpSource};
use crate::pipeline::{Pipeline, Reading};
use crate::record::Record;
use crate::settings::{Settings, StoreKind};
use crate::store::{Backend, DirStore, S3Store};

#[derive(Parser)]
#[command(
    name = "defesa_civil_tracker",
    about = "Append Defesa Civil RS flood bulletin figures to a CSV log"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the bulletin, extract the figures and append them to the log (default)
    Run,
    /// Fetch and print the extracted figures without touching the log
    Extract {
        /// Read the page from a saved HTML file instead of the network
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Print the most recent rows of the log
    Show {
        /// Number of rows to display
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let settings = Settings::load()?;
            let log = open_log(&settings).await?;
            let pipeline = Pipeline::new(HttpSource::new(&settings.source_url), log);

            let outcome = pipeline.run().await?;
            info!(
                "Run finished with status {} in {:.1}s",
                outcome.status_code,
                t0.elapsed().as_secs_f64()
            );
            println!("{}", serde_json::to_string(&outcome)?);
            if !outcome.is_success() {
                std::process::exit(1);
            }
        }
        Commands::Extract { file } => {
            let reading = match file {
                Some(path) => pipeline::read_page(&FileSource::new(path)).await?,
                None => {
                    let settings = Settings::load()?;
                    pipeline::read_page(&HttpSource::new(&settings.source_url)).await?
                }
            };
            match reading {
                Reading::Record(record) => print_summary(&record),
                Reading::FetchFailed(status) => {
                    println!("Failed to retrieve the webpage. Status code: {}", status);
                    std::process::exit(1);
                }
            }
        }
        Commands::Show { limit } => {
            let settings = Settings::load()?;
            let log = open_log(&settings).await?;
            match log.read_table().await? {
                None => println!("Log {} does not exist yet.", log.key()),
                Some(table) => {
                    let skip = table.rows.len().saturating_sub(limit);
                    println!("{}", table.header.join(" | "));
                    println!("{}", "-".repeat(100));
                    for row in &table.rows[skip..] {
                        println!("{}", row.join(" | "));
                    }
                    println!("\n{} rows in {}", table.rows.len(), log.key());
                }
            }
        }
    }

    Ok(())
}

async fn open_log(settings: &Settings) -> anyhow::Result<CsvLog<Backend>> {
    let backend = match settings.log_store {
        StoreKind::S3 => {
            let bucket = settings
                .bucket()
                .ok_or_else(|| anyhow::anyhow!("bucket_name is not set"))?;
            Backend::S3(S3Store::from_env(bucket).await)
        }
        StoreKind::Dir => Backend::Dir(DirStore::new(&settings.log_store_dir)),
    };
    let description = backend.describe();
    let log = CsvLog::new(
        backend,
        settings.object_key.clone(),
        settings.scratch_path.clone(),
    );
    info!(
        "Log store: {}/{} (scratch {})",
        description,
        log.key(),
        log.scratch().display()
    );
    Ok(log)
}

fn print_summary(record: &Record) {
    println!("Bulletin read at {}", record.timestamp());
    for (indicator, value) in record.fields() {
        println!("{:<24} {}", format!("{}:", indicator.column()), value);
    }
}
