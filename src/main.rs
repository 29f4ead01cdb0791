use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;

use njnom_scraper::apis::nominations::NominationsClient;
use njnom_scraper::config::Config;
use njnom_scraper::domain::NormalizedRow;
use njnom_scraper::export;
use njnom_scraper::geo::{load_municipalities, MunicipalityLookup};
use njnom_scraper::logging;
use njnom_scraper::pipeline::processor::NominationProcessor;

#[derive(Parser)]
#[command(name = "njnom-scraper")]
#[command(about = "Scrapes and normalizes NJ Senate nomination records")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the nominations API and build the table for a target year
    Scrape {
        /// Target calendar year (defaults to the configured year)
        #[arg(long)]
        year: Option<i32>,
        /// Output CSV path
        #[arg(long, default_value = "senate_nominations.csv")]
        out: PathBuf,
    },
    /// Normalize an already-saved JSON payload
    Process {
        /// Path to the payload file
        #[arg(long)]
        input: PathBuf,
        /// Treat the payload as the single merged feed instead of [profiles, actions]
        #[arg(long)]
        merged: bool,
        /// Target calendar year (defaults to the configured year)
        #[arg(long)]
        year: Option<i32>,
        /// Output CSV path
        #[arg(long, default_value = "senate_nominations.csv")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenv::dotenv().ok();
    logging::init_logging();

    let config = Config::load();

    match cli.command {
        Commands::Scrape { year, out } => {
            let year = year.unwrap_or(config.processing.target_year);
            println!("Fetching {year} Senate nominations...");

            let client =
                NominationsClient::new(config.api.base_url.as_str(), config.api.timeout())?;
            let payload = client.fetch_nominations().await;

            let rows = build_processor(&config, year).process_two_feed(&payload);
            finish(&rows, &out)?;
        }
        Commands::Process {
            input,
            merged,
            year,
            out,
        } => {
            let year = year.unwrap_or(config.processing.target_year);
            let payload = read_payload(&input)?;

            let processor = build_processor(&config, year);
            let rows = if merged {
                processor.process_merged_value(&payload)
            } else {
                processor.process_two_feed(&payload)
            };
            finish(&rows, &out)?;
        }
    }

    Ok(())
}

fn read_payload(path: &Path) -> njnom_scraper::common::error::Result<serde_json::Value> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn build_processor(config: &Config, year: i32) -> NominationProcessor {
    let municipalities =
        load_municipalities(Path::new(&config.data.municipalities_path));
    let lookup = MunicipalityLookup::from_municipalities(&municipalities);
    info!("County lookup ready ({} aliases)", lookup.alias_count());
    NominationProcessor::new(lookup, year)
}

fn finish(rows: &[NormalizedRow], out: &Path) -> anyhow::Result<()> {
    export::write_csv(rows, out)?;
    export::print_preview(rows, 5);
    if rows.is_empty() {
        println!("No nominations found.");
    } else {
        println!("Found {} records; full table saved to {}", rows.len(), out.display());
    }
    Ok(())
}
