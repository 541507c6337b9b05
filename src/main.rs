use std::error::Error;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::{info, warn};

use chartmatch::config::{load_config_file, Settings};
use chartmatch::data::chart_entry::fill_missing_images;
use chartmatch::data::Chart;
use chartmatch::helpers::chart_date::ChartKind;
use chartmatch::helpers::chart_store::{load_entries, ChartStore};
use chartmatch::helpers::http_client::new_http_client;
use chartmatch::helpers::preview::PreviewClient;
use chartmatch::helpers::spotify::{acquire_access_token, SpotifySearchClient};
use chartmatch::logging;
use chartmatch::matching::normalizer::split_artists;
use chartmatch::matching::Resolver;

#[derive(Parser, Debug)]
#[command(name = "chartmatch")]
#[command(author, version, about = "Attach catalog tracks and previews to chart entries", long_about = None)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve every entry of a scraped chart and store the result
    Resolve {
        /// Chart the input belongs to
        #[arg(short, long, value_enum)]
        kind: ChartKind,

        /// Chart rows as produced by the scraper
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Directory holding latest and archived charts
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,

        /// Reference date for the chart date (defaults to today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },
    /// Resolve a single title/artist pair and print the result
    Query {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        artist: String,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_json(&load_config_file(path)?)?,
        None => Settings::from_json(&serde_json::Value::Null)?,
    };
    logging::initialize_logging(&settings.logging, cli.debug)?;

    // One token per run, shared by every search
    let auth_client = new_http_client(settings.http_timeout_secs);
    let context = acquire_access_token(auth_client.as_ref(), &settings.spotify)?;

    let search = SpotifySearchClient::new(
        new_http_client(settings.http_timeout_secs),
        context,
        settings.spotify.clone(),
    );
    let preview = PreviewClient::new(new_http_client(settings.http_timeout_secs), settings.preview.clone());
    let resolver = Resolver::with_tables(&search, &preview, settings.normalizer(), settings.aliases.clone());

    match cli.command {
        Commands::Resolve {
            kind,
            input,
            output_dir,
            date,
        } => {
            let mut entries = load_entries(&input)?;
            info!("Loaded {} {} chart entries from {}", entries.len(), kind.display_name(), input.display());

            if let Some(image) = kind.default_image() {
                fill_missing_images(&mut entries, image);
            }

            let today = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let chart_date = kind.chart_date(today);

            let resolved = resolver.resolve_entries(entries);
            let unmatched = resolved.iter().filter(|e| e.spotify_data.is_none()).count();
            if unmatched > 0 {
                warn!("{} of {} entries could not be matched", unmatched, resolved.len());
            }

            let chart = Chart {
                date: chart_date.to_string(),
                entries: resolved,
            };
            let path = ChartStore::new(&output_dir).save(kind, &chart)?;
            println!("{}", path.display());
        }
        Commands::Query { title, artist } => {
            info!("Querying '{}' by {}", title, split_artists(&artist).join(", "));
            let report = resolver.resolve_detailed(&title, &artist)?;
            info!(
                "Evaluated {} of {} candidates",
                report.candidates_evaluated, report.candidates_total
            );
            println!("{}", serde_json::to_string_pretty(&report.resolution)?);
        }
    }

    Ok(())
}
