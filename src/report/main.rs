//! Taxi availability report.
//!
//! Fetches planning areas and live taxi positions, counts taxis per area
//! and prints the busiest areas with a nearby street-level description.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use taxi_areas::config::{Config, DEFAULT_TOP_K};
use taxi_areas::enrich::{ConcurrentEnricher, NominatimClient};
use taxi_areas::sources::{OneMapClient, TaxiAvailabilityClient};
use taxi_areas::Pipeline;

mod render;
use render::render_table;

#[derive(Parser, Debug)]
#[command(name = "taxi-areas")]
#[command(about = "Taxi availability and planning area analysis")]
struct Args {
    /// Number of planning areas to report
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,

    /// Maximum concurrent reverse-geocoding lookups (overrides config)
    #[arg(long)]
    workers: Option<usize>,

    /// Per-lookup timeout in seconds (overrides config)
    #[arg(long)]
    lookup_timeout_secs: Option<u64>,

    /// Optional TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// OneMap API token
    #[arg(long, env = "ONE_MAP_API_TOKEN", hide_env_values = true)]
    one_map_api_token: Option<String>,

    /// data.gov.sg API key
    #[arg(long, env = "DATA_SG_API", hide_env_values = true)]
    data_sg_api: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Credentials may live in .env; clap reads them from the environment
    let dotenv = dotenvy::dotenv();
    let args = Args::parse();

    let pb = ProgressBar::new(0);

    // Initialize logging; RUST_LOG wins over --verbose
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let log_pb = pb.clone();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(move || BarWriter(log_pb.clone()))
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Ignoring .env: {}", e),
    }

    match run(args, pb).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("FATAL ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, pb: ProgressBar) -> Result<()> {
    let one_map_token = args
        .one_map_api_token
        .context("ONE_MAP_API_TOKEN environment variable not set")?;
    let data_sg_key = args
        .data_sg_api
        .context("DATA_SG_API environment variable not set")?;

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(workers) = args.workers {
        config.enrich.workers = workers;
    }
    if let Some(secs) = args.lookup_timeout_secs {
        config.enrich.timeout_secs = secs;
    }
    config.validate().context("Invalid configuration")?;

    info!("Taxi Areas");

    let regions = OneMapClient::new(
        config.sources.planning_area_endpoint()?,
        one_map_token,
        config.sources.planning_area_year,
        config.sources.fetch_timeout(),
    )?;
    let points = TaxiAvailabilityClient::new(
        config.sources.taxi_endpoint()?,
        data_sg_key,
        config.sources.fetch_timeout(),
    )?;
    let lookup = NominatimClient::new(
        config.enrich.reverse_endpoint()?,
        &config.enrich.user_agent,
        config.enrich.timeout(),
    )?;

    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg} {pos}/{len}")?);
    pb.set_message("Fetching data...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let enricher = ConcurrentEnricher::new(lookup, config.enrich.workers, config.enrich.timeout())?
        .with_progress(progress_callback(pb.clone()));

    let pipeline = Pipeline::new(regions, points, enricher);
    let report = pipeline.run(args.top_k).await;
    pb.finish_and_clear();
    let report = report?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_table(&report)?);
    }

    Ok(())
}

/// Mirror enrichment progress onto the spinner
fn progress_callback(pb: ProgressBar) -> impl Fn(usize, usize) + Send + Sync + 'static {
    move |completed, total| {
        pb.set_message("Fetching area descriptions...");
        pb.set_length(total as u64);
        pb.set_position(completed as u64);
    }
}

/// Log writer that hides the progress bar while a line is written
struct BarWriter(ProgressBar);

impl Write for BarWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.suspend(|| io::stderr().write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.suspend(|| io::stderr().flush())
    }
}
