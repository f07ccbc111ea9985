use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use tv_screener::app::{PriceUseCase, ScreenUseCase};
use tv_screener::config::Config;
use tv_screener::export::export_json;
use tv_screener::infra::{ReqwestPageFetcher, SqlitePriceStore};
use tv_screener::screener::{ScannerClient, ScreenParams};
use tv_screener::server::{start_server, AppState};
use tv_screener::{logging, metrics};

#[derive(Parser)]
#[command(name = "tv_screener")]
#[command(about = "Crypto screener relay and product price tracker")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Default)]
struct Thresholds {
    /// Minimum 24h volume
    #[arg(long)]
    min_volume: Option<f64>,
    /// Maximum market capitalization
    #[arg(long)]
    max_market_cap: Option<f64>,
    /// Minimum year-to-date performance, in percent
    #[arg(long)]
    min_perf_ytd: Option<f64>,
    /// Maximum number of rows
    #[arg(long)]
    limit: Option<usize>,
}

impl From<Thresholds> for ScreenParams {
    fn from(t: Thresholds) -> Self {
        ScreenParams {
            min_volume: t.min_volume,
            max_market_cap: t.max_market_cap,
            min_perf_ytd: t.min_perf_ytd,
            limit: t.limit,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the screen and price routes over HTTP
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run the screen once and print the normalized JSON
    Screen {
        #[command(flatten)]
        thresholds: Thresholds,
    },
    /// Write the export-sized screen to a JSON file
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        thresholds: Thresholds,
    },
    /// Check the product price once and update the history database
    TrackPrice {
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        database: Option<PathBuf>,
    },
}

fn screen_use_case(config: &Config) -> anyhow::Result<ScreenUseCase> {
    let client = ScannerClient::new(&config.screener.base_url, config.screener.timeout())?;
    Ok(ScreenUseCase::new(Arc::new(client), config.normalizer.mode))
}

fn price_use_case(config: &Config, database: Option<PathBuf>) -> anyhow::Result<PriceUseCase> {
    let fetcher = ReqwestPageFetcher::new(
        &config.price.user_agent,
        config.price.timeout(),
        config.price.accept_invalid_certs,
    )?;
    let db_path = database.unwrap_or_else(|| PathBuf::from(&config.price.database_path));
    let store = SqlitePriceStore::open(&db_path)?;
    info!("Opened price history at {}", db_path.display());
    Ok(PriceUseCase::new(Arc::new(fetcher), Arc::new(store)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(metrics_port) = config.server.metrics_port {
                metrics::init_metrics(metrics_port);
            }
            let state = Arc::new(AppState {
                screen: screen_use_case(&config)?,
                price: price_use_case(&config, None)?,
                product_url: config.price.product_url.clone(),
            });
            let port = port.unwrap_or(config.server.port);
            start_server(state, &config.server.host, port).await?;
        }
        Commands::Screen { thresholds } => {
            let query = ScreenParams::from(thresholds).screen_query();
            let value = screen_use_case(&config)?.run(&query).await?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Commands::Export { output, thresholds } => {
            let query = ScreenParams::from(thresholds).export_query();
            let path = output.unwrap_or_else(|| PathBuf::from(&config.export.path));
            let use_case = screen_use_case(&config)?;
            match export_json(&use_case, &query, &path).await {
                Ok(summary) => println!("{}", serde_json::to_string_pretty(&summary)?),
                Err(e) => {
                    error!("Export failed: {}", e);
                    return Err(e.into());
                }
            }
        }
        Commands::TrackPrice { url, database } => {
            let use_case = price_use_case(&config, database)?;
            let url = url.unwrap_or_else(|| config.price.product_url.clone());
            let report = use_case.check(&url).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if report.status_code != 200 {
                anyhow::bail!("price check failed with status {}", report.status_code);
            }
        }
    }
    Ok(())
}
