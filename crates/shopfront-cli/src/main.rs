mod export;
mod shop;
mod source;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use shopfront_core::SortMode;
use shopfront_report::{ExportFormat, ReportKind};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopfront")]
#[command(about = "Storefront catalog browser and analyst report exporter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List products through the search, filter and sort pipeline
    Shop {
        /// Read products from a JSON file instead of the API
        #[arg(long)]
        file: Option<PathBuf>,
        /// Case-insensitive substring of the product name
        #[arg(long, default_value = "")]
        search: String,
        /// Exact category name, or "all"
        #[arg(long, default_value = "all")]
        category: String,
        /// Seller name, "platform", or "all"
        #[arg(long, default_value = "all")]
        store: String,
        /// Price range such as "25-50" or "1000-", or a configured preset label
        #[arg(long)]
        price: Option<String>,
        /// ranking, price-low, price-high, rating or reviews
        #[arg(long, default_value = "ranking")]
        sort: SortMode,
        /// Browse as this seller; their own listings are hidden
        #[arg(long)]
        seller_id: Option<i64>,
        /// Maximum number of rows to print
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show the category and store filter options
    Facets {
        /// Read products from a JSON file instead of the API
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Export an analyst report as CSV or Excel
    Export {
        /// sales, products or sellers
        kind: ReportKind,
        /// Read raw report rows from a JSON file instead of the API
        #[arg(long)]
        file: Option<PathBuf>,
        /// First day of the sales window (defaults to one month before --end)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last day of the sales window (defaults to today)
        #[arg(long)]
        end: Option<NaiveDate>,
        /// csv or excel
        #[arg(long, default_value = "csv")]
        format: ExportFormat,
        /// Directory the export file is written to
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = shopfront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = shopfront_core::load_store_settings_or_default(&config.store_path)?;
    tracing::debug!(env = %config.env, api_url = %config.api_url, "configuration loaded");

    match cli.command {
        Commands::Shop {
            file,
            search,
            category,
            store,
            price,
            sort,
            seller_id,
            limit,
        } => {
            let args = shop::ShopArgs {
                search,
                category,
                store,
                price,
                sort,
                seller_id,
                limit,
            };
            let products = source::load_products(file.as_deref(), &config).await?;
            shop::run_shop(products, &args, &settings, &config)?;
        }
        Commands::Facets { file } => {
            let products = source::load_products(file.as_deref(), &config).await?;
            shop::run_facets(products, &settings);
        }
        Commands::Export {
            kind,
            file,
            start,
            end,
            format,
            out,
        } => {
            let args = export::ExportArgs {
                kind,
                file,
                start,
                end,
                format,
                out,
            };
            export::run_export(&args, &settings, &config).await?;
        }
    }

    Ok(())
}
