//! stockroom - terminal front-end for the inventory console
//!
//! Commands:
//! - `stockroom list` - Show a page of products
//! - `stockroom metrics` - Show category metrics for the page
//! - `stockroom create` - Create a product
//! - `stockroom update` - Edit a product on the page
//! - `stockroom delete` - Delete a product on the page
//! - `stockroom out-of-stock` / `in-stock` - Toggle stock

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use stockroom_console::format::{metrics_table, products_table};
use stockroom_console::logger::init_logger;
use stockroom_console::shared::{
    Availability, Decimal, FilterCriteria, PaginationCursor, Product, Sort, offered_page_size,
};
use stockroom_console::{
    AppState, Console, ConsoleConfig, MutationOutcome, RefreshOutcome, TerminalPrompt,
};

/// Inventory console for the Stockroom product service
#[derive(Parser)]
#[command(name = "stockroom")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Product service base URL
    #[arg(long, global = true, env = "STOCKROOM_API_URL")]
    api_url: Option<String>,

    /// Write daily log files to this directory
    #[arg(long, global = true, env = "STOCKROOM_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    view: ViewArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Filters and cursor applied before the command runs
#[derive(Args)]
struct ViewArgs {
    /// Name substring
    #[arg(long, global = true, default_value = "")]
    name: String,

    /// Category to include, repeatable; "All" for every category
    #[arg(long = "category", global = true)]
    categories: Vec<String>,

    /// All, "In stock" or "Out of stock"
    #[arg(long, global = true, default_value_t = Availability::All)]
    availability: Availability,

    /// Zero-based page index
    #[arg(long, global = true, default_value_t = 0)]
    page: u32,

    /// Rows per page, 5 or 10
    #[arg(long, global = true, env = "STOCKROOM_PAGE_SIZE", value_parser = parse_page_size)]
    page_size: Option<u32>,

    /// Sort as field or field,asc|desc
    #[arg(long, global = true)]
    sort: Option<Sort>,
}

fn parse_page_size(value: &str) -> Result<u32, String> {
    let size: u32 = value.parse().map_err(|e| format!("{e}"))?;
    offered_page_size(size)
        .map(|size| size.get())
        .map_err(|e| e.to_string())
}

#[derive(Subcommand)]
enum Commands {
    /// Show a page of products
    List,

    /// Show category metrics for the current page
    Metrics,

    /// Create a product
    Create(CreateArgs),

    /// Edit a product on the current page
    Update(UpdateArgs),

    /// Delete a product on the current page
    Delete {
        id: i64,
        /// Skip the confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Mark a product out of stock
    OutOfStock { id: i64 },

    /// Restock a product
    InStock {
        id: i64,
        /// Defaults to STOCKROOM_RESTOCK_QUANTITY
        #[arg(long)]
        quantity: Option<i64>,
    },
}

#[derive(Args)]
struct CreateArgs {
    #[arg(long = "product-name")]
    product_name: String,
    #[arg(long = "product-category")]
    product_category: String,
    #[arg(long)]
    price: Decimal,
    #[arg(long)]
    stock: i64,
    /// YYYY-MM-DD
    #[arg(long)]
    expires: Option<NaiveDate>,
}

#[derive(Args)]
struct UpdateArgs {
    id: i64,
    #[arg(long = "product-name")]
    product_name: Option<String>,
    #[arg(long = "product-category")]
    product_category: Option<String>,
    #[arg(long)]
    price: Option<Decimal>,
    #[arg(long)]
    stock: Option<i64>,
    #[arg(long)]
    expires: Option<NaiveDate>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = ConsoleConfig::from_env()?;
    if let Some(url) = cli.api_url.clone() {
        config.api_base_url = url;
    }
    if let Some(size) = cli.view.page_size {
        config.page_size = size;
    }
    if let Some(dir) = cli.log_dir.clone() {
        config.log_dir = Some(dir);
    }

    let _log_guard = init_logger(config.log_level.as_deref(), config.log_dir.as_deref())
        .context("Failed to initialize logging")?;
    tracing::info!(api = %config.api_base_url, "Starting stockroom");

    let assume_yes = matches!(cli.command, Commands::Delete { yes: true, .. });
    let client = config
        .client_config()
        .build_http_client()
        .context("Failed to build HTTP client")?;
    let console = Console::new(
        Arc::new(client),
        Arc::new(TerminalPrompt::new().assume_yes(assume_yes)),
        &config,
    )?;

    let ok = run(&cli, &console).await?;
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Load the requested view, run the command, print the result.
/// Returns `false` when a failure was reported to the user.
async fn run(cli: &Cli, console: &Console) -> Result<bool> {
    let view = &cli.view;
    let filter = FilterCriteria::from_selection(&view.name, view.categories.clone(), view.availability);
    let current = console.snapshot().await.cursor;
    let cursor = PaginationCursor {
        page: view.page,
        sort: view.sort,
        ..current
    };
    if console.set_view(filter, cursor).await == RefreshOutcome::Failed {
        return Ok(false);
    }

    let outcome = match &cli.command {
        Commands::List | Commands::Metrics => None,
        Commands::Create(args) => {
            let mut product = Product::new(
                &args.product_name,
                &args.product_category,
                args.price,
                args.stock,
            );
            if let Some(date) = args.expires {
                product = product.with_expiration_date(date);
            }
            Some(console.create_product(product).await?)
        }
        Commands::Update(args) => {
            let mut edited = console.edit(args.id).await?;
            if let Some(name) = &args.product_name {
                edited.name = name.clone();
            }
            if let Some(category) = &args.product_category {
                edited.category = category.clone();
            }
            if let Some(price) = args.price {
                edited.unit_price = price;
            }
            if let Some(stock) = args.stock {
                edited.stock_quantity = stock;
            }
            if let Some(date) = args.expires {
                edited.expiration_date = Some(date);
            }
            Some(console.update_product(args.id, edited).await?)
        }
        Commands::Delete { id, .. } => Some(console.delete_product(*id).await?),
        Commands::OutOfStock { id } => Some(console.mark_out_of_stock(*id).await?),
        Commands::InStock { id, quantity } => Some(console.mark_in_stock(*id, *quantity).await?),
    };

    let state = console.snapshot().await;
    print_state(&cli.command, &state, cli.json)?;
    Ok(outcome != Some(MutationOutcome::RolledBack))
}

fn print_state(command: &Commands, state: &AppState, json: bool) -> Result<()> {
    let show_products = !matches!(command, Commands::Metrics);
    let show_metrics = !matches!(command, Commands::List);

    if json {
        let mut out = serde_json::Map::new();
        if show_products {
            out.insert("products".into(), serde_json::to_value(&state.page.products)?);
            out.insert("totalElements".into(), state.page.total_elements.into());
        }
        if show_metrics {
            out.insert("metrics".into(), serde_json::to_value(&state.metrics)?);
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if show_products {
        print!("{}", products_table(state));
    }
    if show_products && show_metrics {
        println!();
    }
    if show_metrics {
        print!("{}", metrics_table(&state.metrics));
    }
    Ok(())
}
