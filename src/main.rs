use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use storefront::application::checkout::CheckoutConfig;
use storefront::application::session::StorefrontSession;
use storefront::domain::filter::{self, DEFAULT_PRICE_MAX, FilterSpec, QueryParams, SortOption};
use storefront::domain::ports::{CartStoreBox, CheckoutBackendRef};
use storefront::infrastructure::in_memory::{InMemoryCartStore, InMemoryProductRepository};
use storefront::infrastructure::simulated::SimulatedCheckoutBackend;
use storefront::interfaces::csv::action_reader::ActionReader;
use storefront::interfaces::csv::cart_writer::CartWriter;
use storefront::interfaces::csv::product_writer::ProductWriter;
use storefront::interfaces::json::catalog_reader::CatalogReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Emit logs as JSON lines instead of human-readable text
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct CatalogArgs {
    /// Catalog JSON file with `products` and `categories`
    #[arg(long, env = "STOREFRONT_CATALOG")]
    catalog: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Print the product listing for a set of filters as CSV
    Browse {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Category slug to restrict the listing to
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive text matched against name and description
        #[arg(long)]
        search: Option<String>,

        /// Inclusive upper price bound
        #[arg(long, default_value_t = DEFAULT_PRICE_MAX)]
        max_price: Decimal,

        /// newest, price-asc, price-desc or rating
        #[arg(long, default_value_t = SortOption::Newest)]
        sort: SortOption,
    },
    /// Replay a CSV of shopper actions and print the resulting cart as CSV
    Session {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Actions CSV file (action, product, size, color, quantity)
        actions: PathBuf,

        /// Path to persistent cart database (optional). If provided, uses RocksDB.
        #[arg(long)]
        db_path: Option<PathBuf>,

        /// Simulated checkout round trip in milliseconds
        #[arg(long, default_value_t = 1000)]
        checkout_delay_ms: u64,
    },
}

fn init_tracing(json: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "storefront=info".into());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.with_ansi(io::stderr().is_terminal()).init();
    }
}

#[cfg(feature = "storage-rocksdb")]
fn cart_store(db_path: Option<PathBuf>) -> Result<CartStoreBox> {
    use storefront::infrastructure::rocksdb::RocksDbCartStore;

    match db_path {
        Some(path) => {
            let store = RocksDbCartStore::open(path).into_diagnostic()?;
            Ok(Box::new(store))
        }
        None => Ok(Box::new(InMemoryCartStore::new())),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn cart_store(db_path: Option<PathBuf>) -> Result<CartStoreBox> {
    if db_path.is_some() {
        warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
        );
    }
    Ok(Box::new(InMemoryCartStore::new()))
}

fn browse(catalog: PathBuf, spec: FilterSpec) -> Result<()> {
    let catalog = CatalogReader::from_path(catalog).into_diagnostic()?;
    if let Some(slug) = spec.active_category.as_deref()
        && !catalog.categories.iter().any(|c| c.slug == slug)
    {
        warn!(category = slug, "unknown category");
    }

    let listing = filter::apply(&catalog.products, &spec);
    info!(shown = listing.len(), total = catalog.products.len(), "listing");

    let stdout = io::stdout();
    ProductWriter::new(stdout.lock())
        .write_products(&listing)
        .into_diagnostic()?;
    Ok(())
}

async fn session(
    catalog: PathBuf,
    actions: PathBuf,
    db_path: Option<PathBuf>,
    checkout_delay: Duration,
) -> Result<()> {
    let catalog = CatalogReader::from_path(catalog).into_diagnostic()?;
    let products = Box::new(InMemoryProductRepository::new(catalog));
    let backend: CheckoutBackendRef = Arc::new(SimulatedCheckoutBackend::new(checkout_delay));
    let config = CheckoutConfig {
        step_delay: checkout_delay,
        ..CheckoutConfig::default()
    };

    let mut session = StorefrontSession::open(products, cart_store(db_path)?, backend, config)
        .await
        .into_diagnostic()?;

    let file = File::open(actions).into_diagnostic()?;
    let reader = ActionReader::new(file);
    for action_result in reader.actions() {
        match action_result {
            Ok(action) => {
                if let Err(e) = session.process_action(action).await {
                    warn!(error = %e, "Error processing action");
                }
            }
            Err(e) => {
                warn!(error = %e, "Error reading action");
            }
        }
    }

    for confirmation in session.confirmations() {
        info!(
            order = %confirmation.order_id,
            items = confirmation.summary.item_count(),
            total = %confirmation.summary.total,
            "Order placed successfully"
        );
    }

    let cart = session.into_cart();
    let stdout = io::stdout();
    CartWriter::new(stdout.lock())
        .write_cart(&cart)
        .into_diagnostic()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Command::Browse {
            catalog,
            category,
            search,
            max_price,
            sort,
        } => {
            let mut spec = FilterSpec::from_query(&QueryParams { category, search });
            spec.price_max = max_price;
            spec.sort_by = sort;
            browse(catalog.catalog, spec)
        }
        Command::Session {
            catalog,
            actions,
            db_path,
            checkout_delay_ms,
        } => {
            session(
                catalog.catalog,
                actions,
                db_path,
                Duration::from_millis(checkout_delay_ms),
            )
            .await
        }
    }
}
