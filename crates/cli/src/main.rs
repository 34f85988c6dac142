//! EverShop CLI - Inspect and exercise the storefront session engine.
//!
//! # Usage
//!
//! ```bash
//! # Quote a cart line with an optional discount code
//! es-cli quote --price 100.00 --quantity 2 --discount SAVE10
//!
//! # Query a product catalog file
//! es-cli products --file catalog.json list --category men --sort price-asc
//! es-cli products --file catalog.json search "linen shirt"
//!
//! # Work with the persisted order history
//! es-cli orders list
//! es-cli orders show 1700000000000-A4H137
//! es-cli orders set-status 1700000000000-A4H137 shipped
//!
//! # Inspect or wipe persisted session state
//! es-cli state show
//! es-cli state clear
//! es-cli state clear orders
//! ```
//!
//! # Commands
//!
//! - `quote` - Price a hypothetical cart through the checkout calculator
//! - `products` - Query a catalog JSON file
//! - `orders` - List, show, and advance persisted orders
//! - `state` - Summarize or wipe the persisted session state

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "es-cli")]
#[command(author, version, about = "EverShop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a hypothetical cart line
    Quote {
        /// Unit price, for example 29.99
        #[arg(short, long)]
        price: rust_decimal::Decimal,

        /// Number of units
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Discount code to apply at checkout
        #[arg(short, long)]
        discount: Option<String>,
    },
    /// Query a product catalog file
    Products {
        /// Path to a catalog JSON file (an array of products)
        #[arg(short, long)]
        file: String,

        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Work with the persisted order history
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Inspect or wipe persisted session state
    State {
        #[command(subcommand)]
        action: StateAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products, optionally filtered and sorted
    List {
        /// Category slug (`men`, `women`, `kids`)
        #[arg(short, long)]
        category: Option<String>,

        /// Sort order (`price-asc`, `price-desc`, `rating`, `newest`)
        #[arg(short, long)]
        sort: Option<String>,

        /// Only brands in this list (repeatable)
        #[arg(short, long)]
        brand: Vec<String>,

        /// Skip out-of-stock products
        #[arg(long)]
        in_stock: bool,
    },
    /// Full-text search over names, descriptions, and brands
    Search {
        /// Search query
        query: String,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List all persisted orders
    List,
    /// Show one order in full
    Show {
        /// Order id, for example 1700000000000-A4H137
        id: String,
    },
    /// Replace an order's status
    SetStatus {
        /// Order id
        id: String,

        /// New status (`pending`, `confirmed`, `processing`, `shipped`,
        /// `delivered`, `cancelled`)
        status: String,
    },
}

#[derive(Subcommand)]
enum StateAction {
    /// Summarize the persisted session state
    Show,
    /// Remove persisted session state
    Clear {
        /// Collection to clear (`cart`, `wishlist`, `comparison`,
        /// `orders`, `reviews`, `user`); everything when omitted
        collection: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env first so RUST_LOG can come from it
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Quote {
            price,
            quantity,
            discount,
        } => commands::quote::run(price, quantity, discount.as_deref()),
        Commands::Products { file, action } => match action {
            ProductsAction::List {
                category,
                sort,
                brand,
                in_stock,
            } => {
                commands::products::list(
                    &file,
                    category.as_deref(),
                    sort.as_deref(),
                    brand,
                    in_stock,
                )
                .await?;
            }
            ProductsAction::Search { query } => commands::products::search(&file, &query).await?,
        },
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::orders::list()?,
            OrdersAction::Show { id } => commands::orders::show(&id)?,
            OrdersAction::SetStatus { id, status } => commands::orders::set_status(&id, &status)?,
        },
        Commands::State { action } => match action {
            StateAction::Show => commands::state::show()?,
            StateAction::Clear { collection } => commands::state::clear(collection.as_deref())?,
        },
    }
    Ok(())
}
