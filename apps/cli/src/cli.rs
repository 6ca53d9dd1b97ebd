//! Command-line definitions

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

#[derive(Parser, Debug)]
#[command(name = "estate", version, about = "Browse and populate the listing catalog")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Catalog server base URL
    #[arg(long, global = true, env = "ESTATE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Print raw JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search listings, ordered by name
    List {
        /// Name prefix; accents and case are ignored
        #[arg(long)]
        name: Option<String>,

        /// Address prefix; accents and case are ignored
        #[arg(long)]
        address: Option<String>,

        #[arg(long, value_name = "AMOUNT")]
        price_min: Option<Decimal>,

        #[arg(long, value_name = "AMOUNT")]
        price_max: Option<Decimal>,

        /// 1-based page number
        #[arg(long, allow_negative_numbers = true)]
        page: Option<i64>,

        /// Items per page (server clamps to 1..=100)
        #[arg(long, allow_negative_numbers = true)]
        page_size: Option<i64>,
    },

    /// Show one listing
    Get {
        /// Listing id
        id: String,
    },

    /// Create a listing
    Create {
        #[arg(long)]
        owner: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        address: String,

        #[arg(long, allow_negative_numbers = true)]
        price: Decimal,

        /// Image URL
        #[arg(long)]
        image: String,
    },

    /// Generate random listings (server clamps to 1..=50)
    Generate {
        #[arg(short, long, allow_negative_numbers = true)]
        count: Option<i64>,
    },

    /// Insert the demo listings if the catalog is empty
    Seed,
}
