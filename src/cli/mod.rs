pub mod account;
pub mod books;
pub mod favorites;

use clap::{Parser, Subcommand};

use crate::client::CoverSize;

#[derive(Parser)]
#[command(name = "book_finder")]
#[command(about = "Search the Open Library catalog and keep a list of favorite books", long_about = None)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true, default_value = "book_finder.toml")]
    pub config: String,
    /// Overrides the database path from the config
    #[arg(long, global = true)]
    pub db_path: Option<String>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account and sign in
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in to an existing account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// End the current session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// List registered accounts
    Users,
    /// Search the catalog
    Search {
        query: String,
    },
    /// Show details for a work, e.g. /works/OL45883W
    Details {
        work_id: String,
    },
    /// Print the cover image URL for a cover id
    Cover {
        cover_id: Option<i64>,
        #[arg(long, value_enum, default_value_t = CoverSize::M)]
        size: CoverSize,
    },
    /// Favorites of the signed-in account
    Favorites {
        #[command(subcommand)]
        cmd: favorites::FavoritesCommands,
    },
}
