use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use book_finder::app::BookFinder;
use book_finder::cli::{self, Cli, Commands};
use book_finder::config::BookFinderConfig;
use book_finder::error::BookFinderError;
use book_finder::interactive;
use book_finder::storage::Storage;

fn init_tracing(default_level: &str) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let (config, status) = BookFinderConfig::load_or_default(&cli.config);
    init_tracing(&config.logging.log_level);
    // Reported only now that a subscriber is installed
    status.log(&cli.config);

    let db_path = cli.db_path.clone().unwrap_or_else(|| config.storage.db_path.clone());
    info!("Persistence: Opening Sled DB at '{}'...", db_path);
    let storage = match Storage::open(&db_path) {
        Ok(storage) => storage,
        Err(e) => {
            eprintln!("Failed to open database at '{}': {}", db_path, e);
            std::process::exit(1);
        }
    };

    let app = match BookFinder::from_config(&config, storage) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&app, cli.command).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(app: &BookFinder, command: Option<Commands>) -> Result<(), BookFinderError> {
    match command {
        Some(Commands::Register { username, email, password }) => {
            cli::account::handle_register(app, &username, &email, &password)
        }
        Some(Commands::Login { email, password }) => cli::account::handle_login(app, &email, &password),
        Some(Commands::Logout) => cli::account::handle_logout(app),
        Some(Commands::Whoami) => cli::account::handle_whoami(app),
        Some(Commands::Users) => cli::account::handle_users(app),
        Some(Commands::Search { query }) => cli::books::handle_search(app, &query).await,
        Some(Commands::Details { work_id }) => cli::books::handle_details(app, &work_id).await,
        Some(Commands::Cover { cover_id, size }) => {
            cli::books::handle_cover(app, cover_id, size);
            Ok(())
        }
        Some(Commands::Favorites { cmd }) => cli::favorites::handle_favorites_command(app, cmd).await,
        None => {
            interactive::start(app).await;
            Ok(())
        }
    }
}
