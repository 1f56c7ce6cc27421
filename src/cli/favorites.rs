use clap::Subcommand;

use crate::app::BookFinder;
use crate::error::BookFinderError;

#[derive(Subcommand)]
pub enum FavoritesCommands {
    /// List saved books
    List,
    /// Save a work by id, e.g. OL45883W or /works/OL45883W
    Add {
        work_id: String,
    },
    /// Remove a saved book by key
    Remove {
        key: String,
    },
    /// Check whether a book key is saved
    Check {
        key: String,
    },
}

pub async fn handle_favorites_command(
    app: &BookFinder,
    cmd: FavoritesCommands,
) -> Result<(), BookFinderError> {
    match cmd {
        FavoritesCommands::List => {
            let favorites = app.my_favorites()?;
            if favorites.is_empty() {
                println!("No favorites yet! Search for books and add them here.");
                return Ok(());
            }
            println!(
                "You have {} favorite book{}",
                favorites.len(),
                if favorites.len() == 1 { "" } else { "s" }
            );
            for book in &favorites {
                println!("{}\t{} by {}", book.key, book.title, book.authors_display());
            }
        }
        FavoritesCommands::Add { work_id } => {
            let (book, added) = app.add_favorite_by_work(&work_id).await?;
            if added {
                println!("Added '{}' to favorites.", book.title);
            } else {
                println!("'{}' is already a favorite.", book.title);
            }
        }
        FavoritesCommands::Remove { key } => {
            app.remove_favorite(&key)?;
            println!("Removed {} from favorites.", key);
        }
        FavoritesCommands::Check { key } => {
            app.require_session()?;
            if app.is_favorite(&key)? {
                println!("{} is a favorite.", key);
            } else {
                println!("{} is not a favorite.", key);
            }
        }
    }
    Ok(())
}
