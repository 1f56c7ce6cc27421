use std::io::{self, BufRead, Write};

use crate::app::BookFinder;
use crate::cli::books::{print_book, print_results};
use crate::client::latest::search_message;
use crate::client::{Book, Outcome};
use crate::error::BookFinderError;

/// Menu loop over stdin. Returns when the user exits or input ends.
pub async fn start(app: &BookFinder) {
    print_banner();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut results: Vec<Book> = Vec::new();

    loop {
        print_menu(app);
        let Some(choice) = prompt(&mut input, "\nSelect: ") else {
            break;
        };

        let outcome = match choice.as_str() {
            "1" => search(app, &mut input, &mut results).await,
            "2" => view_details(app, &mut input, &results).await,
            "3" => toggle(app, &mut input, &results),
            "4" => list_favorites(app),
            "5" => login(app, &mut input),
            "6" => register(app, &mut input),
            "7" => app.logout().map(|_| println!("Signed out.")),
            "0" | "q" => break,
            _ => {
                println!("Invalid option.");
                Ok(())
            }
        };

        if let Err(e) = outcome {
            println!("❌ {}", e);
        }
    }

    println!("\nGoodbye.");
}

fn print_banner() {
    println!("========================================");
    println!("     Discover Your Next Great Read      ");
    println!("========================================");
}

fn print_menu(app: &BookFinder) {
    match app.current_account() {
        Ok(Some(account)) => println!("\nSigned in as {}", account.username),
        _ => println!("\nNot signed in"),
    }
    println!("1. Search books");
    println!("2. View book details");
    println!("3. Add/Remove favorite");
    println!("4. My favorites");
    println!("5. Login");
    println!("6. Register");
    println!("7. Logout");
    println!("0. Exit");
}

fn prompt<R: BufRead>(input: &mut R, label: &str) -> Option<String> {
    print!("{}", label);
    let _ = io::stdout().flush();

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// Pick a book from the last search by its 1-based number.
fn select<'a, R: BufRead>(input: &mut R, results: &'a [Book]) -> Option<&'a Book> {
    if results.is_empty() {
        println!("Search for books first.");
        return None;
    }
    let raw = prompt(input, "Book number: ")?;
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 && n <= results.len() => Some(&results[n - 1]),
        _ => {
            println!("No book with number '{}'.", raw);
            None
        }
    }
}

async fn search<R: BufRead>(
    app: &BookFinder,
    input: &mut R,
    results: &mut Vec<Book>,
) -> Result<(), BookFinderError> {
    let Some(query) = prompt(input, "Title, author, or keyword: ") else {
        return Ok(());
    };
    if query.is_empty() {
        println!("Enter a book title, author, or keyword to begin.");
        return Ok(());
    }

    println!("Searching for books...");
    let result = match app.catalog().search(&query).await {
        Ok(Outcome::Ready(books)) => Ok(books),
        Ok(Outcome::Superseded) => return Ok(()),
        Err(e) => Err(e),
    };

    if let Some(message) = search_message(&result) {
        println!("{}", message);
    }
    // A failed search keeps the previous results on screen
    if let Ok(books) = result {
        *results = books;
        print_results(app, &results[..])?;
    }
    Ok(())
}

async fn view_details<R: BufRead>(
    app: &BookFinder,
    input: &mut R,
    results: &[Book],
) -> Result<(), BookFinderError> {
    let Some(book) = select(input, results) else {
        return Ok(());
    };

    println!("Loading additional details...");
    let details = match app.details(&book.key).await {
        Ok(Outcome::Ready(details)) => Some(details),
        Ok(Outcome::Superseded) => return Ok(()),
        Err(e) => {
            tracing::warn!("Error fetching details: {}", e);
            None
        }
    };

    print_book(app, book, details.as_ref());
    if app.current_account()?.is_some() {
        let label = if app.is_favorite(&book.key)? { "♥ favorite" } else { "not a favorite" };
        println!("Status: {}", label);
    }
    Ok(())
}

fn toggle<R: BufRead>(app: &BookFinder, input: &mut R, results: &[Book]) -> Result<(), BookFinderError> {
    app.require_session()?;
    let Some(book) = select(input, results) else {
        return Ok(());
    };

    if app.toggle_favorite(book)? {
        println!("Added '{}' to favorites.", book.title);
    } else {
        println!("Removed '{}' from favorites.", book.title);
    }
    Ok(())
}

fn list_favorites(app: &BookFinder) -> Result<(), BookFinderError> {
    let favorites = app.my_favorites()?;
    if favorites.is_empty() {
        println!("No favorites yet! Search for books and add them here.");
        return Ok(());
    }
    for (idx, book) in favorites.iter().enumerate() {
        println!("{:>3}. {} by {}", idx + 1, book.title, book.authors_display());
    }
    Ok(())
}

fn login<R: BufRead>(app: &BookFinder, input: &mut R) -> Result<(), BookFinderError> {
    let (Some(email), Some(password)) = (prompt(input, "Email: "), prompt(input, "Password: ")) else {
        return Ok(());
    };
    let account = app.login(&email, &password)?;
    println!("Welcome back, {}!", account.username);
    Ok(())
}

fn register<R: BufRead>(app: &BookFinder, input: &mut R) -> Result<(), BookFinderError> {
    let Some(username) = prompt(input, "Username: ") else {
        return Ok(());
    };
    let (Some(email), Some(password)) = (prompt(input, "Email: "), prompt(input, "Password: ")) else {
        return Ok(());
    };
    let account = app.register(&username, &email, &password)?;
    println!("Welcome, {}!", account.username);
    Ok(())
}
