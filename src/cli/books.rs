use crate::app::BookFinder;
use crate::client::latest::search_message;
use crate::client::{Book, CoverSize, Outcome, WorkDetails};
use crate::error::BookFinderError;

/// One line per result, numbered from 1.
pub fn print_results(app: &BookFinder, books: &[Book]) -> Result<(), BookFinderError> {
    for (idx, book) in books.iter().enumerate() {
        let marker = if app.is_favorite(&book.key)? { "♥" } else { " " };
        println!(
            "{:>3}. {} {} ({}) by {}",
            idx + 1,
            marker,
            book.title,
            book.publish_year_display(),
            book.authors_display()
        );
    }
    Ok(())
}

pub fn print_book(app: &BookFinder, book: &Book, details: Option<&WorkDetails>) {
    println!("\n{}", book.title);
    println!("Key: {}", book.key);
    println!("Cover: {}", app.cover_url(book.cover_i, CoverSize::L));
    println!("Author(s): {}", book.authors_display());
    println!("First Published: {}", book.publish_year_display());
    if let Some(publishers) = book.publishers_display() {
        println!("Publisher(s): {}", publishers);
    }
    if let Some(isbn) = book.primary_isbn() {
        println!("ISBN: {}", isbn);
    }
    if let Some(pages) = book.number_of_pages_median {
        println!("Number of Pages: {} pages", pages);
    }
    let subjects = book.subjects_preview();
    if !subjects.is_empty() {
        println!("Subjects: {}", subjects.join(", "));
    }
    if let Some(details) = details {
        if details.description.is_some() {
            println!(
                "Description: {}",
                details.description_text().unwrap_or("No description available")
            );
        }
    }
}

pub async fn handle_search(app: &BookFinder, query: &str) -> Result<(), BookFinderError> {
    let result = match app.catalog().search(query).await {
        Ok(Outcome::Ready(books)) => Ok(books),
        Ok(Outcome::Superseded) => return Ok(()),
        Err(e) if !e.is_network_failure() => return Err(e.into()),
        Err(e) => Err(e),
    };

    if let Some(message) = search_message(&result) {
        println!("{}", message);
    }
    match result {
        Ok(books) => print_results(app, &books),
        // Already reported to the user above
        Err(e) => {
            tracing::debug!("search failed: {}", e);
            Ok(())
        }
    }
}

pub async fn handle_details(app: &BookFinder, work_id: &str) -> Result<(), BookFinderError> {
    let details = match app.details(work_id).await? {
        Outcome::Ready(details) => details,
        Outcome::Superseded => return Ok(()),
    };
    let book = Book::from_work(work_id, &details);
    print_book(app, &book, Some(&details));
    Ok(())
}

pub fn handle_cover(app: &BookFinder, cover_id: Option<i64>, size: CoverSize) {
    println!("{}", app.cover_url(cover_id, size));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{CatalogError, CoverUrls, OpenLibraryClient};
    use crate::storage::Storage;
    use std::sync::Arc;

    fn unreachable_app() -> BookFinder {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = OpenLibraryClient::new(&format!("http://{}", addr)).unwrap();
        BookFinder::new(Storage::in_memory(), Arc::new(client), CoverUrls::default())
    }

    #[tokio::test]
    async fn test_search_failure_reported_once() {
        let app = unreachable_app();
        assert!(handle_search(&app, "dune").await.is_ok());
    }

    #[tokio::test]
    async fn test_empty_query_is_an_error() {
        let app = unreachable_app();
        let err = handle_search(&app, "  ").await.unwrap_err();
        assert!(matches!(err, BookFinderError::Catalog(CatalogError::EmptyQuery)));
    }
}
