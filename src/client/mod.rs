// Catalog client module
pub mod cover;
pub mod latest;
pub mod open_library;
pub mod types;

pub use cover::{cover_url, CoverSize, CoverUrls};
pub use latest::{LatestSearch, Outcome, RequestGate, SearchOutcome};
pub use open_library::{Catalog, CatalogError, OpenLibraryClient};
pub use types::{Book, Description, WorkDetails};
