//! Application facade tying the stores to the catalog.
//!
//! Favorites operations here act on the signed-in account; the stores
//! themselves accept any account id.

use std::sync::Arc;

use crate::account::{Account, AccountStore};
use crate::client::{
    Book, Catalog, CoverSize, CoverUrls, LatestSearch, OpenLibraryClient, Outcome, SearchOutcome,
    WorkDetails,
};
use crate::config::BookFinderConfig;
use crate::error::BookFinderError;
use crate::favorites::FavoritesStore;
use crate::storage::Storage;

pub struct BookFinder {
    accounts: AccountStore,
    favorites: FavoritesStore,
    catalog: LatestSearch,
    covers: CoverUrls,
}

impl BookFinder {
    pub fn new(storage: Storage, catalog: Arc<dyn Catalog>, covers: CoverUrls) -> Self {
        Self {
            accounts: AccountStore::new(storage.clone()),
            favorites: FavoritesStore::new(storage),
            catalog: LatestSearch::new(catalog),
            covers,
        }
    }

    pub fn from_config(config: &BookFinderConfig, storage: Storage) -> Result<Self, BookFinderError> {
        let client = OpenLibraryClient::from_config(&config.catalog)?;
        let covers = CoverUrls::new(&config.catalog.covers_url, &config.catalog.placeholder_url);
        Ok(Self::new(storage, Arc::new(client), covers))
    }

    pub fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    pub fn catalog(&self) -> &LatestSearch {
        &self.catalog
    }

    // --- Session ---

    pub fn register(&self, username: &str, email: &str, password: &str) -> Result<Account, BookFinderError> {
        Ok(self.accounts.register(username, email, password)?)
    }

    pub fn login(&self, email: &str, password: &str) -> Result<Account, BookFinderError> {
        Ok(self.accounts.login(email, password)?)
    }

    pub fn logout(&self) -> Result<(), BookFinderError> {
        Ok(self.accounts.logout()?)
    }

    pub fn current_account(&self) -> Result<Option<Account>, BookFinderError> {
        Ok(self.accounts.current_session()?)
    }

    pub fn require_session(&self) -> Result<Account, BookFinderError> {
        self.current_account()?.ok_or(BookFinderError::NotSignedIn)
    }

    // --- Catalog ---

    pub async fn search(&self, query: &str) -> Result<SearchOutcome, BookFinderError> {
        Ok(self.catalog.search(query).await?)
    }

    pub async fn details(&self, work_id: &str) -> Result<Outcome<WorkDetails>, BookFinderError> {
        Ok(self.catalog.fetch_details(work_id).await?)
    }

    pub fn cover_url(&self, cover_id: Option<i64>, size: CoverSize) -> String {
        self.covers.url(cover_id, size)
    }

    // --- Favorites of the signed-in account ---

    pub fn my_favorites(&self) -> Result<Vec<Book>, BookFinderError> {
        let account = self.require_session()?;
        Ok(self.favorites.list(&account.id)?)
    }

    pub fn add_favorite(&self, book: &Book) -> Result<bool, BookFinderError> {
        let account = self.require_session()?;
        Ok(self.favorites.add(&account.id, book)?)
    }

    /// Look the work up in the catalog and save it.
    pub async fn add_favorite_by_work(&self, work_id: &str) -> Result<(Book, bool), BookFinderError> {
        let account = self.require_session()?;
        let details = self
            .details(work_id)
            .await?
            .ready()
            .ok_or(BookFinderError::Superseded)?;

        let book = Book::from_work(work_id, &details);
        let added = self.favorites.add(&account.id, &book)?;
        Ok((book, added))
    }

    pub fn remove_favorite(&self, book_key: &str) -> Result<(), BookFinderError> {
        let account = self.require_session()?;
        Ok(self.favorites.remove(&account.id, book_key)?)
    }

    /// False when nobody is signed in.
    pub fn is_favorite(&self, book_key: &str) -> Result<bool, BookFinderError> {
        match self.current_account()? {
            Some(account) => Ok(self.favorites.contains(&account.id, book_key)?),
            None => Ok(false),
        }
    }

    pub fn toggle_favorite(&self, book: &Book) -> Result<bool, BookFinderError> {
        let account = self.require_session()?;
        Ok(self.favorites.toggle(&account.id, book)?)
    }
}
