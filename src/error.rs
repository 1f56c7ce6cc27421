use thiserror::Error;

use crate::account::AccountError;
use crate::client::CatalogError;
use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum BookFinderError {
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Please login to add favorites!")]
    NotSignedIn,
    #[error("Search was superseded by a newer request")]
    Superseded,
}
