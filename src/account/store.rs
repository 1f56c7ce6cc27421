//! Account storage and session tracking

use thiserror::Error;
use tracing::{info, warn};

use super::types::Account;
use crate::storage::{Storage, StorageError};

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("User already exists")]
    DuplicateEmail,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Account store over the `users` and `currentUser` tables.
///
/// Every call reads and writes through the backend, so two stores over the
/// same backend observe each other's mutations immediately.
#[derive(Clone)]
pub struct AccountStore {
    storage: Storage,
}

impl AccountStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Create an account and sign it in.
    pub fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, AccountError> {
        let mut accounts = self.storage.load_accounts()?;

        if accounts.iter().any(|a| a.email == email) {
            warn!(email, "registration rejected: email already registered");
            return Err(AccountError::DuplicateEmail);
        }

        let account = Account::new(username, email, password);
        accounts.push(account.clone());
        self.storage.save_accounts(&accounts)?;

        // The session holds a snapshot, not a reference into `users`
        self.storage.save_session(&account)?;

        info!(account_id = %account.id, username, "account registered");
        Ok(account)
    }

    /// Sign in with an exact email and password match.
    ///
    /// An unknown email and a wrong password fail the same way. The current
    /// session is left untouched on failure.
    pub fn login(&self, email: &str, password: &str) -> Result<Account, AccountError> {
        let accounts = self.storage.load_accounts()?;

        let account = accounts
            .into_iter()
            .find(|a| a.matches_credentials(email, password))
            .ok_or(AccountError::InvalidCredentials)?;

        self.storage.save_session(&account)?;
        info!(account_id = %account.id, "signed in");
        Ok(account)
    }

    /// Clear the session. Safe to call when nobody is signed in.
    pub fn logout(&self) -> Result<(), AccountError> {
        self.storage.clear_session()?;
        info!("signed out");
        Ok(())
    }

    pub fn current_session(&self) -> Result<Option<Account>, AccountError> {
        Ok(self.storage.load_session()?)
    }

    /// All registered accounts in registration order.
    pub fn accounts(&self) -> Result<Vec<Account>, AccountError> {
        Ok(self.storage.load_accounts()?)
    }
}
