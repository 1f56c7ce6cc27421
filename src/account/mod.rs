//! Account and session management
//!
//! Accounts are registered once and never edited. A single session slot
//! holds a snapshot of the signed-in account and survives restarts through
//! the injected storage backend.

pub mod types;
pub mod store;

pub use types::{Account, AccountId};
pub use store::{AccountError, AccountStore};
