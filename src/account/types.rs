//! Account type definitions

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account identifier, unique per registration
pub type AccountId = String;

/// A registered account
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    // Unique across accounts, compared byte-for-byte
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub created_at: i64, // unix millis
}

impl Account {
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            id: generate_account_id(),
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// True when both the email and the password match exactly.
    pub fn matches_credentials(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

pub fn generate_account_id() -> AccountId {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_has_unique_id() {
        let a = Account::new("alice", "a@x.com", "secret1");
        let b = Account::new("alice", "a@x.com", "secret1");
        assert_ne!(a.id, b.id);
        assert!(a.created_at > 0);
    }

    #[test]
    fn test_credentials_are_exact_match() {
        let account = Account::new("alice", "a@x.com", "secret1");
        assert!(account.matches_credentials("a@x.com", "secret1"));
        assert!(!account.matches_credentials("A@x.com", "secret1"));
        assert!(!account.matches_credentials("a@x.com", "Secret1"));
    }
}
