//! Account entity - the identity record behind every channel

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Account as it may be exposed outside the service layer.
///
/// Carries no password hash and no refresh token; those live only on
/// [`AccountRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub full_name: String,
    /// Avatar URL owned by the external media store
    pub avatar: String,
    /// Cover image URL owned by the external media store
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new Account with required fields
    ///
    /// The username is normalized to lowercase.
    pub fn new(
        id: Snowflake,
        username: &str,
        email: String,
        full_name: String,
        avatar: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            username: Self::normalize_username(username),
            email,
            full_name,
            avatar,
            cover_image: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Usernames are case-insensitive and stored lowercased
    pub fn normalize_username(username: &str) -> String {
        username.trim().to_lowercase()
    }
}

/// Account as persisted in the store, including credentials.
///
/// The `refresh_token` slot is the single source of truth for refresh-token
/// validity: only the value stored here may be rotated.
#[derive(Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub account: Account,
    pub password_hash: String,
    pub refresh_token: Option<String>,
}

impl AccountRecord {
    /// Build a record for a freshly registered account (no session yet)
    pub fn new(account: Account, password_hash: String) -> Self {
        Self {
            account,
            password_hash,
            refresh_token: None,
        }
    }

    #[inline]
    pub fn id(&self) -> Snowflake {
        self.account.id
    }

    /// Byte-for-byte comparison against the persisted refresh token.
    /// An empty slot never matches.
    pub fn refresh_token_matches(&self, candidate: &str) -> bool {
        self.refresh_token
            .as_deref()
            .is_some_and(|current| current.as_bytes() == candidate.as_bytes())
    }

    /// Drop credentials, keeping only the exposable account
    pub fn into_account(self) -> Account {
        self.account
    }
}

impl std::fmt::Debug for AccountRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountRecord")
            .field("account", &self.account)
            .field("password_hash", &"[redacted]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
