//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{
    Account, AccountRecord, ChannelProfile, MediaSlot, ReplacedMedia, WatchedVideo,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Account Repository
// ============================================================================

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find account by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<AccountRecord>>;

    /// Find the account whose username equals `username` or whose email equals `email`
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> RepoResult<Option<AccountRecord>>;

    /// Insert a new account.
    ///
    /// Fails with `DomainError::ConflictingAccount` on a username/email collision.
    async fn create(&self, record: &AccountRecord) -> RepoResult<()>;

    /// Set the full name and/or email; `None` leaves that column as stored.
    ///
    /// Returns the account after the write. Fails with
    /// `DomainError::ConflictingAccount` when the email belongs to another account.
    async fn update_details(
        &self,
        id: Snowflake,
        full_name: Option<&str>,
        email: Option<&str>,
    ) -> RepoResult<Account>;

    /// Point one media slot at `url`, touching no other column.
    ///
    /// The previous URL is read under the same row lock as the write.
    async fn update_media(
        &self,
        id: Snowflake,
        slot: MediaSlot,
        url: &str,
    ) -> RepoResult<ReplacedMedia>;

    /// Replace the password hash
    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()>;

    /// Overwrite the refresh-token slot unconditionally (`None` clears it).
    ///
    /// Returns `false` if no account with that id exists.
    async fn set_refresh_token(&self, id: Snowflake, token: Option<&str>) -> RepoResult<bool>;

    /// Replace the refresh token only if the slot currently holds `expected`.
    ///
    /// Returns `false` when the slot held anything else, so two rotations of
    /// the same token can never both succeed.
    async fn replace_refresh_token(
        &self,
        id: Snowflake,
        expected: &str,
        replacement: &str,
    ) -> RepoResult<bool>;

    /// Delete an account
    async fn delete_by_id(&self, id: Snowflake) -> RepoResult<()>;

    /// Check that the store is reachable
    async fn ping(&self) -> RepoResult<()>;
}

// ============================================================================
// Channel Repository
// ============================================================================

#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Aggregate the public profile of the channel owned by `username`
    async fn channel_profile(
        &self,
        username: &str,
        viewer: Option<Snowflake>,
    ) -> RepoResult<Option<ChannelProfile>>;

    /// Videos watched by an account, most recent first
    async fn watch_history(&self, account_id: Snowflake) -> RepoResult<Vec<WatchedVideo>>;
}
