//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use vidtube_core::error::DomainError;
use vidtube_core::value_objects::Snowflake;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::StoreUnavailable(e.to_string())
}

/// Map a unique-constraint violation to `on_unique`, anything else to `StoreUnavailable`
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    map_db_error(e)
}

pub fn account_not_found(id: Snowflake) -> DomainError {
    DomainError::AccountNotFound(id)
}
