//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Account not found: {0}")]
    AccountNotFound(Snowflake),

    #[error("Channel not found: {0}")]
    ChannelNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Account with this username or email already exists")]
    ConflictingAccount,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Account store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Media store unavailable: {0}")]
    MediaUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "UNKNOWN_ACCOUNT",
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ConflictingAccount => "CONFLICTING_ACCOUNT",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::MediaUnavailable(_) => "MEDIA_UNAVAILABLE",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AccountNotFound(_) | Self::ChannelNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ConflictingAccount)
    }

    /// Check if an upstream dependency (store or media service) failed
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_) | Self::MediaUnavailable(_))
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        if self.is_not_found() {
            404
        } else if self.is_validation() {
            400
        } else if self.is_conflict() {
            409
        } else if self.is_unavailable() {
            503
        } else {
            500
        }
    }
}
