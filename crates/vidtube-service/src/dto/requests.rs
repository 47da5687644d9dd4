//! Request DTOs for API endpoints
//!
//! JSON request DTOs implement `Deserialize` and `Validate`. Field names are
//! snake_case; the camelCase spellings older clients send are accepted as aliases.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use vidtube_core::MediaUpload;

fn validate_username(username: &str) -> Result<(), ValidationError> {
    let valid = username
        .trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("username_charset")
            .with_message("Username may only contain letters, digits, '_', '.' and '-'".into()))
    }
}

/// Pick the trimmed value if present and non-empty
fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

// ============================================================================
// Auth Requests
// ============================================================================

/// Account registration (assembled from a multipart form)
#[derive(Clone, Validate)]
pub struct RegisterInput {
    #[validate(length(max = 100, message = "Full name must be at most 100 characters"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(
        length(min = 3, max = 30, message = "Username must be 3-30 characters"),
        custom(function = "validate_username")
    )]
    pub username: String,

    #[validate(length(max = 128, message = "Password must be at most 128 characters"))]
    pub password: String,

    /// Required; its absence is reported by the service
    pub avatar: Option<MediaUpload>,

    pub cover_image: Option<MediaUpload>,
}

impl std::fmt::Debug for RegisterInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterInput")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("avatar", &self.avatar)
            .field("cover_image", &self.cover_image)
            .finish_non_exhaustive()
    }
}

/// Login request
///
/// The account is looked up by `identifier`, or by whichever of
/// `username` / `email` is supplied.
#[derive(Clone, Deserialize, Validate)]
pub struct LoginRequest {
    pub identifier: Option<String>,

    pub username: Option<String>,

    pub email: Option<String>,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginRequest {
    /// `(username, email)` keys for the account lookup, or `None` if no identifier was given
    pub fn lookup_keys(&self) -> Option<(&str, &str)> {
        if let Some(identifier) = non_blank(self.identifier.as_ref()) {
            return Some((identifier, identifier));
        }

        match (non_blank(self.username.as_ref()), non_blank(self.email.as_ref())) {
            (Some(username), Some(email)) => Some((username, email)),
            (Some(key), None) | (None, Some(key)) => Some((key, key)),
            (None, None) => None,
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("identifier", &self.identifier)
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Refresh-token rotation request
#[derive(Clone, Deserialize)]
pub struct RotateRequest {
    #[serde(alias = "refreshToken")]
    pub refresh_token: String,
}

impl RotateRequest {
    pub fn new(refresh_token: impl Into<String>) -> Self {
        Self {
            refresh_token: refresh_token.into(),
        }
    }
}

impl std::fmt::Debug for RotateRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RotateRequest { .. }")
    }
}

/// Password change request
#[derive(Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[serde(alias = "oldPassword")]
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,

    #[serde(alias = "newPassword")]
    #[validate(length(min = 1, max = 128, message = "New password must be 1-128 characters"))]
    pub new_password: String,
}

impl std::fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ChangePasswordRequest { .. }")
    }
}

// ============================================================================
// Account Requests
// ============================================================================

/// Update the current account's details
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    #[serde(alias = "fullName")]
    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

impl UpdateAccountRequest {
    pub fn full_name(&self) -> Option<&str> {
        non_blank(self.full_name.as_ref())
    }

    pub fn email(&self) -> Option<&str> {
        non_blank(self.email.as_ref())
    }
}
