//! Test fixtures and data generators
//!
//! Provides reusable request bodies and response shapes for integration tests.

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique suffix for test data
///
/// The database outlives a test run, so counters alone would collide.
pub fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// Multipart registration form
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

impl RegisterForm {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            full_name: format!("Test Creator {suffix}"),
            email: format!("creator_{suffix}@example.com"),
            username: format!("creator_{suffix}"),
            password: "TestPass123!".to_string(),
        }
    }

    /// Form with an avatar and, optionally, a cover image
    pub fn to_form(&self, with_cover: bool) -> Form {
        let form = Form::new()
            .text("fullName", self.full_name.clone())
            .text("email", self.email.clone())
            .text("username", self.username.clone())
            .text("password", self.password.clone())
            .part("avatar", image_part("avatar.png"));

        if with_cover {
            form.part("coverImage", image_part("cover.png"))
        } else {
            form
        }
    }

    /// Form missing the avatar part
    pub fn to_form_without_avatar(&self) -> Form {
        Form::new()
            .text("fullName", self.full_name.clone())
            .text("email", self.email.clone())
            .text("username", self.username.clone())
            .text("password", self.password.clone())
    }
}

/// Small PNG-looking file part
pub fn image_part(file_name: &str) -> Part {
    Part::bytes(vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a])
        .file_name(file_name.to_string())
}

/// Login request
#[derive(Debug, Default, Serialize)]
pub struct LoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
}

impl LoginRequest {
    pub fn by_username(form: &RegisterForm) -> Self {
        Self {
            username: Some(form.username.clone()),
            password: form.password.clone(),
            ..Self::default()
        }
    }

    pub fn by_email(form: &RegisterForm) -> Self {
        Self {
            email: Some(form.email.clone()),
            password: form.password.clone(),
            ..Self::default()
        }
    }
}

/// Refresh token request
#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Change password request
#[derive(Debug, Serialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Account detail update
#[derive(Debug, Default, Serialize)]
pub struct UpdateAccountRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Login response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub account: AccountResponse,
}

/// Refresh response
#[derive(Debug, Deserialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_expires_in: i64,
}

/// Account response
#[derive(Debug, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: String,
    pub cover_image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Channel profile response
#[derive(Debug, Deserialize)]
pub struct ChannelProfileResponse {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub avatar: String,
    pub cover_image: Option<String>,
    pub subscribers_count: i64,
    pub channels_subscribed_to_count: i64,
    pub is_subscribed: bool,
}

/// Watch history entry
#[derive(Debug, Deserialize)]
pub struct WatchedVideoResponse {
    pub id: String,
    pub title: String,
    pub watched_at: String,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
