//! Account database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the accounts table
#[derive(Clone, FromRow)]
pub struct AccountModel {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: String,
    pub cover_image: Option<String>,
    pub password_hash: String,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account row returned by a media-slot update, with the URL it replaced
#[derive(Clone, FromRow)]
pub struct ReplacedMediaModel {
    #[sqlx(flatten)]
    pub account: AccountModel,
    pub previous: Option<String>,
}
