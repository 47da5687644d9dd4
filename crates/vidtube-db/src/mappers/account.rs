//! Account entity <-> model mapper

use vidtube_core::entities::{Account, AccountRecord, ReplacedMedia};
use vidtube_core::value_objects::Snowflake;

use crate::models::{AccountModel, ReplacedMediaModel};

impl From<AccountModel> for AccountRecord {
    fn from(model: AccountModel) -> Self {
        AccountRecord {
            account: Account {
                id: Snowflake::new(model.id),
                username: model.username,
                email: model.email,
                full_name: model.full_name,
                avatar: model.avatar,
                cover_image: model.cover_image,
                created_at: model.created_at,
                updated_at: model.updated_at,
            },
            password_hash: model.password_hash,
            refresh_token: model.refresh_token,
        }
    }
}

impl From<ReplacedMediaModel> for ReplacedMedia {
    fn from(model: ReplacedMediaModel) -> Self {
        ReplacedMedia {
            account: AccountRecord::from(model.account).into_account(),
            previous: model.previous,
        }
    }
}

/// Borrowed column values for writing an account row
pub struct AccountWrite<'a> {
    pub id: i64,
    pub username: &'a str,
    pub email: &'a str,
    pub full_name: &'a str,
    pub avatar: &'a str,
    pub cover_image: Option<&'a str>,
}

impl<'a> AccountWrite<'a> {
    pub fn new(account: &'a Account) -> Self {
        Self {
            id: account.id.into_inner(),
            username: &account.username,
            email: &account.email,
            full_name: &account.full_name,
            avatar: &account.avatar,
            cover_image: account.cover_image.as_deref(),
        }
    }
}
