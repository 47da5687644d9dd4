//! PostgreSQL implementation of AccountRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use vidtube_core::entities::{Account, AccountRecord, MediaSlot, ReplacedMedia};
use vidtube_core::error::DomainError;
use vidtube_core::traits::{AccountRepository, RepoResult};
use vidtube_core::value_objects::Snowflake;

use crate::mappers::AccountWrite;
use crate::models::{AccountModel, ReplacedMediaModel};

use super::error::{account_not_found, map_db_error, map_unique_violation};

const ACCOUNT_COLUMNS: &str = "id, username, email, full_name, avatar, cover_image, \
                               password_hash, refresh_token, created_at, updated_at";

fn media_column(slot: MediaSlot) -> &'static str {
    match slot {
        MediaSlot::Avatar => "avatar",
        MediaSlot::CoverImage => "cover_image",
    }
}

/// PostgreSQL implementation of AccountRepository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<AccountRecord>> {
        let result = sqlx::query_as::<_, AccountModel>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(AccountRecord::from))
    }

    #[instrument(skip(self))]
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> RepoResult<Option<AccountRecord>> {
        let result = sqlx::query_as::<_, AccountModel>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts \
             WHERE username = lower($1) OR email = $2 \
             ORDER BY created_at LIMIT 1"
        ))
        .bind(username)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(AccountRecord::from))
    }

    #[instrument(skip(self, record), fields(account_id = %record.id()))]
    async fn create(&self, record: &AccountRecord) -> RepoResult<()> {
        let row = AccountWrite::new(&record.account);

        sqlx::query(
            r"
            INSERT INTO accounts (id, username, email, full_name, avatar, cover_image,
                                  password_hash, refresh_token, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(row.id)
        .bind(row.username)
        .bind(row.email)
        .bind(row.full_name)
        .bind(row.avatar)
        .bind(row.cover_image)
        .bind(&record.password_hash)
        .bind(record.refresh_token.as_deref())
        .bind(record.account.created_at)
        .bind(record.account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ConflictingAccount))?;

        Ok(())
    }

    #[instrument(skip(self, email), fields(email_changed = email.is_some()))]
    async fn update_details(
        &self,
        id: Snowflake,
        full_name: Option<&str>,
        email: Option<&str>,
    ) -> RepoResult<Account> {
        let result = sqlx::query_as::<_, AccountModel>(&format!(
            "UPDATE accounts \
             SET full_name = COALESCE($2, full_name), email = COALESCE($3, email), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(id.into_inner())
        .bind(full_name)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ConflictingAccount))?;

        result
            .map(|model| AccountRecord::from(model).into_account())
            .ok_or_else(|| account_not_found(id))
    }

    #[instrument(skip(self, url))]
    async fn update_media(
        &self,
        id: Snowflake,
        slot: MediaSlot,
        url: &str,
    ) -> RepoResult<ReplacedMedia> {
        let column = media_column(slot);

        // The sub-select locks the row, so `previous` is exactly the value
        // this statement overwrote.
        let result = sqlx::query_as::<_, ReplacedMediaModel>(&format!(
            "UPDATE accounts \
             SET {column} = $2, updated_at = NOW() \
             FROM (SELECT id AS locked_id, {column} AS previous \
                   FROM accounts WHERE id = $1 FOR UPDATE) AS old \
             WHERE accounts.id = old.locked_id \
             RETURNING {ACCOUNT_COLUMNS}, old.previous"
        ))
        .bind(id.into_inner())
        .bind(url)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .map(ReplacedMedia::from)
            .ok_or_else(|| account_not_found(id))
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE accounts
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(account_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self, token), fields(clearing = token.is_none()))]
    async fn set_refresh_token(&self, id: Snowflake, token: Option<&str>) -> RepoResult<bool> {
        let result = sqlx::query("UPDATE accounts SET refresh_token = $2 WHERE id = $1")
            .bind(id.into_inner())
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, expected, replacement))]
    async fn replace_refresh_token(
        &self,
        id: Snowflake,
        expected: &str,
        replacement: &str,
    ) -> RepoResult<bool> {
        // Compare-and-set in one statement: of two concurrent rotations of
        // the same token, only one can match.
        let result = sqlx::query(
            r"
            UPDATE accounts
            SET refresh_token = $3
            WHERE id = $1 AND refresh_token = $2
            ",
        )
        .bind(id.into_inner())
        .bind(expected)
        .bind(replacement)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(account_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> RepoResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
