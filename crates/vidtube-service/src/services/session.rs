//! Session service
//!
//! Owns the refresh-token lifecycle: issuing a token pair, rotating it,
//! revoking it, and the password checks that gate issuance. The account's
//! single refresh-token slot is the only source of truth for which refresh
//! token may be rotated.

use tracing::{info, instrument, warn};

use vidtube_common::{AppError, TokenPair};
use vidtube_core::entities::Account;
use vidtube_core::Snowflake;

use crate::dto::{
    AccountResponse, AuthResponse, ChangePasswordRequest, LoginRequest, RotateRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Session service
pub struct SessionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SessionService<'a> {
    /// Create a new SessionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Mint a token pair for an account and persist its refresh token,
    /// replacing any previous session.
    #[instrument(skip(self))]
    pub async fn issue(&self, account_id: Snowflake) -> ServiceResult<TokenPair> {
        if self.ctx.account_repo().find_by_id(account_id).await?.is_none() {
            return Err(ServiceError::not_found("Account", account_id.to_string()));
        }

        let tokens = self.ctx.jwt_service().generate_token_pair(account_id)?;

        match self
            .ctx
            .account_repo()
            .set_refresh_token(account_id, Some(&tokens.refresh_token))
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                warn!(account_id = %account_id, "Refresh token not persisted: account vanished");
                return Err(ServiceError::token_persistence_failed());
            }
            Err(e) => {
                warn!(account_id = %account_id, error = %e, "Refresh token not persisted");
                return Err(ServiceError::token_persistence_failed());
            }
        }

        info!(account_id = %account_id, "Session issued");
        Ok(tokens)
    }

    /// Check a password against the account found by username or email
    #[instrument(skip(self, password))]
    pub async fn authenticate_password(
        &self,
        identifier: &str,
        password: &str,
    ) -> ServiceResult<Account> {
        self.authenticate(identifier, identifier, password).await
    }

    async fn authenticate(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ServiceResult<Account> {
        let record = self
            .ctx
            .account_repo()
            .find_by_username_or_email(username, email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: account not found");
                ServiceError::invalid_credentials()
            })?;

        let valid = self
            .ctx
            .password_service()
            .verify(password, &record.password_hash)?;

        if !valid {
            warn!(account_id = %record.id(), "Login failed: invalid password");
            return Err(ServiceError::invalid_credentials());
        }

        Ok(record.into_account())
    }

    /// Authenticate and issue a session in one step
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let (username, email) = request
            .lookup_keys()
            .ok_or_else(|| ServiceError::invalid_input("username or email is required"))?;

        let account = self.authenticate(username, email, &request.password).await?;
        let tokens = self.issue(account.id).await?;

        info!(account_id = %account.id, "Account logged in");

        Ok(AuthResponse::new(tokens, AccountResponse::from(&account)))
    }

    /// Exchange a refresh token for a new pair.
    ///
    /// The presented token must equal the persisted one, and the swap is a
    /// single conditional write, so of two concurrent rotations of the same
    /// token exactly one succeeds.
    #[instrument(skip(self, request))]
    pub async fn rotate(&self, request: RotateRequest) -> ServiceResult<TokenPair> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;
        let account_id = claims.account_id()?;

        let record = self
            .ctx
            .account_repo()
            .find_by_id(account_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        if !record.refresh_token_matches(&request.refresh_token) {
            warn!(account_id = %account_id, "Refresh token reuse detected");
            return Err(ServiceError::token_reuse());
        }

        let tokens = self.ctx.jwt_service().generate_token_pair(account_id)?;

        let replaced = self
            .ctx
            .account_repo()
            .replace_refresh_token(account_id, &request.refresh_token, &tokens.refresh_token)
            .await
            .map_err(|e| {
                warn!(account_id = %account_id, error = %e, "Rotated refresh token not persisted");
                ServiceError::token_persistence_failed()
            })?;

        if !replaced {
            warn!(account_id = %account_id, "Refresh token rotated concurrently");
            return Err(ServiceError::token_reuse());
        }

        info!(account_id = %account_id, "Session rotated");
        Ok(tokens)
    }

    /// Clear the refresh-token slot. Idempotent.
    #[instrument(skip(self))]
    pub async fn revoke(&self, account_id: Snowflake) -> ServiceResult<()> {
        let cleared = self
            .ctx
            .account_repo()
            .set_refresh_token(account_id, None)
            .await?;

        if cleared {
            info!(account_id = %account_id, "Session revoked");
        }
        Ok(())
    }

    /// Replace the password after checking the old one.
    ///
    /// The current refresh token stays valid.
    #[instrument(skip(self, request))]
    pub async fn change_password(
        &self,
        account_id: Snowflake,
        request: ChangePasswordRequest,
    ) -> ServiceResult<()> {
        let record = self
            .ctx
            .account_repo()
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Account", account_id.to_string()))?;

        self.ctx
            .password_service()
            .verify_or_error(&request.old_password, &record.password_hash)?;

        if request.new_password == request.old_password {
            return Err(ServiceError::invalid_input(
                "New password must differ from the old password",
            ));
        }

        let password_hash = self.ctx.password_service().hash(&request.new_password)?;
        self.ctx
            .account_repo()
            .update_password(account_id, &password_hash)
            .await?;

        info!(account_id = %account_id, "Password changed");
        Ok(())
    }
}
