//! Account service
//!
//! Registration, profile edits, avatar/cover media and account deletion.
//! Media lives in the external store; the account only keeps its URL.

use tracing::{info, instrument, warn};
use validator::Validate;

use vidtube_core::entities::{Account, AccountRecord, MediaAsset, MediaSlot, MediaUpload};
use vidtube_core::{DomainError, Snowflake};

use crate::dto::{AccountResponse, RegisterInput, UpdateAccountRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Account service
pub struct AccountService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccountService<'a> {
    /// Create a new AccountService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account with its avatar (and optional cover image)
    #[instrument(skip(self, input), fields(username = %input.username, email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> ServiceResult<AccountResponse> {
        let input = RegisterInput {
            full_name: input.full_name.trim().to_string(),
            email: input.email.trim().to_string(),
            username: input.username.trim().to_string(),
            ..input
        };

        // The password is stored as typed; only its blankness is checked
        if [
            input.full_name.as_str(),
            input.email.as_str(),
            input.username.as_str(),
            input.password.trim(),
        ]
        .iter()
        .any(|field| field.is_empty())
        {
            return Err(ServiceError::invalid_input("All fields are required"));
        }

        input
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let avatar = input
            .avatar
            .as_ref()
            .filter(|upload| !upload.is_empty())
            .ok_or_else(|| ServiceError::invalid_input("Avatar is required"))?;

        if self
            .ctx
            .account_repo()
            .find_by_username_or_email(&input.username, &input.email)
            .await?
            .is_some()
        {
            warn!("Registration rejected: username or email taken");
            return Err(DomainError::ConflictingAccount.into());
        }

        let avatar = self.ctx.media_store().upload(avatar).await?;

        let cover_upload = input.cover_image.as_ref().filter(|upload| !upload.is_empty());
        let cover_image = match cover_upload {
            Some(upload) => match self.ctx.media_store().upload(upload).await {
                Ok(asset) => Some(asset),
                Err(e) => {
                    self.discard_assets(&[&avatar]).await;
                    return Err(e.into());
                }
            },
            None => None,
        };

        let uploaded: Vec<&MediaAsset> = std::iter::once(&avatar)
            .chain(cover_image.as_ref())
            .collect();

        let password_hash = match self.ctx.password_service().hash(&input.password) {
            Ok(hash) => hash,
            Err(e) => {
                self.discard_assets(&uploaded).await;
                return Err(e.into());
            }
        };

        let mut account = Account::new(
            self.ctx.generate_id(),
            &input.username,
            input.email.clone(),
            input.full_name.clone(),
            avatar.url.clone(),
        );
        account.cover_image = cover_image.as_ref().map(|asset| asset.url.clone());

        let record = AccountRecord::new(account, password_hash);

        if let Err(e) = self.ctx.account_repo().create(&record).await {
            self.discard_assets(&uploaded).await;
            return Err(e.into());
        }

        info!(account_id = %record.id(), "Account registered");

        Ok(AccountResponse::from(&record.account))
    }

    /// Fetch the authenticated account
    #[instrument(skip(self))]
    pub async fn current(&self, account_id: Snowflake) -> ServiceResult<AccountResponse> {
        let account = self.load(account_id).await?;
        Ok(AccountResponse::from(&account))
    }

    /// Update the display name and/or email
    #[instrument(skip(self, request))]
    pub async fn update_details(
        &self,
        account_id: Snowflake,
        request: UpdateAccountRequest,
    ) -> ServiceResult<AccountResponse> {
        let full_name = request.full_name();
        let email = request.email();

        if full_name.is_none() && email.is_none() {
            return Err(ServiceError::invalid_input("Full name or email is required"));
        }

        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let account = self
            .ctx
            .account_repo()
            .update_details(account_id, full_name, email)
            .await?;

        info!(account_id = %account_id, "Account details updated");

        Ok(AccountResponse::from(&account))
    }

    /// Replace the avatar
    #[instrument(skip(self, upload))]
    pub async fn update_avatar(
        &self,
        account_id: Snowflake,
        upload: MediaUpload,
    ) -> ServiceResult<AccountResponse> {
        self.replace_media(account_id, MediaSlot::Avatar, &upload).await
    }

    /// Replace the cover image
    #[instrument(skip(self, upload))]
    pub async fn update_cover_image(
        &self,
        account_id: Snowflake,
        upload: MediaUpload,
    ) -> ServiceResult<AccountResponse> {
        self.replace_media(account_id, MediaSlot::CoverImage, &upload)
            .await
    }

    /// Delete the account, which also ends its session
    #[instrument(skip(self))]
    pub async fn delete_account(&self, account_id: Snowflake) -> ServiceResult<()> {
        let account = self.load(account_id).await?;

        self.ctx.account_repo().delete_by_id(account_id).await?;

        let mut assets = vec![MediaAsset::new(account.avatar)];
        assets.extend(account.cover_image.map(MediaAsset::new));
        self.discard_assets(&assets.iter().collect::<Vec<_>>()).await;

        info!(account_id = %account_id, "Account deleted");
        Ok(())
    }

    async fn load(&self, account_id: Snowflake) -> ServiceResult<Account> {
        self.ctx
            .account_repo()
            .find_by_id(account_id)
            .await?
            .map(AccountRecord::into_account)
            .ok_or_else(|| ServiceError::not_found("Account", account_id.to_string()))
    }

    async fn replace_media(
        &self,
        account_id: Snowflake,
        slot: MediaSlot,
        upload: &MediaUpload,
    ) -> ServiceResult<AccountResponse> {
        if upload.is_empty() {
            return Err(ServiceError::invalid_input(format!(
                "{} file is missing",
                slot.label()
            )));
        }

        // No upload for an account that is already gone
        self.load(account_id).await?;
        let asset = self.ctx.media_store().upload(upload).await?;

        let replaced = match self
            .ctx
            .account_repo()
            .update_media(account_id, slot, &asset.url)
            .await
        {
            Ok(replaced) => replaced,
            Err(e) => {
                self.discard_assets(&[&asset]).await;
                return Err(e.into());
            }
        };

        if let Some(previous) = replaced.previous.filter(|url| *url != asset.url) {
            self.discard_assets(&[&MediaAsset::new(previous)]).await;
        }

        info!(account_id = %account_id, slot = ?slot, "Account media replaced");

        Ok(AccountResponse::from(&replaced.account))
    }

    /// Best-effort removal; failures are logged and swallowed
    async fn discard_assets(&self, assets: &[&MediaAsset]) {
        for asset in assets {
            if let Err(e) = self.ctx.media_store().delete(&asset.url).await {
                warn!(url = %asset.url, error = %e, "Failed to delete media asset");
            }
        }
    }
}
