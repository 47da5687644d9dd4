//! Channel service
//!
//! Read-only lookups over accounts viewed as channels.

use tracing::instrument;

use vidtube_core::Snowflake;

use crate::dto::{ChannelProfileResponse, WatchedVideoResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Channel service
pub struct ChannelService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChannelService<'a> {
    /// Create a new ChannelService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Public profile of the channel named `username`, with subscription
    /// counts and whether `viewer` subscribes to it.
    #[instrument(skip(self))]
    pub async fn channel_profile(
        &self,
        username: &str,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<ChannelProfileResponse> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ServiceError::invalid_input("username is missing"));
        }

        let profile = self
            .ctx
            .channel_repo()
            .channel_profile(username, viewer)
            .await?
            .ok_or_else(|| ServiceError::not_found("Channel", username))?;

        Ok(profile.into())
    }

    /// Videos the account has watched, most recent first
    #[instrument(skip(self))]
    pub async fn watch_history(
        &self,
        account_id: Snowflake,
    ) -> ServiceResult<Vec<WatchedVideoResponse>> {
        if self.ctx.account_repo().find_by_id(account_id).await?.is_none() {
            return Err(ServiceError::not_found("Account", account_id.to_string()));
        }

        let history = self.ctx.channel_repo().watch_history(account_id).await?;

        Ok(history.into_iter().map(Into::into).collect())
    }
}
