//! PostgreSQL implementation of ChannelRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use vidtube_core::entities::{ChannelProfile, WatchedVideo};
use vidtube_core::traits::{ChannelRepository, RepoResult};
use vidtube_core::value_objects::Snowflake;

use crate::models::{ChannelProfileModel, WatchedVideoModel};

use super::error::map_db_error;

/// PostgreSQL implementation of ChannelRepository
#[derive(Clone)]
pub struct PgChannelRepository {
    pool: PgPool,
}

impl PgChannelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChannelRepository for PgChannelRepository {
    #[instrument(skip(self))]
    async fn channel_profile(
        &self,
        username: &str,
        viewer: Option<Snowflake>,
    ) -> RepoResult<Option<ChannelProfile>> {
        let result = sqlx::query_as::<_, ChannelProfileModel>(
            r"
            SELECT a.id, a.username, a.full_name, a.avatar, a.cover_image,
                   (SELECT COUNT(*) FROM subscriptions s WHERE s.channel_id = a.id)
                       AS subscribers_count,
                   (SELECT COUNT(*) FROM subscriptions s WHERE s.subscriber_id = a.id)
                       AS subscribed_to_count,
                   EXISTS(
                       SELECT 1 FROM subscriptions s
                       WHERE s.channel_id = a.id AND s.subscriber_id = $2
                   ) AS is_subscribed
            FROM accounts a
            WHERE a.username = lower($1)
            ",
        )
        .bind(username.trim())
        .bind(viewer.map(Snowflake::into_inner))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ChannelProfile::from))
    }

    #[instrument(skip(self))]
    async fn watch_history(&self, account_id: Snowflake) -> RepoResult<Vec<WatchedVideo>> {
        let rows = sqlx::query_as::<_, WatchedVideoModel>(
            r"
            SELECT v.id, v.title, v.thumbnail, v.video_file, v.duration, v.views,
                   w.watched_at,
                   o.id AS owner_id, o.username AS owner_username,
                   o.full_name AS owner_full_name, o.avatar AS owner_avatar
            FROM watch_history w
            JOIN videos v ON v.id = w.video_id
            JOIN accounts o ON o.id = v.owner_id
            WHERE w.account_id = $1
            ORDER BY w.watched_at DESC
            ",
        )
        .bind(account_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(WatchedVideo::from).collect())
    }
}
