//! Row shapes produced by the channel aggregation queries

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// One account joined with its subscription counts
#[derive(Debug, Clone, FromRow)]
pub struct ChannelProfileModel {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub avatar: String,
    pub cover_image: Option<String>,
    pub subscribers_count: i64,
    pub subscribed_to_count: i64,
    pub is_subscribed: bool,
}

/// A watch-history entry joined with its video and the video's owner
#[derive(Debug, Clone, FromRow)]
pub struct WatchedVideoModel {
    pub id: i64,
    pub title: String,
    pub thumbnail: String,
    pub video_file: String,
    pub duration: f64,
    pub views: i64,
    pub watched_at: DateTime<Utc>,
    pub owner_id: i64,
    pub owner_username: String,
    pub owner_full_name: String,
    pub owner_avatar: String,
}
