//! Channel read models produced by store-side aggregation

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Public profile of a channel (an account viewed as a publisher)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelProfile {
    pub id: Snowflake,
    pub username: String,
    pub full_name: String,
    pub avatar: String,
    pub cover_image: Option<String>,
    /// Number of accounts subscribed to this channel
    pub subscribers_count: i64,
    /// Number of channels this account subscribes to
    pub subscribed_to_count: i64,
    /// Whether the viewing account subscribes to this channel
    pub is_subscribed: bool,
}

/// Owner summary embedded in watch history entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoOwner {
    pub id: Snowflake,
    pub username: String,
    pub full_name: String,
    pub avatar: String,
}

/// A video from an account's watch history
#[derive(Debug, Clone, PartialEq)]
pub struct WatchedVideo {
    pub id: Snowflake,
    pub title: String,
    pub thumbnail: String,
    pub video_file: String,
    /// Duration in seconds
    pub duration: f64,
    pub views: i64,
    pub owner: VideoOwner,
    pub watched_at: DateTime<Utc>,
}
