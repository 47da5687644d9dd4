//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use vidtube_core::entities::{Account, ChannelProfile, VideoOwner, WatchedVideo};

use super::responses::{
    AccountResponse, ChannelProfileResponse, VideoOwnerResponse, WatchedVideoResponse,
};

// ============================================================================
// Account Mappers
// ============================================================================

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            username: account.username.clone(),
            email: account.email.clone(),
            full_name: account.full_name.clone(),
            avatar: account.avatar.clone(),
            cover_image: account.cover_image.clone(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self::from(&account)
    }
}

// ============================================================================
// Channel Mappers
// ============================================================================

impl From<ChannelProfile> for ChannelProfileResponse {
    fn from(profile: ChannelProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            username: profile.username,
            full_name: profile.full_name,
            avatar: profile.avatar,
            cover_image: profile.cover_image,
            subscribers_count: profile.subscribers_count,
            channels_subscribed_to_count: profile.subscribed_to_count,
            is_subscribed: profile.is_subscribed,
        }
    }
}

impl From<VideoOwner> for VideoOwnerResponse {
    fn from(owner: VideoOwner) -> Self {
        Self {
            id: owner.id.to_string(),
            username: owner.username,
            full_name: owner.full_name,
            avatar: owner.avatar,
        }
    }
}

impl From<WatchedVideo> for WatchedVideoResponse {
    fn from(video: WatchedVideo) -> Self {
        Self {
            id: video.id.to_string(),
            title: video.title,
            thumbnail: video.thumbnail,
            video_file: video.video_file,
            duration: video.duration,
            views: video.views,
            owner: video.owner.into(),
            watched_at: video.watched_at,
        }
    }
}
