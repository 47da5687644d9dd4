//! Channel read-model mappers

use vidtube_core::entities::{ChannelProfile, VideoOwner, WatchedVideo};
use vidtube_core::value_objects::Snowflake;

use crate::models::{ChannelProfileModel, WatchedVideoModel};

impl From<ChannelProfileModel> for ChannelProfile {
    fn from(model: ChannelProfileModel) -> Self {
        ChannelProfile {
            id: Snowflake::new(model.id),
            username: model.username,
            full_name: model.full_name,
            avatar: model.avatar,
            cover_image: model.cover_image,
            subscribers_count: model.subscribers_count,
            subscribed_to_count: model.subscribed_to_count,
            is_subscribed: model.is_subscribed,
        }
    }
}

impl From<WatchedVideoModel> for WatchedVideo {
    fn from(model: WatchedVideoModel) -> Self {
        WatchedVideo {
            id: Snowflake::new(model.id),
            title: model.title,
            thumbnail: model.thumbnail,
            video_file: model.video_file,
            duration: model.duration,
            views: model.views,
            owner: VideoOwner {
                id: Snowflake::new(model.owner_id),
                username: model.owner_username,
                full_name: model.owner_full_name,
                avatar: model.owner_avatar,
            },
            watched_at: model.watched_at,
        }
    }
}
