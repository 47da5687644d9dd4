//! Domain entities - core business objects

mod account;
mod channel;
mod media;

pub use account::{Account, AccountRecord};
pub use channel::{ChannelProfile, VideoOwner, WatchedVideo};
pub use media::{MediaAsset, MediaSlot, MediaUpload, ReplacedMedia};
