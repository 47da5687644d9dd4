//! # vidtube-core
//!
//! Domain layer containing the account entity, channel read models, repository
//! traits, and the media store port.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Account, AccountRecord, ChannelProfile, MediaAsset, MediaSlot, MediaUpload, ReplacedMedia,
    VideoOwner, WatchedVideo,
};
pub use error::DomainError;
pub use traits::{AccountRepository, ChannelRepository, MediaStore, RepoResult};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
