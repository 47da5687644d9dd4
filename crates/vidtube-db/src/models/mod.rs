//! Database models - SQLx-compatible structs for PostgreSQL rows

mod account;
mod channel;

pub use account::{AccountModel, ReplacedMediaModel};
pub use channel::{ChannelProfileModel, WatchedVideoModel};
