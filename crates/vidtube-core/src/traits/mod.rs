//! Ports implemented by the infrastructure crates

mod media;
mod repositories;

pub use media::MediaStore;
pub use repositories::{AccountRepository, ChannelRepository, RepoResult};
