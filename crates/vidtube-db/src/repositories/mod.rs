//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in vidtube-core.

mod account;
mod channel;
mod error;

pub use account::PgAccountRepository;
pub use channel::PgChannelRepository;
