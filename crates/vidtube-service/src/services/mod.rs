//! Business logic services
//!
//! Each service borrows a [`ServiceContext`] for the duration of a request.

pub mod account;
pub mod channel;
pub mod context;
pub mod error;
pub mod session;

pub use account::AccountService;
pub use channel::ChannelService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use session::SessionService;
