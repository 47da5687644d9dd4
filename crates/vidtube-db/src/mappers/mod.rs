//! Model to entity mappers
//!
//! - `From<Model> for Entity`: convert database rows to domain objects
//! - `AccountWrite`: borrow entity data for inserts and updates

mod account;
mod channel;

pub use account::AccountWrite;
