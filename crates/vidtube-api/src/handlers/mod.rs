//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod channels;
pub mod health;
pub mod users;
