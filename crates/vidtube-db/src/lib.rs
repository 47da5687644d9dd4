//! # vidtube-db
//!
//! Database layer implementing the `vidtube-core` repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - [`Database`] owns the connection pool: explicit `connect`, `migrate` and `close`
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vidtube_common::DatabaseConfig;
//! use vidtube_core::AccountRepository;
//! use vidtube_db::Database;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect(&DatabaseConfig::with_url("postgres://localhost/vidtube")).await?;
//!     db.migrate().await?;
//!
//!     let accounts = db.accounts();
//!     accounts.ping().await?;
//!
//!     db.close().await;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, Database, PgPool};
pub use repositories::{PgAccountRepository, PgChannelRepository};
