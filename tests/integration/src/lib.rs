//! Integration test utilities for the VidTube API
//!
//! Spawns the real router against PostgreSQL with a stubbed media service.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
