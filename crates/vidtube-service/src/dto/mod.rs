//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    ChangePasswordRequest, LoginRequest, RegisterInput, RotateRequest, UpdateAccountRequest,
};

pub use responses::{
    AccountResponse, AuthResponse, ChannelProfileResponse, HealthChecks, HealthResponse,
    ReadinessResponse, VideoOwnerResponse, WatchedVideoResponse,
};
