//! # vidtube-service
//!
//! Application layer: the session/token lifecycle, account management and
//! channel lookups, plus the DTOs they accept and return.

pub mod dto;
pub mod services;

pub use dto::{
    AccountResponse, AuthResponse, ChangePasswordRequest, ChannelProfileResponse, HealthChecks,
    HealthResponse, LoginRequest, ReadinessResponse, RegisterInput, RotateRequest,
    UpdateAccountRequest, VideoOwnerResponse, WatchedVideoResponse,
};
pub use services::{
    AccountService, ChannelService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, SessionService,
};
pub use vidtube_common::TokenPair;
