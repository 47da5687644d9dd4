//! Channel handlers

use axum::{
    extract::{Path, State},
    Json,
};
use vidtube_service::{ChannelProfileResponse, ChannelService};

use crate::extractors::OptionalAuthAccount;
use crate::response::ApiResult;
use crate::state::AppState;

/// Public channel profile; `is_subscribed` reflects the caller when authenticated
///
/// GET /channels/{username}
pub async fn get_channel_profile(
    State(state): State<AppState>,
    OptionalAuthAccount(viewer): OptionalAuthAccount,
    Path(username): Path<String>,
) -> ApiResult<Json<ChannelProfileResponse>> {
    let service = ChannelService::new(state.service_context());
    let response = service
        .channel_profile(&username, viewer.map(|auth| auth.account_id))
        .await?;
    Ok(Json(response))
}
