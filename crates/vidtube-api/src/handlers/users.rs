//! Account handlers
//!
//! Endpoints for the authenticated account: profile, media, deletion and
//! watch history.

use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;
use vidtube_service::{
    AccountResponse, AccountService, ChannelService, ServiceError, UpdateAccountRequest,
    WatchedVideoResponse,
};

use crate::cookies::clear_session;
use crate::extractors::{AuthAccount, MultipartForm, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Get the current account
///
/// GET /users/me
pub async fn get_current_account(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> ApiResult<Json<AccountResponse>> {
    let service = AccountService::new(state.service_context());
    let response = service.current(auth.account_id).await?;
    Ok(Json(response))
}

/// Update full name and/or email
///
/// PATCH /users/me
pub async fn update_current_account(
    State(state): State<AppState>,
    auth: AuthAccount,
    ValidatedJson(request): ValidatedJson<UpdateAccountRequest>,
) -> ApiResult<Json<AccountResponse>> {
    let service = AccountService::new(state.service_context());
    let response = service.update_details(auth.account_id, request).await?;
    Ok(Json(response))
}

/// Delete the current account and clear its cookies
///
/// DELETE /users/me
pub async fn delete_current_account(
    State(state): State<AppState>,
    auth: AuthAccount,
    jar: CookieJar,
) -> ApiResult<(CookieJar, NoContent)> {
    let service = AccountService::new(state.service_context());
    service.delete_account(auth.account_id).await?;
    Ok((clear_session(jar), NoContent))
}

/// Replace the avatar
///
/// PATCH /users/me/avatar (multipart `avatar`)
pub async fn update_avatar(
    State(state): State<AppState>,
    auth: AuthAccount,
    mut form: MultipartForm,
) -> ApiResult<Json<AccountResponse>> {
    let upload = form
        .take_file(&["avatar"])
        .ok_or_else(|| ServiceError::invalid_input("Avatar file is missing"))?;

    let service = AccountService::new(state.service_context());
    let response = service.update_avatar(auth.account_id, upload).await?;
    Ok(Json(response))
}

/// Replace the cover image
///
/// PATCH /users/me/cover-image (multipart `coverImage`)
pub async fn update_cover_image(
    State(state): State<AppState>,
    auth: AuthAccount,
    mut form: MultipartForm,
) -> ApiResult<Json<AccountResponse>> {
    let upload = form
        .take_file(&["coverImage", "cover_image"])
        .ok_or_else(|| ServiceError::invalid_input("Cover image file is missing"))?;

    let service = AccountService::new(state.service_context());
    let response = service.update_cover_image(auth.account_id, upload).await?;
    Ok(Json(response))
}

/// Watch history, most recent first
///
/// GET /users/me/history
pub async fn get_watch_history(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> ApiResult<Json<Vec<WatchedVideoResponse>>> {
    let service = ChannelService::new(state.service_context());
    let history = service.watch_history(auth.account_id).await?;
    Ok(Json(history))
}
