//! Authentication handlers
//!
//! Endpoints for registration, login, token refresh, logout and password change.

use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;
use vidtube_service::{
    AccountResponse, AccountService, AuthResponse, ChangePasswordRequest, LoginRequest,
    RegisterInput, RotateRequest, SessionService, TokenPair,
};

use crate::cookies::{clear_session, token_from, with_session, REFRESH_TOKEN_COOKIE};
use crate::extractors::{AuthAccount, MultipartForm, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a new account
///
/// POST /auth/register (multipart: fullName, email, username, password, avatar, coverImage?)
pub async fn register(
    State(state): State<AppState>,
    mut form: MultipartForm,
) -> ApiResult<Created<Json<AccountResponse>>> {
    let avatar = form.take_file(&["avatar"]);
    let cover_image = form.take_file(&["coverImage", "cover_image"]);

    let input = RegisterInput {
        full_name: text_field(&form, &["fullName", "full_name"]),
        email: text_field(&form, &["email"]),
        username: text_field(&form, &["username"]),
        password: text_field(&form, &["password"]),
        avatar,
        cover_image,
    };

    let service = AccountService::new(state.service_context());
    let response = service.register(input).await?;
    Ok(Created(Json(response)))
}

fn text_field(form: &MultipartForm, names: &[&str]) -> String {
    form.text(names).unwrap_or_default().to_string()
}

/// Login with username or email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<AuthResponse>)> {
    let service = SessionService::new(state.service_context());
    let response = service.login(request).await?;

    let jar = with_session(
        jar,
        &response.access_token,
        &response.refresh_token,
        state.secure_cookies(),
    );

    Ok((jar, Json(response)))
}

/// Rotate the refresh token
///
/// POST /auth/refresh (JSON `refresh_token`, or the `refreshToken` cookie)
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<RotateRequest>>,
) -> ApiResult<(CookieJar, Json<TokenPair>)> {
    let request = body
        .map(|Json(request)| request)
        .filter(|request| !request.refresh_token.trim().is_empty())
        .or_else(|| token_from(&jar, REFRESH_TOKEN_COOKIE).map(RotateRequest::new))
        .ok_or(ApiError::MissingAuth)?;

    let service = SessionService::new(state.service_context());
    let tokens = service.rotate(request).await?;

    let jar = with_session(
        jar,
        &tokens.access_token,
        &tokens.refresh_token,
        state.secure_cookies(),
    );
    Ok((jar, Json(tokens)))
}

/// Logout: revoke the session and clear cookies
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthAccount,
    jar: CookieJar,
) -> ApiResult<(CookieJar, NoContent)> {
    let service = SessionService::new(state.service_context());
    service.revoke(auth.account_id).await?;
    Ok((clear_session(jar), NoContent))
}

/// Change the password of the current account
///
/// POST /auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthAccount,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<NoContent> {
    let service = SessionService::new(state.service_context());
    service.change_password(auth.account_id, request).await?;
    Ok(NoContent)
}
