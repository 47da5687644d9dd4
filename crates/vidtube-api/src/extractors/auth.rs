//! Authentication extractor
//!
//! Validates the access token from the `Authorization: Bearer` header, or
//! from the `accessToken` cookie when no header is sent.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    extract::CookieJar,
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use vidtube_core::Snowflake;

use crate::cookies::{token_from, ACCESS_TOKEN_COOKIE};
use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated account extracted from the access token
#[derive(Debug, Clone)]
pub struct AuthAccount {
    pub account_id: Snowflake,
}

impl AuthAccount {
    pub fn new(account_id: Snowflake) -> Self {
        Self { account_id }
    }
}

/// Raw access token from the header or, failing that, the cookie
async fn access_token<S>(parts: &mut Parts, state: &S) -> Option<String>
where
    S: Send + Sync,
{
    if let Ok(TypedHeader(Authorization(bearer))) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await
    {
        return Some(bearer.token().to_string());
    }

    let jar = CookieJar::from_headers(&parts.headers);
    token_from(&jar, ACCESS_TOKEN_COOKIE)
}

fn authenticate(state: &AppState, token: &str) -> Result<AuthAccount, ApiError> {
    let claims = state.jwt_service().validate_access_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Invalid access token");
        ApiError::App(e)
    })?;

    let account_id = claims.account_id().map_err(|e| {
        tracing::warn!(error = %e, "Invalid account ID in token");
        ApiError::App(e)
    })?;

    Ok(AuthAccount::new(account_id))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthAccount
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = access_token(parts, state)
            .await
            .ok_or(ApiError::MissingAuth)?;

        authenticate(&AppState::from_ref(state), &token)
    }
}

/// Optional authenticated account
///
/// `None` when no credential is sent; an invalid credential is still rejected.
#[derive(Debug, Clone)]
pub struct OptionalAuthAccount(pub Option<AuthAccount>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthAccount
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match access_token(parts, state).await {
            Some(token) => Ok(Self(Some(authenticate(&AppState::from_ref(state), &token)?))),
            None => Ok(Self(None)),
        }
    }
}
