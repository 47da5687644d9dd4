//! Session cookies
//!
//! Login and refresh hand the token pair out both in the JSON body and as
//! `HttpOnly`, `SameSite=Strict` cookies scoped to `/`. Outside development
//! the cookies are also `Secure`.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

fn session_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .secure(secure)
        .build()
}

/// Add both token cookies to the jar
pub fn with_session(
    jar: CookieJar,
    access_token: &str,
    refresh_token: &str,
    secure: bool,
) -> CookieJar {
    jar.add(session_cookie(ACCESS_TOKEN_COOKIE, access_token.to_string(), secure))
        .add(session_cookie(REFRESH_TOKEN_COOKIE, refresh_token.to_string(), secure))
}

/// Expire both token cookies
pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(ACCESS_TOKEN_COOKIE).path("/"))
        .remove(Cookie::build(REFRESH_TOKEN_COOKIE).path("/"))
}

/// Token value carried by a cookie, if present and non-empty
pub fn token_from(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|value| !value.is_empty())
}
