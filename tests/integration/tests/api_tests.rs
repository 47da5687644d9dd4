//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! The media service is stubbed in-process. Token secrets fall back to
//! throwaway values when unset.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, image_part, TestServer,
};
use reqwest::multipart::Form;
use reqwest::{header, StatusCode};

/// Register a fresh account and log in by username
async fn register_and_login(server: &TestServer) -> (RegisterForm, AuthResponse) {
    let form = RegisterForm::unique();
    let response = server
        .post_form("/auth/register", form.to_form(false))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post("/auth/login", &LoginRequest::by_username(&form))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    (form, auth)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_register_account() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let form = RegisterForm::unique();

    let response = server
        .post_form("/auth/register", form.to_form(true))
        .await
        .unwrap();
    let account: AccountResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(account.username, form.username);
    assert_eq!(account.email, form.email);
    assert_eq!(account.full_name, form.full_name);
    assert!(account.avatar.starts_with("https://cdn.test/"));
    assert!(account.cover_image.is_some());
}

#[tokio::test]
async fn test_register_without_avatar() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let form = RegisterForm::unique();

    let response = server
        .post_form("/auth/register", form.to_form_without_avatar())
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_INPUT");
}

#[tokio::test]
async fn test_register_duplicate_username() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let form = RegisterForm::unique();

    let response = server
        .post_form("/auth/register", form.to_form(false))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let mut duplicate = RegisterForm::unique();
    duplicate.username = form.username.to_uppercase();
    let response = server
        .post_form("/auth/register", duplicate.to_form(false))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.code, "CONFLICTING_ACCOUNT");
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_login_sets_session_cookies() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let form = RegisterForm::unique();
    server
        .post_form("/auth/register", form.to_form(false))
        .await
        .unwrap();

    let response = server
        .post("/auth/login", &LoginRequest::by_email(&form))
        .await
        .unwrap();

    let cookies: Vec<String> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_string))
        .collect();
    assert!(cookies.iter().any(|c| c.starts_with("accessToken=") && c.contains("HttpOnly")));
    assert!(cookies.iter().any(|c| c.starts_with("refreshToken=") && c.contains("HttpOnly")));

    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.account.username, form.username);
    assert_eq!(auth.token_type, "Bearer");
    assert!(auth.expires_in > 0);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (form, _) = register_and_login(&server).await;

    let wrong_password = LoginRequest {
        username: Some(form.username.clone()),
        password: "wrongpass".to_string(),
        ..LoginRequest::default()
    };
    let unknown = LoginRequest {
        email: Some("nobody@example.com".to_string()),
        password: "wrongpass".to_string(),
        ..LoginRequest::default()
    };

    for request in [wrong_password, unknown] {
        let response = server.post("/auth/login", &request).await.unwrap();
        let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
        assert_eq!(error.error.code, "INVALID_CREDENTIALS");
    }
}

#[tokio::test]
async fn test_login_requires_identifier() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = LoginRequest {
        password: "whatever".to_string(),
        ..LoginRequest::default()
    };

    let response = server.post("/auth/login", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_refresh_rotates_and_rejects_reuse() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;

    let request = RefreshTokenRequest {
        refresh_token: auth.refresh_token.clone(),
    };
    let response = server.post("/auth/refresh", &request).await.unwrap();
    let tokens: TokenPairResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_ne!(tokens.refresh_token, auth.refresh_token);
    assert!(tokens.refresh_expires_in > tokens.expires_in);

    // The old token was consumed by the rotation
    let response = server.post("/auth/refresh", &request).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.error.code, "TOKEN_REUSE_DETECTED");

    let response = server
        .get_auth("/users/me", &tokens.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_refresh_from_cookie() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;

    let response = server
        .client
        .post(format!("{}/api/v1/auth/refresh", server.base_url()))
        .header(header::COOKIE, format!("refreshToken={}", auth.refresh_token))
        .send()
        .await
        .unwrap();
    let tokens: TokenPairResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!tokens.access_token.is_empty());
}

#[tokio::test]
async fn test_refresh_without_token() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .client
        .post(format!("{}/api/v1/auth/refresh", server.base_url()))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;

    let response = server
        .post_auth("/auth/logout", &auth.access_token, &serde_json::json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let request = RefreshTokenRequest {
        refresh_token: auth.refresh_token,
    };
    let response = server.post("/auth/refresh", &request).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_change_password() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (form, auth) = register_and_login(&server).await;

    let wrong = ChangePasswordRequest {
        old_password: "not-it".to_string(),
        new_password: "NewPass456!".to_string(),
    };
    let response = server
        .post_auth("/auth/change-password", &auth.access_token, &wrong)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let request = ChangePasswordRequest {
        old_password: form.password.clone(),
        new_password: "NewPass456!".to_string(),
    };
    let response = server
        .post_auth("/auth/change-password", &auth.access_token, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let old_login = server
        .post("/auth/login", &LoginRequest::by_username(&form))
        .await
        .unwrap();
    assert_status(old_login, StatusCode::UNAUTHORIZED).await.unwrap();

    let new_login = LoginRequest {
        username: Some(form.username.clone()),
        password: "NewPass456!".to_string(),
        ..LoginRequest::default()
    };
    let response = server.post("/auth/login", &new_login).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Account Tests
// ============================================================================

#[tokio::test]
async fn test_current_account_requires_auth() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/users/me").await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.error.code, "MISSING_AUTH");

    let response = server.get_auth("/users/me", "not-a-jwt").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_update_account_details() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;

    let request = UpdateAccountRequest {
        full_name: Some("Renamed Creator".to_string()),
        email: None,
    };
    let response = server
        .patch_auth("/users/me", &auth.access_token, &request)
        .await
        .unwrap();
    let account: AccountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(account.full_name, "Renamed Creator");
    assert_eq!(account.email, auth.account.email);

    let response = server
        .patch_auth("/users/me", &auth.access_token, &UpdateAccountRequest::default())
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_update_avatar() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;

    let form = Form::new().part("avatar", image_part("new-avatar.png"));
    let response = server
        .patch_form_auth("/users/me/avatar", &auth.access_token, form)
        .await
        .unwrap();
    let account: AccountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_ne!(account.avatar, auth.account.avatar);

    let response = server
        .patch_form_auth(
            "/users/me/cover-image",
            &auth.access_token,
            Form::new().text("note", "no file"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_watch_history_starts_empty() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_and_login(&server).await;

    let response = server
        .get_auth("/users/me/history", &auth.access_token)
        .await
        .unwrap();
    let history: Vec<WatchedVideoResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn test_delete_account() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (form, auth) = register_and_login(&server).await;

    let response = server
        .delete_auth("/users/me", &auth.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth("/users/me", &auth.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .post("/auth/login", &LoginRequest::by_username(&form))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Channel Tests
// ============================================================================

#[tokio::test]
async fn test_channel_profile() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (form, auth) = register_and_login(&server).await;
    let path = format!("/channels/{}", form.username);

    let response = server.get(&path).await.unwrap();
    let profile: ChannelProfileResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.username, form.username);
    assert_eq!(profile.id, auth.account.id);
    assert_eq!(profile.subscribers_count, 0);
    assert_eq!(profile.channels_subscribed_to_count, 0);
    assert!(!profile.is_subscribed);

    let response = server.get_auth(&path, &auth.access_token).await.unwrap();
    let profile: ChannelProfileResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!profile.is_subscribed);
}

#[tokio::test]
async fn test_channel_profile_not_found() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let path = format!("/channels/ghost_{}", unique_suffix());

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
