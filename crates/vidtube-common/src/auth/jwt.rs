//! JWT utilities for authentication
//!
//! Access and refresh tokens are signed with distinct secrets and carry
//! distinct lifetimes, so a token of one kind can never verify as the other.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vidtube_core::Snowflake;

use crate::config::JwtConfig;
use crate::error::AppError;

/// Token type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Unique token ID; two tokens minted in the same second still differ
    pub jti: String,
    /// Token type (access or refresh)
    pub token_type: TokenType,
}

impl Claims {
    /// Get the account ID encoded in the subject
    ///
    /// # Errors
    /// Returns an error if the subject cannot be parsed as a Snowflake
    pub fn account_id(&self) -> Result<Snowflake, AppError> {
        Snowflake::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }
}

/// Token pair containing access and refresh tokens
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("refresh_expires_in", &self.refresh_expires_in)
            .finish_non_exhaustive()
    }
}

/// Signing material for one token kind
#[derive(Clone)]
struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: i64,
}

impl SigningKeys {
    fn from_secret(secret: &str, ttl_seconds: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }
}

/// Secrets and lifetimes for both token kinds
#[derive(Clone, Copy)]
pub struct TokenSecrets<'a> {
    pub access_secret: &'a str,
    pub access_ttl: i64,
    pub refresh_secret: &'a str,
    pub refresh_ttl: i64,
}

/// JWT service for encoding and decoding tokens
#[derive(Clone)]
pub struct JwtService {
    access: SigningKeys,
    refresh: SigningKeys,
}

impl JwtService {
    /// Create a new JWT service
    #[must_use]
    pub fn new(secrets: TokenSecrets<'_>) -> Self {
        Self {
            access: SigningKeys::from_secret(secrets.access_secret, secrets.access_ttl),
            refresh: SigningKeys::from_secret(secrets.refresh_secret, secrets.refresh_ttl),
        }
    }

    /// Create a JWT service from configuration
    #[must_use]
    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(TokenSecrets {
            access_secret: &config.access_secret,
            access_ttl: config.access_token_expiry,
            refresh_secret: &config.refresh_secret,
            refresh_ttl: config.refresh_token_expiry,
        })
    }

    /// Access token lifetime in seconds
    #[must_use]
    pub fn access_token_expiry(&self) -> i64 {
        self.access.ttl_seconds
    }

    /// Refresh token lifetime in seconds
    #[must_use]
    pub fn refresh_token_expiry(&self) -> i64 {
        self.refresh.ttl_seconds
    }

    /// Generate a fresh token pair for an account
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn generate_token_pair(&self, account_id: Snowflake) -> Result<TokenPair, AppError> {
        let access_token = self.encode_token(account_id, TokenType::Access)?;
        let refresh_token = self.encode_token(account_id, TokenType::Refresh)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access.ttl_seconds,
            refresh_expires_in: self.refresh.ttl_seconds,
        })
    }

    fn keys(&self, token_type: TokenType) -> &SigningKeys {
        match token_type {
            TokenType::Access => &self.access,
            TokenType::Refresh => &self.refresh,
        }
    }

    fn encode_token(&self, account_id: Snowflake, token_type: TokenType) -> Result<String, AppError> {
        let keys = self.keys(token_type);
        let now = Utc::now();

        let claims = Claims {
            sub: account_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(keys.ttl_seconds)).timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type,
        };

        encode(&Header::default(), &claims, &keys.encoding)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to encode JWT: {e}")))
    }

    fn decode_token(&self, token: &str, token_type: TokenType) -> Result<Claims, AppError> {
        let mut validation = Validation::default();
        validation.set_required_spec_claims(&["exp", "sub"]);
        // A token is dead the second its `exp` passes
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.keys(token_type).decoding, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })?
            .claims;

        if claims.token_type != token_type {
            return Err(AppError::InvalidToken);
        }

        Ok(claims)
    }

    /// Validate an access token and return the claims
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or not an access token
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_token(token, TokenType::Access)
    }

    /// Validate a refresh token and return the claims
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or not a refresh token
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_token(token, TokenType::Refresh)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access.ttl_seconds)
            .field("refresh_token_expiry", &self.refresh.ttl_seconds)
            .finish_non_exhaustive()
    }
}
