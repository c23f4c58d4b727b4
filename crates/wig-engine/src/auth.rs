//! Owner token validation.
//!
//! Service operations take an [`Authorized`], and the only way to get one
//! is [`Inventory::authorize`](crate::Inventory::authorize).

use std::fmt;
use std::ops::Deref;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use wig_core::OwnerId;

/// Decides whether `token` proves the caller is `owner`.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn validate(&self, owner: &str, token: &str) -> bool;
}

/// An owner whose token was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorized {
    owner: OwnerId,
}

impl Authorized {
    pub(crate) fn new(owner: OwnerId) -> Self {
        Authorized { owner }
    }

    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }
}

impl Deref for Authorized {
    type Target = OwnerId;

    fn deref(&self) -> &OwnerId {
        &self.owner
    }
}

impl fmt::Display for Authorized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.owner.fmt(f)
    }
}

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (owner id)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// HS256 validator: a token is valid when its signature and expiry check
/// out and its `sub` claim is the owner.
pub struct JwtAuthenticator {
    secret: String,
}

impl JwtAuthenticator {
    pub fn new(secret: impl Into<String>) -> Self {
        JwtAuthenticator {
            secret: secret.into(),
        }
    }

    /// Signs a token whose subject is `owner`.
    pub fn issue(
        &self,
        owner: &OwnerId,
        lifetime: Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: owner.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Validate and decode a token.
    pub fn decode_claims(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data: TokenData<Claims> = decode(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )?;

        Ok(token_data.claims)
    }
}

#[async_trait]
impl Authenticator for JwtAuthenticator {
    async fn validate(&self, owner: &str, token: &str) -> bool {
        match self.decode_claims(token) {
            Ok(claims) => claims.sub == owner,
            Err(e) => {
                debug!(owner = %owner, error = %e, "Rejected token");
                false
            }
        }
    }
}
