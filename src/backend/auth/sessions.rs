/**
 * Session Tokens
 *
 * Issues and verifies the signed bearer tokens (HS256 JWT) that carry a
 * user's identity between requests. Verification is pure: it never touches
 * the database.
 */

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::writing::{Identity, User};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    pub username: String,
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Why a request could not be authenticated
#[derive(Debug, Error)]
pub enum TokenError {
    /// No `Authorization: Bearer` header
    #[error("Access token required")]
    Missing,

    /// Bad signature, malformed token or expired
    #[error("Invalid or expired token")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    /// Signature checked out but the subject is not a user id
    #[error("Invalid or expired token")]
    BadSubject(#[source] uuid::Error),
}

impl From<TokenError> for BackendError {
    fn from(err: TokenError) -> Self {
        BackendError::authentication(err.to_string())
    }
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Signs and verifies session tokens with one shared secret
#[derive(Clone)]
pub struct TokenIssuer {
    keys: Arc<Keys>,
    ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
            }),
            ttl,
        }
    }

    /// Create a token for a user
    pub fn issue(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_for(&Identity {
            user_id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        })
    }

    /// Create a token embedding the given identity
    pub fn issue_for(&self, identity: &Identity) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: identity.user_id.to_string(),
            username: identity.username.clone(),
            email: identity.email.clone(),
            exp: (now + self.ttl).timestamp().max(0) as u64,
            iat: now.timestamp().max(0) as u64,
        };

        encode(&Header::default(), &claims, &self.keys.encoding)
    }

    /// Verify a token and return the identity it carries
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let data = decode::<Claims>(token, &self.keys.decoding, &Validation::default())
            .map_err(TokenError::Invalid)?;
        let claims = data.claims;
        let user_id = Uuid::parse_str(&claims.sub).map_err(TokenError::BadSubject)?;

        Ok(Identity {
            user_id,
            username: claims.username,
            email: claims.email,
        })
    }
}
