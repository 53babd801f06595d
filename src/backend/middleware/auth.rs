/**
 * Authentication Middleware
 *
 * Protects every route except register, login and health. The bearer token
 * from the `Authorization` header is verified and the identity it carries is
 * attached to the request extensions for `AuthUser` to pick up.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::sessions::{TokenError, TokenIssuer};
use crate::backend::error::BackendError;
use crate::shared::writing::Identity;

/// Authentication middleware
///
/// 1. Extracts the token from `Authorization: Bearer <token>`
/// 2. Verifies signature and expiry
/// 3. Attaches the `Identity` to the request extensions
///
/// Returns 401 if the token is missing or invalid. The database is never
/// consulted; a token stays valid until it expires.
pub async fn auth_middleware(
    State(tokens): State<TokenIssuer>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers()).ok_or_else(|| {
        tracing::warn!("Missing or malformed Authorization header");
        TokenError::Missing
    })?;

    let identity = tokens.verify(token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        e
    })?;

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Axum extractor for the authenticated user
///
/// Only usable on routes behind `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub Identity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts.extensions.get::<Identity>().cloned().ok_or_else(|| {
            tracing::warn!("Identity not found in request extensions");
            BackendError::from(TokenError::Missing)
        })?;

        Ok(AuthUser(identity))
    }
}
