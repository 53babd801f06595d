/**
 * Login Handler
 *
 * `POST /api/auth/login` exchanges an email and password for a token.
 *
 * An unknown email and a wrong password produce the same 401 response, so
 * the endpoint cannot be used to discover registered addresses.
 */

use axum::{extract::State, Json};

use crate::backend::auth::credentials::CredentialStore;
use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;
use crate::shared::writing::{AuthResponse, LoginRequest, UserResponse};

/// Login handler
///
/// # Responses
///
/// * `200 OK` - `{message, token, user}`
/// * `400 Bad Request` - email or password missing
/// * `401 Unauthorized` - `{"message": "Invalid email or password"}`
pub async fn login(
    State(credentials): State<CredentialStore>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let session = credentials.login(&request.email, &request.password).await?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token: session.token,
        user: UserResponse::from(&session.user),
    }))
}
