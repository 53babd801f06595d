/**
 * Register Handler
 *
 * `POST /api/auth/register` creates an account and signs the caller in.
 *
 * # Validation
 *
 * - `username`, `email` and `password` are all required
 * - `email` must contain `@`
 * - `password` must be at least six characters
 * - `username` and `email` must both be unused
 */

use axum::{extract::State, http::StatusCode, Json};

use crate::backend::auth::credentials::CredentialStore;
use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;
use crate::shared::writing::{AuthResponse, RegisterRequest, UserResponse};

/// Register handler
///
/// # Example Request
///
/// ```http
/// POST /api/auth/register HTTP/1.1
/// Content-Type: application/json
///
/// { "username": "ada", "email": "ada@example.com", "password": "secret1" }
/// ```
///
/// # Responses
///
/// * `201 Created` - `{message, token, user}`
/// * `400 Bad Request` - validation failure or duplicate user
pub async fn register(
    State(credentials): State<CredentialStore>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    tracing::info!("Registration request for: {}", request.email.trim());

    let registration = credentials
        .register(&request.username, &request.email, &request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            token: registration.token,
            user: UserResponse::from(&registration.user),
        }),
    ))
}
