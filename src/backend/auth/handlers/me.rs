/**
 * Current User Handler
 *
 * `GET /api/auth/me` echoes the identity carried by the bearer token. The
 * database is not consulted.
 */

use axum::Json;

use crate::backend::middleware::AuthUser;
use crate::shared::writing::MeResponse;

pub async fn get_me(AuthUser(identity): AuthUser) -> Json<MeResponse> {
    Json(MeResponse { user: identity })
}
