/**
 * Request Extractors
 *
 * Extractors that reject with `BackendError`, so every failure, including a
 * malformed body or path, is rendered in the API's JSON error format.
 */

use axum::extract::FromRequest;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::EntityKind;

/// `axum::Json` with a JSON error body on rejection
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(BackendError))]
pub struct ApiJson<T>(pub T);

impl<T: Serialize> IntoResponse for ApiJson<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Parse a path id, treating garbage as a missing row
pub fn parse_id(raw: &str, label: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(raw).map_err(|_| BackendError::not_found(format!("{} not found", label)))
}

/// Parse an `:entityType/:entityId` pair from a files route
pub fn parse_entity(kind: &str, raw_id: &str) -> Result<(EntityKind, Uuid), BackendError> {
    let kind = EntityKind::from_plural(kind)?;
    let id = parse_id(raw_id, kind.label())?;
    Ok((kind, id))
}
