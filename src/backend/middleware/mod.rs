//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - Bearer-token authentication for protected routes
//!
//! # Example
//!
//! ```rust,no_run
//! use storyforge::backend::middleware::{auth_middleware, AuthUser};
//!
//! // router.route_layer(axum::middleware::from_fn_with_state(state, auth_middleware))
//! ```

pub mod auth;

pub use auth::{auth_middleware, AuthUser};
