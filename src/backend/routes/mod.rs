//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, layers, fallback
//! └── api_routes.rs   - Public and authenticated API routes
//! ```
//!
//! # Route Organization
//!
//! 1. **Public Routes** - Health check, register, login
//! 2. **API Routes** - Everything else, behind the auth middleware
//! 3. **Fallback Handler** - `404 {"message": "Route not found"}`

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
