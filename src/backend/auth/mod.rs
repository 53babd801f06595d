//! Authentication Module
//!
//! Accounts, password credentials and bearer tokens.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - `users` table queries
//! ├── sessions.rs     - JWT issuing and verification
//! ├── credentials.rs  - Register / login / verify
//! └── handlers/       - HTTP handlers
//!     ├── register.rs
//!     ├── login.rs
//!     └── me.rs
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: username, email, password → account created → token returned
//! 2. **Login**: email, password → bcrypt check → token returned
//! 3. **Me**: token → identity from the verified claims
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt on the blocking thread pool
//! - Tokens are HS256 JWTs that expire after 24 hours by default
//! - Unknown email and wrong password produce identical 401 responses

/// User database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// Registration, login and token verification
pub mod credentials;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use credentials::{AuthError, CredentialStore};
pub use handlers::{get_me, login, register};
pub use sessions::{Claims, TokenError, TokenIssuer};
