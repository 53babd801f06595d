/**
 * Credential Store
 *
 * Registration, login and token verification. Passwords are hashed with
 * bcrypt on the blocking pool; only the salted hash is stored.
 *
 * # Failure Modes
 *
 * - `DuplicateUser` - username or email already registered
 * - `WeakPassword` - password shorter than six characters
 * - `InvalidCredentials` - unknown email or wrong password (one message for both)
 */

use sqlx::SqlitePool;
use thiserror::Error;

use crate::backend::auth::sessions::{TokenError, TokenIssuer};
use crate::backend::auth::users::{create_user, get_user_by_email, user_exists};
use crate::backend::error::BackendError;
use crate::shared::validation::PASSWORD_MIN_CHARS;
use crate::shared::writing::{Identity, User};
use crate::shared::SharedError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Invalid(#[from] SharedError),

    #[error("Password must be at least {} characters long", PASSWORD_MIN_CHARS)]
    WeakPassword,

    #[error("User with this email or username already exists")]
    DuplicateUser,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Password hashing task failed: {0}")]
    Blocking(#[from] tokio::task::JoinError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl From<AuthError> for BackendError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Invalid(shared) => shared.into(),
            AuthError::WeakPassword => BackendError::validation("password", err.to_string()),
            AuthError::DuplicateUser => BackendError::conflict(err.to_string()),
            AuthError::InvalidCredentials => BackendError::authentication(err.to_string()),
            AuthError::Database(e) => BackendError::Database(e),
            AuthError::Hash(e) => BackendError::Hash(e),
            AuthError::Blocking(e) => BackendError::internal(e.to_string()),
            AuthError::Token(e) => BackendError::Token(e),
        }
    }
}

/// A freshly created account and its first token
#[derive(Debug)]
pub struct Registration {
    pub user: User,
    pub token: String,
}

/// A successful login
#[derive(Debug)]
pub struct Session {
    pub user: User,
    pub token: String,
}

#[derive(Clone, Debug)]
pub struct CredentialStore {
    pool: SqlitePool,
    tokens: TokenIssuer,
    bcrypt_cost: u32,
}

impl CredentialStore {
    pub fn new(pool: SqlitePool, tokens: TokenIssuer, bcrypt_cost: u32) -> Self {
        Self {
            pool,
            tokens,
            bcrypt_cost,
        }
    }

    /// Create an account and sign a token for it
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Registration, AuthError> {
        let username = username.trim();
        let email = email.trim();

        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(SharedError::validation(
                "body",
                "Username, email, and password are required",
            )
            .into());
        }
        if !email.contains('@') {
            return Err(SharedError::validation("email", "Invalid email format").into());
        }
        if password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(AuthError::WeakPassword);
        }

        if user_exists(&self.pool, username, email).await? {
            tracing::warn!("Registration rejected, user already exists: {} / {}", username, email);
            return Err(AuthError::DuplicateUser);
        }

        let password = password.to_owned();
        let cost = self.bcrypt_cost;
        let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;

        // The existence check above can race another registration; the unique
        // indexes are the final word.
        let user = create_user(&self.pool, username, email, &password_hash)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => AuthError::DuplicateUser,
                other => AuthError::Database(other),
            })?;

        let token = self.tokens.issue(&user)?;
        tracing::info!("User registered: {} ({})", user.username, user.id);

        Ok(Registration { user, token })
    }

    /// Check an email/password pair and sign a token
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(SharedError::validation("body", "Email and password are required").into());
        }

        let user = match get_user_by_email(&self.pool, email).await? {
            Some(user) => user,
            None => {
                tracing::warn!("Login failed: unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let password = password.to_owned();
        let hash = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
        if !valid {
            tracing::warn!("Login failed: wrong password for user {}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user)?;
        tracing::info!("User logged in: {} ({})", user.username, user.id);

        Ok(Session { user, token })
    }

    /// Verify a bearer token
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        self.tokens.verify(token)
    }
}
