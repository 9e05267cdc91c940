use std::sync::Arc;

use crate::auth::{PasswordHasher, TokenIssuer};
use crate::db::{StoreError, UserRepository};
use crate::error::AppError;
use crate::models::user::{LoginRequest, NewUser, RegisterRequest, User};
use crate::utils::validation;

/// A user together with a freshly issued session token.
#[derive(Debug)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Registration, login and token verification.
pub struct CredentialService {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
    tokens: TokenIssuer,
}

impl CredentialService {
    pub fn new(users: Arc<dyn UserRepository>, hasher: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<Session, AppError> {
        // 1. Normalize and validate input
        let username = request.username.trim().to_string();
        let email = validation::normalize_email(&request.email);

        validation::validate_username(&username).map_err(AppError::Validation)?;
        validation::validate_email(&email).map_err(AppError::Validation)?;
        validation::validate_password(&request.password).map_err(AppError::Validation)?;

        // 2. Check if the email is already registered
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(email_taken());
        }

        // 3. Hash password
        let password_hash = self.hasher.hash(&request.password)?;

        // 4. Create user. A concurrent registration can still win the race; the unique index decides.
        let user = self
            .users
            .create(NewUser {
                username,
                email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::Conflict => email_taken(),
                other => AppError::Storage(other),
            })?;

        tracing::info!(user_id = user.id, "registered new user");

        // 5. Issue the session token
        let token = self.tokens.issue(user.id)?;
        Ok(Session { user, token })
    }

    /// Unknown email and wrong password both end in `InvalidCredentials`.
    pub async fn login(&self, request: LoginRequest) -> Result<Session, AppError> {
        // 1. Reject empty fields before touching the store
        let email = validation::normalize_email(&request.email);
        if email.is_empty() || request.password.is_empty() {
            return Err(AppError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        // 2. Find user. Unknown emails still pay for one hash verification.
        let Some(user) = self.users.find_by_email(&email).await? else {
            self.hasher.verify_decoy(&request.password);
            return Err(AppError::InvalidCredentials);
        };

        // 3. Verify password
        if !self.hasher.verify(&request.password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        // 4. Issue the session token
        let token = self.tokens.issue(user.id)?;
        Ok(Session { user, token })
    }

    /// Resolve the session cookie to a user id.
    pub fn verify_token(&self, token: Option<&str>) -> Result<i64, AppError> {
        let token = token.ok_or(AppError::Unauthorized)?;
        self.tokens.verify(token)
    }

    pub async fn current_user(&self, user_id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}

fn email_taken() -> AppError {
    AppError::Conflict("User with this email already exists".to_string())
}
