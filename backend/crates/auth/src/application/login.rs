//! Login Use Case
//!
//! Unknown email, malformed email and wrong password all fail with the same
//! [`AuthError::InvalidCredentials`].

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::register::SessionOutput;
use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    tokens: Arc<TokenService>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>, tokens: Arc<TokenService>) -> Self {
        Self {
            repo,
            config,
            tokens,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<SessionOutput> {
        let (Some(email), Some(password)) = (
            input.email.filter(|e| !e.trim().is_empty()),
            input.password.filter(|p| !p.is_empty()),
        ) else {
            return Err(AuthError::MissingCredentials);
        };

        let email = Email::parse(&email).map_err(|_| AuthError::InvalidCredentials)?;

        let credentials = self
            .repo
            .find_credentials_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let candidate = RawPassword::candidate(password);
        if !credentials
            .password_hash
            .verify(&candidate, self.config.pepper())
        {
            return Err(AuthError::InvalidCredentials);
        }

        let user = credentials.user;
        let token = self.tokens.issue(&user)?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(SessionOutput { token, user })
    }
}
