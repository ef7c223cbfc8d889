//! Register Use Case
//!
//! Creates a student account and signs it in.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct RegisterInput {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub faculty: Option<String>,
    pub phone: Option<String>,
}

/// Token plus profile, returned by both register and login
pub struct SessionOutput {
    pub token: String,
    pub user: User,
}

pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    tokens: Arc<TokenService>,
}

impl<R> RegisterUseCase<R>
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

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<SessionOutput> {
        let (Some(email), Some(name), Some(password)) = (
            non_blank(input.email),
            non_blank(input.name),
            input.password.filter(|p| !p.trim().is_empty()),
        ) else {
            return Err(AuthError::MissingFields);
        };

        let email = Email::institutional(&email, &self.config.institutional_domain)?;

        let raw_password = RawPassword::new(password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = User::new(email, name, non_blank(input.faculty), non_blank(input.phone));

        // Uniqueness is enforced by the store; a collision surfaces as EmailTaken
        self.repo.create(&user, &password_hash).await?;

        let token = self.tokens.issue(&user)?;

        tracing::info!(
            user_id = %user.user_id,
            email = %user.email,
            "User registered"
        );

        Ok(SessionOutput { token, user })
    }
}

/// Trimmed value, or `None` when absent or blank
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
