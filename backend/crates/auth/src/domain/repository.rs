//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::{credentials::UserCredentials, user::User};
use crate::domain::value_object::{email::Email, user_password::UserPassword};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new account
    ///
    /// Must return [`AuthError::EmailTaken`](crate::error::AuthError::EmailTaken)
    /// when the email collides with an existing row; callers do not pre-check.
    async fn create(&self, user: &User, password: &UserPassword) -> AuthResult<()>;

    /// Find user and password hash by email, for login
    async fn find_credentials_by_email(&self, email: &Email)
    -> AuthResult<Option<UserCredentials>>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;
}
