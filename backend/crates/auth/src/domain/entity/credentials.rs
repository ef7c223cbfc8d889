use crate::domain::entity::user::User;
use crate::domain::value_object::user_password::UserPassword;

/// A user row together with its stored password hash, loaded only for login
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: UserPassword,
}
