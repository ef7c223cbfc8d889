//! User Entity
//!
//! Public account profile. The password hash lives in [`UserCredentials`]
//! and is never part of this type.
//!
//! [`UserCredentials`]: super::credentials::UserCredentials

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use rust_decimal::Decimal;

use crate::domain::value_object::{email::Email, user_role::UserRole};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Institutional email (unique, login identifier)
    pub email: Email,
    pub name: String,
    pub faculty: Option<String>,
    pub phone: Option<String>,
    pub role: UserRole,
    /// Average received rating, `0` until rated
    pub reputation: Decimal,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new student account
    pub fn new(email: Email, name: String, faculty: Option<String>, phone: Option<String>) -> Self {
        Self {
            user_id: UserId::new(),
            email,
            name,
            faculty,
            phone,
            role: UserRole::default(),
            reputation: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }
}
