//! API DTOs (Data Transfer Objects)
//!
//! Field names follow the column names clients already use
//! (`correo_institucional`, `nombre`, ...).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::value_object::user_role::UserRole;

// ============================================================================
// Register
// ============================================================================

/// Register request; required fields are optional here so that a missing
/// field yields the domain's "Faltan campos obligatorios" rather than a parse error
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    pub correo_institucional: Option<String>,
    pub nombre: Option<String>,
    pub password: Option<String>,
    pub facultad: Option<String>,
    pub telefono: Option<String>,
}

// ============================================================================
// Login
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub correo_institucional: Option<String>,
    pub password: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// Public profile; never carries the password hash
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub correo_institucional: String,
    pub nombre: String,
    pub facultad: Option<String>,
    pub telefono: Option<String>,
    pub rol: UserRole,
    pub reputacion: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.user_id.into_uuid(),
            correo_institucional: user.email.into_inner(),
            nombre: user.name,
            facultad: user.faculty,
            telefono: user.phone,
            rol: user.role,
            reputacion: user.reputation,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserResponse,
}
