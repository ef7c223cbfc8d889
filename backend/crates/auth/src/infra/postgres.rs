//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{credentials::UserCredentials, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User, password: &UserPassword) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO usuarios (
                id,
                correo_institucional,
                nombre,
                facultad,
                telefono,
                password_hash,
                rol,
                reputacion,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(&user.name)
        .bind(&user.faculty)
        .bind(&user.phone)
        .bind(password.as_phc_string())
        .bind(user.role.code())
        .bind(user.reputation)
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AuthError::EmailTaken)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_credentials_by_email(
        &self,
        email: &Email,
    ) -> AuthResult<Option<UserCredentials>> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            r#"
            SELECT
                id,
                correo_institucional,
                nombre,
                facultad,
                telefono,
                rol,
                reputacion,
                created_at,
                password_hash
            FROM usuarios
            WHERE correo_institucional = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_credentials()).transpose()
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                correo_institucional,
                nombre,
                facultad,
                telefono,
                rol,
                reputacion,
                created_at
            FROM usuarios
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    correo_institucional: String,
    nombre: String,
    facultad: Option<String>,
    telefono: Option<String>,
    rol: String,
    reputacion: Decimal,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role = self
            .rol
            .parse::<UserRole>()
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(User {
            user_id: UserId::from_uuid(self.id),
            email: Email::from_db(self.correo_institucional),
            name: self.nombre,
            faculty: self.facultad,
            phone: self.telefono,
            role,
            reputation: self.reputacion,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}

impl CredentialsRow {
    fn into_credentials(self) -> AuthResult<UserCredentials> {
        Ok(UserCredentials {
            password_hash: UserPassword::from_phc_string(self.password_hash)?,
            user: self.user.into_user()?,
        })
    }
}
