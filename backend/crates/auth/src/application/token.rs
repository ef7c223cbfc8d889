//! Session Token Service
//!
//! Issues and verifies the bearer tokens handed out at register/login.

use chrono::Utc;
use kernel::id::UserId;
use platform::token::{JwtCodec, TokenError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Claims carried by every session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub correo: String,
    pub rol: UserRole,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct TokenService {
    codec: JwtCodec,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            codec: JwtCodec::new(&config.jwt_secret),
            ttl_secs: i64::try_from(config.token_ttl.as_secs()).unwrap_or(i64::MAX),
        }
    }

    pub fn issue(&self, user: &User) -> AuthResult<String> {
        let iat = Utc::now().timestamp();
        let claims = SessionClaims {
            user_id: *user.user_id.as_uuid(),
            correo: user.email.as_str().to_string(),
            rol: user.role,
            iat,
            exp: iat.saturating_add(self.ttl_secs),
        };

        self.codec
            .issue(&claims)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> AuthResult<SessionClaims> {
        self.codec.verify(token).map_err(|e| {
            match &e {
                TokenError::Expired => tracing::debug!("Expired session token"),
                _ => tracing::debug!(error = %e, "Unverifiable session token"),
            }
            AuthError::InvalidToken
        })
    }
}

impl SessionClaims {
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::email::Email;
    use std::time::Duration;

    fn sample_user() -> User {
        User::new(
            Email::from_db("ana@correo.unicordoba.edu.co"),
            "Ana".to_string(),
            None,
            None,
        )
    }

    #[test]
    fn test_issue_and_verify() {
        let service = TokenService::new(&AuthConfig::development());
        let user = sample_user();

        let token = service.issue(&user).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.user_id(), user.user_id);
        assert_eq!(claims.correo, "ana@correo.unicordoba.edu.co");
        assert_eq!(claims.rol, UserRole::Student);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 3600);
    }

    #[test]
    fn test_claim_names_on_the_wire() {
        let service = TokenService::new(&AuthConfig::development());
        let token = service.issue(&sample_user()).unwrap();

        let claims = service.verify(&token).unwrap();
        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("userId").is_some());
        assert_eq!(json["rol"], "estudiante");
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = AuthConfig {
            token_ttl: Duration::from_secs(0),
            ..AuthConfig::development()
        };
        let service = TokenService::new(&config);
        let token = service.issue(&sample_user()).unwrap();

        // exp == iat and leeway is zero, so the token is already stale a second later
        std::thread::sleep(Duration::from_millis(1100));
        assert!(matches!(service.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let issuer = TokenService::new(&AuthConfig::development());
        let verifier = TokenService::new(&AuthConfig::development());
        let token = issuer.issue(&sample_user()).unwrap();
        assert!(matches!(verifier.verify(&token), Err(AuthError::InvalidToken)));
    }
}
