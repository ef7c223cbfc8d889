//! User Password Value Object
//!
//! Delegates hashing to `platform::password`; a blank password is reported
//! as a missing registration field.

use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Password as typed by the user, zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Accept a password chosen at registration
    pub fn new(raw: String) -> AuthResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::EmptyOrWhitespace => AuthError::MissingFields,
        })?;

        Ok(Self(clear_text))
    }

    /// Wrap a login attempt; no policy is applied
    pub fn candidate(raw: String) -> Self {
        Self(ClearTextPassword::candidate(raw))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Argon2id PHC string stored in `usuarios.password_hash`
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        raw.0.hash(pepper).map(Self).map_err(|e| match e {
            PasswordHashError::HashingFailed(msg) => {
                AuthError::Internal(format!("Password hashing failed: {msg}"))
            }
            PasswordHashError::InvalidHashFormat => {
                AuthError::Internal("Unexpected error during password hashing".to_string())
            }
        })
    }

    pub fn from_phc_string(phc_string: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(|_| AuthError::Internal("Invalid password hash in database".to_string()))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_non_blank_password_is_accepted() {
        for pw in ["abc123", "12345678", "password"] {
            assert!(RawPassword::new(pw.to_string()).is_ok());
        }
    }

    #[test]
    fn test_blank_password_counts_as_missing() {
        assert!(matches!(
            RawPassword::new("   ".to_string()),
            Err(AuthError::MissingFields)
        ));
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("Libros&Apuntes2025".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();

        assert!(hashed.verify(&RawPassword::candidate("Libros&Apuntes2025".into()), None));
        assert!(!hashed.verify(&RawPassword::candidate("libros&apuntes2025".into()), None));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let raw = RawPassword::new("Libros&Apuntes2025".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, Some(b"pepper")).unwrap();

        let restored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&raw, Some(b"pepper")));
        assert!(UserPassword::from_phc_string("plaintext").is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::candidate("MiClaveSecreta".to_string());
        assert!(!format!("{raw:?}").contains("MiClave"));

        let hashed = UserPassword::from_raw(&RawPassword::new("MiClaveSecreta9".into()).unwrap(), None)
            .unwrap();
        assert!(format!("{hashed:?}").contains("[HASH]"));
    }
}
