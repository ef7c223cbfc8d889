//! Institutional Email Value Object
//!
//! Accounts are restricted to one institutional domain. The address is
//! trimmed and lowercased before any check, so `" Ana@Correo.Unicordoba.edu.co "`
//! and `"ana@correo.unicordoba.edu.co"` are the same account.

use serde::Serialize;

use crate::error::{AuthError, AuthResult};

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Default institutional suffix, including the `@`
pub const DEFAULT_INSTITUTIONAL_DOMAIN: &str = "@correo.unicordoba.edu.co";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parse an address and require it to end with `domain` (e.g. `@correo.unicordoba.edu.co`)
    pub fn institutional(raw: &str, domain: &str) -> AuthResult<Self> {
        let email = Self::parse(raw)?;
        if !email.0.ends_with(&domain.to_lowercase()) {
            return Err(AuthError::NonInstitutionalEmail(domain.to_string()));
        }
        Ok(email)
    }

    /// Normalize and check the general shape only
    pub fn parse(raw: &str) -> AuthResult<Self> {
        let email = raw.trim().to_lowercase();

        if email.is_empty() || email.len() > EMAIL_MAX_LENGTH || !Self::is_valid_format(&email) {
            return Err(AuthError::InvalidEmail);
        }

        Ok(Self(email))
    }

    fn is_valid_format(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        if local.is_empty() || local.len() > 64 || domain.contains('@') {
            return false;
        }

        if domain.is_empty() || !domain.contains('.') {
            return false;
        }

        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }

        !(domain.starts_with('.')
            || domain.ends_with('.')
            || domain.starts_with('-')
            || domain.ends_with('-'))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN: &str = DEFAULT_INSTITUTIONAL_DOMAIN;

    #[test]
    fn test_institutional_accepts_and_normalizes() {
        let email = Email::institutional("  Ana.Perez@Correo.Unicordoba.EDU.co ", DOMAIN).unwrap();
        assert_eq!(email.as_str(), "ana.perez@correo.unicordoba.edu.co");
    }

    #[test]
    fn test_institutional_rejects_other_domains() {
        for raw in [
            "ana@gmail.com",
            "ana@unicordoba.edu.co",
            "ana@correo.unicordoba.edu.co.evil.com",
        ] {
            assert!(
                matches!(
                    Email::institutional(raw, DOMAIN),
                    Err(AuthError::NonInstitutionalEmail(_))
                ),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(Email::parse(""), Err(AuthError::InvalidEmail)));
        assert!(matches!(Email::parse("sin-arroba"), Err(AuthError::InvalidEmail)));
        assert!(matches!(
            Email::parse("@correo.unicordoba.edu.co"),
            Err(AuthError::InvalidEmail)
        ));
        assert!(matches!(Email::parse("a@@b.co"), Err(AuthError::InvalidEmail)));
        assert!(matches!(Email::parse("a@localhost"), Err(AuthError::InvalidEmail)));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let email = Email::from_db("ana@correo.unicordoba.edu.co");
        assert_eq!(
            serde_json::to_string(&email).unwrap(),
            "\"ana@correo.unicordoba.edu.co\""
        );
    }
}
