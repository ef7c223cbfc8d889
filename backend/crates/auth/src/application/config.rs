//! Application Configuration
//!
//! Configuration for the account application layer.

use std::time::Duration;

use crate::domain::value_object::email::DEFAULT_INSTITUTIONAL_DOMAIN;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for signing session tokens
    pub jwt_secret: Vec<u8>,
    /// Session token lifetime (7 days)
    pub token_ttl: Duration,
    /// Required email suffix, including the `@`
    pub institutional_domain: String,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: vec![0u8; 32],
            token_ttl: Duration::from_secs(7 * 24 * 3600),
            institutional_domain: DEFAULT_INSTITUTIONAL_DOMAIN.to_string(),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Config with a random signing secret; tokens do not survive a restart
    pub fn development() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            jwt_secret: secret,
            ..Default::default()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert_eq!(config.token_ttl, Duration::from_secs(604_800));
        assert_eq!(config.institutional_domain, "@correo.unicordoba.edu.co");
        assert!(config.pepper().is_none());
    }

    #[test]
    fn test_development_secret_is_random() {
        let a = AuthConfig::development();
        let b = AuthConfig::development();
        assert_eq!(a.jwt_secret.len(), 32);
        assert_ne!(a.jwt_secret, b.jwt_secret);
    }
}
