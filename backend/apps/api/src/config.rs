//! Server Configuration
//!
//! Everything the binary reads from the environment, parsed once at startup.

use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use market::MarketConfig;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub port: u16,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    pub market: MarketConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;

        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("Invalid DATABASE_MAX_CONNECTIONS: {v}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let port = match get("PORT") {
            Some(v) => v.parse().with_context(|| format!("Invalid PORT: {v}"))?,
            None => DEFAULT_PORT,
        };

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        let mut auth = match get("JWT_SECRET") {
            Some(secret) => AuthConfig {
                jwt_secret: secret.into_bytes(),
                ..AuthConfig::default()
            },
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using a random development secret");
                AuthConfig::development()
            }
            None => bail!("JWT_SECRET must be set in production"),
        };

        if let Some(days) = get("JWT_TTL_DAYS") {
            let days: u64 = days
                .parse()
                .with_context(|| format!("Invalid JWT_TTL_DAYS: {days}"))?;
            let secs = days
                .checked_mul(24 * 3600)
                .with_context(|| format!("JWT_TTL_DAYS is too large: {days}"))?;
            auth.token_ttl = Duration::from_secs(secs);
        }
        if let Some(domain) = get("INSTITUTIONAL_DOMAIN") {
            auth.institutional_domain = if domain.starts_with('@') {
                domain.to_lowercase()
            } else {
                format!("@{}", domain.to_lowercase())
            };
        }
        auth.password_pepper = get("PASSWORD_PEPPER").map(String::into_bytes);

        Ok(Self {
            database_url,
            max_connections,
            port,
            frontend_origins,
            auth,
            market: MarketConfig::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[
            ("DATABASE_URL", "postgres://localhost/unicormarket"),
            ("JWT_SECRET", "s3cret"),
        ])
        .unwrap();

        assert_eq!(cfg.port, 4000);
        assert_eq!(cfg.max_connections, 5);
        assert_eq!(cfg.auth.jwt_secret, b"s3cret");
        assert_eq!(cfg.auth.token_ttl, Duration::from_secs(7 * 24 * 3600));
        assert_eq!(cfg.auth.institutional_domain, "@correo.unicordoba.edu.co");
        assert!(cfg.auth.password_pepper.is_none());
        assert_eq!(cfg.frontend_origins.len(), 2);
        assert_eq!(cfg.market.search_limit, 100);
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("DATABASE_URL", "postgres://db/market"),
            ("JWT_SECRET", "s3cret"),
            ("PORT", "8080"),
            ("DATABASE_MAX_CONNECTIONS", "20"),
            ("JWT_TTL_DAYS", "1"),
            ("INSTITUTIONAL_DOMAIN", "Unicordoba.edu.co"),
            ("PASSWORD_PEPPER", "pimienta"),
            ("FRONTEND_ORIGINS", "https://market.example, ,https://admin.example"),
        ])
        .unwrap();

        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.max_connections, 20);
        assert_eq!(cfg.auth.token_ttl, Duration::from_secs(86_400));
        assert_eq!(cfg.auth.institutional_domain, "@unicordoba.edu.co");
        assert_eq!(cfg.auth.pepper(), Some(&b"pimienta"[..]));
        assert_eq!(
            cfg.frontend_origins,
            vec!["https://market.example", "https://admin.example"]
        );
    }

    #[test]
    fn test_invalid_values() {
        assert!(config(&[("JWT_SECRET", "s3cret")]).is_err());
        assert!(config(&[
            ("DATABASE_URL", "postgres://db/market"),
            ("JWT_SECRET", "s3cret"),
            ("PORT", "http"),
        ])
        .is_err());
    }

    #[test]
    fn test_ttl_overflow_is_an_error() {
        let result = config(&[
            ("DATABASE_URL", "postgres://db/market"),
            ("JWT_SECRET", "s3cret"),
            ("JWT_TTL_DAYS", "18446744073709551615"),
        ]);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("JWT_TTL_DAYS"));

        let cfg = config(&[
            ("DATABASE_URL", "postgres://db/market"),
            ("JWT_SECRET", "s3cret"),
            ("JWT_TTL_DAYS", "213503982334601"),
        ])
        .unwrap();
        assert_eq!(cfg.auth.token_ttl.as_secs(), 213_503_982_334_601 * 86_400);
    }
}
