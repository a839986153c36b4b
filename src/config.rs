use std::env;

use anyhow::Result;

use crate::matching::ranking::DomainMatchMode;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    pub db_path: String,
    /// How the ranking pass decides a recommendation matches a preferred
    /// domain (PEERLINK_DOMAIN_MATCH: "substring" or "structured")
    pub domain_match: DomainMatchMode,
    /// Shared password accepted by POST /api/login (PEERLINK_WEB_PASSWORD)
    #[cfg(feature = "web")]
    pub web_password: String,
    /// Secret for HMAC session token signing (PEERLINK_SESSION_SECRET)
    #[cfg(feature = "web")]
    pub session_secret: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Only the database path has a default. The session secret is required
    /// for `serve` and `token`, see `require_web`.
    pub fn load() -> Result<Self> {
        let domain_match = match env::var("PEERLINK_DOMAIN_MATCH").as_deref() {
            Ok("structured") => DomainMatchMode::MatchedDomains,
            Ok("substring") | Err(_) => DomainMatchMode::ReasonSubstring,
            Ok(other) => anyhow::bail!(
                "PEERLINK_DOMAIN_MATCH must be \"substring\" or \"structured\", got {other:?}"
            ),
        };

        Ok(Self {
            db_path: env::var("PEERLINK_DB_PATH").unwrap_or_else(|_| "./peerlink.db".to_string()),
            domain_match,
            #[cfg(feature = "web")]
            web_password: env::var("PEERLINK_WEB_PASSWORD").unwrap_or_default(),
            #[cfg(feature = "web")]
            session_secret: env::var("PEERLINK_SESSION_SECRET").unwrap_or_default(),
        })
    }

    /// Check that session signing is configured.
    /// Call this before serving HTTP or minting tokens.
    #[cfg(feature = "web")]
    pub fn require_web(&self) -> Result<()> {
        if self.session_secret.is_empty() {
            anyhow::bail!(
                "PEERLINK_SESSION_SECRET not set. Add it to your .env file.\n\
                 Tokens cannot be signed or verified without it."
            );
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "web"))]
mod tests {
    use super::*;

    fn config(secret: &str) -> Config {
        Config {
            db_path: ":memory:".to_string(),
            domain_match: DomainMatchMode::default(),
            web_password: String::new(),
            session_secret: secret.to_string(),
        }
    }

    #[test]
    fn test_require_web_needs_secret() {
        assert!(config("").require_web().is_err());
        assert!(config("s3cret").require_web().is_ok());
    }
}
