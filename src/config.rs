use std::net::{IpAddr, SocketAddr};

use crate::cors::OriginRule;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: IpAddr,
    pub server_port: u16,
    pub environment: Environment,
    pub log_level: String,
    pub cors_origins: Vec<OriginRule>,
    pub match_policy: MatchPolicy,
}

/// Deployment environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// How strictly match and game-status writes are guarded.
///
/// `Permissive` keeps the historical behaviour: a second `start` overwrites the
/// running game, and finished matches still accept score and end writes.
/// `Strict` rejects both with a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    #[default]
    Permissive,
    Strict,
}

impl MatchPolicy {
    /// Parse a policy name, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "permissive" => Some(Self::Permissive),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required: `DATABASE_URL`
    /// Optional with defaults: `SERVER_HOST`, `SERVER_PORT`, `ENVIRONMENT`, `LOG_LEVEL`,
    /// `CORS_ORIGINS`, `MATCH_POLICY`
    ///
    /// `PORT` overrides `SERVER_PORT` and the host defaults to `0.0.0.0` in production.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is not set, or if `SERVER_HOST` / `SERVER_PORT` /
    /// `MATCH_POLICY` contain invalid values.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let environment = match std::env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .as_str()
        {
            "production" => Environment::Production,
            "staging" => Environment::Staging,
            _ => Environment::Development,
        };

        // Hosting platforms provide PORT; fall back to SERVER_PORT, then 3000
        let server_port = std::env::var("PORT")
            .or_else(|_| std::env::var("SERVER_PORT"))
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("SERVER_PORT / PORT must be a valid u16"))?;

        let default_host = if environment == Environment::Production {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };

        let server_host = std::env::var("SERVER_HOST")
            .unwrap_or_else(|_| default_host.to_string())
            .parse::<IpAddr>()
            .map_err(|_| anyhow::anyhow!("SERVER_HOST must be a valid IP address"))?;

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let cors_origins = std::env::var("CORS_ORIGINS")
            .map_or_else(|_| crate::cors::default_origins(), |raw| crate::cors::parse_origins(&raw));

        let match_policy = match std::env::var("MATCH_POLICY") {
            Ok(raw) => MatchPolicy::parse(&raw).ok_or_else(|| {
                anyhow::anyhow!("MATCH_POLICY must be either \"strict\" or \"permissive\"")
            })?,
            Err(_) => MatchPolicy::default(),
        };

        Ok(Self {
            database_url,
            server_host,
            server_port,
            environment,
            log_level,
            cors_origins,
            match_policy,
        })
    }

    /// Build the socket address for the server to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = Config {
            database_url: String::new(),
            server_host: IpAddr::from([127, 0, 0, 1]),
            server_port: 3000,
            environment: Environment::Development,
            log_level: "info".to_string(),
            cors_origins: crate::cors::default_origins(),
            match_policy: MatchPolicy::Permissive,
        };
        let addr = config.socket_addr();
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_match_policy_parse() {
        assert_eq!(MatchPolicy::parse("strict"), Some(MatchPolicy::Strict));
        assert_eq!(MatchPolicy::parse(" STRICT "), Some(MatchPolicy::Strict));
        assert_eq!(MatchPolicy::parse("permissive"), Some(MatchPolicy::Permissive));
        assert_eq!(MatchPolicy::parse("lenient"), None);
    }

    #[test]
    fn test_match_policy_default_is_permissive() {
        assert_eq!(MatchPolicy::default(), MatchPolicy::Permissive);
        assert!(!MatchPolicy::default().is_strict());
    }
}
