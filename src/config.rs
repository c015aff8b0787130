use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Reads the process configuration once at startup. The result is shared
    /// read-only through `AppState`.
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET is not set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "cuidador".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "cuidador-app".into()),
            ttl_seconds: parse_or("JWT_EXPIRATION", 86_400),
        };
        Ok(Self {
            database_url,
            max_connections: parse_or("DB_MAX_CONNECTIONS", 10),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parse_or("APP_PORT", 5000),
            jwt,
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_falls_back_on_garbage() {
        std::env::set_var("CUIDADOR_TEST_PORT", "not-a-number");
        assert_eq!(parse_or::<u16>("CUIDADOR_TEST_PORT", 5000), 5000);
        std::env::set_var("CUIDADOR_TEST_PORT", "8081");
        assert_eq!(parse_or::<u16>("CUIDADOR_TEST_PORT", 5000), 8081);
        std::env::remove_var("CUIDADOR_TEST_PORT");
    }

    #[test]
    fn parse_or_uses_default_when_unset() {
        assert_eq!(parse_or::<i64>("CUIDADOR_TEST_UNSET_TTL", 86_400), 86_400);
    }
}
