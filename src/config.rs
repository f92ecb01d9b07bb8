use std::env;
use std::fmt::Display;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Longest token lifetime accepted from the environment.
const TOKEN_TTL_DAYS: RangeInclusive<i64> = 1..=3650;
/// bcrypt's own limits.
const BCRYPT_COST: RangeInclusive<u32> = 4..=31;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),
    #[error("environment variable {key} is not a valid number or out of range: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Runtime configuration, read once at startup and handed to the
/// services that need it.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl_days: i64,
    pub bcrypt_cost: u32,
    /// Empty means any origin is accepted.
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        Ok(AppConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: Self::parse_or("PORT", 4000)?,
            database_url: Self::required("DATABASE_URL")?,
            jwt_secret: Self::required("JWT_SECRET")?,
            token_ttl_days: in_range("TOKEN_TTL_DAYS", Self::parse_or("TOKEN_TTL_DAYS", 7)?, TOKEN_TTL_DAYS)?,
            bcrypt_cost: in_range("BCRYPT_COST", Self::parse_or("BCRYPT_COST", 10)?, BCRYPT_COST)?,
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_default(),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn required(key: &'static str) -> Result<String, ConfigError> {
        match env::var(key) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(ConfigError::Missing(key)),
        }
    }

    fn parse_or<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
        match env::var(key) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { key, value }),
            Err(_) => Ok(default),
        }
    }
}

fn in_range<T: PartialOrd + Display>(
    key: &'static str,
    value: T,
    range: RangeInclusive<T>,
) -> Result<T, ConfigError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        let origins = parse_origins(" http://localhost:3000, ,http://127.0.0.1:4000 ");
        assert_eq!(origins, vec!["http://localhost:3000", "http://127.0.0.1:4000"]);
    }

    #[test]
    fn token_ttl_outside_bounds_is_rejected() {
        assert_eq!(in_range("TOKEN_TTL_DAYS", 7, TOKEN_TTL_DAYS).unwrap(), 7);
        assert_eq!(in_range("TOKEN_TTL_DAYS", 3650, TOKEN_TTL_DAYS).unwrap(), 3650);

        for bad in [0, -1, 3651, 100_000_000] {
            let err = in_range("TOKEN_TTL_DAYS", bad, TOKEN_TTL_DAYS).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { key: "TOKEN_TTL_DAYS", .. }));
        }
    }

    #[test]
    fn bcrypt_cost_outside_bounds_is_rejected() {
        assert_eq!(in_range("BCRYPT_COST", 4, BCRYPT_COST).unwrap(), 4);
        assert_eq!(in_range("BCRYPT_COST", 31, BCRYPT_COST).unwrap(), 31);
        assert!(in_range("BCRYPT_COST", 3, BCRYPT_COST).is_err());
        assert!(in_range("BCRYPT_COST", 32, BCRYPT_COST).is_err());
    }

    #[test]
    fn empty_origin_list_means_permissive() {
        assert!(parse_origins("").is_empty());
    }
}
