use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::pricing::PricingRates;

const DEV_JWT_SECRET: &str = "dev-only-secret-change-me";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Administrator account created at startup when all three variables are set.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub actor_buffer: usize,
    pub distance_api_url: Option<String>,
    pub distance_api_key: Option<String>,
    pub distance_timeout: Duration,
    pub rates: PricingRates,
    pub admin: Option<AdminSeed>,
    pub health_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let source = Source { lookup: &lookup };

        let dev = source.get("APP_ENV").is_some_and(|v| v.eq_ignore_ascii_case("dev"));
        let jwt_secret = match source.get("JWT_SECRET") {
            Some(secret) => secret,
            None if dev => {
                warn!("JWT_SECRET not set, using the development secret");
                DEV_JWT_SECRET.to_string()
            }
            None => return Err(ConfigError::Missing("JWT_SECRET")),
        };

        let rates = PricingRates {
            base_fare: source.rate("PRICE_BASE_FARE", "50.00")?,
            per_km: source.rate("PRICE_PER_KM", "2.50")?,
            per_ton: source.rate("PRICE_PER_TON", "0.50")?,
        };

        let admin = match (
            source.get("ADMIN_EMAIL"),
            source.get("ADMIN_PASSWORD"),
            source.get("ADMIN_NAME"),
        ) {
            (Some(email), Some(password), name) => Some(AdminSeed {
                email,
                password,
                name: name.unwrap_or_else(|| "Administrator".to_string()),
            }),
            (None, None, _) => None,
            _ => {
                warn!("ADMIN_EMAIL and ADMIN_PASSWORD must be set together; skipping admin seed");
                None
            }
        };

        Ok(Self {
            port: source.try_load("PORT", "8080")?,
            jwt_secret,
            token_ttl: Duration::from_secs(source.try_load::<u64>("TOKEN_TTL_MINUTES", "1440")? * 60),
            actor_buffer: source.positive("ACTOR_BUFFER", "32")?,
            distance_api_url: source.get("DISTANCE_API_URL"),
            distance_api_key: source.get("DISTANCE_API_KEY"),
            distance_timeout: Duration::from_millis(source.positive("DISTANCE_TIMEOUT_MS", "3000")? as u64),
            rates,
            admin,
            health_timeout: Duration::from_millis(source.positive("HEALTH_TIMEOUT_MS", "500")? as u64),
        })
    }
}

struct Source<'a> {
    lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl Source<'_> {
    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
    }

    fn try_load<T: FromStr>(&self, key: &'static str, default: &str) -> Result<T, ConfigError>
    where
        T::Err: Display,
    {
        let value = self.get(key).unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        });
        value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        })
    }

    fn positive(&self, key: &'static str, default: &str) -> Result<usize, ConfigError> {
        match self.try_load::<usize>(key, default)? {
            0 => Err(ConfigError::Invalid {
                key,
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            }),
            n => Ok(n),
        }
    }

    fn rate(&self, key: &'static str, default: &str) -> Result<f64, ConfigError> {
        let rate = self.try_load::<f64>(key, default)?;
        if rate.is_finite() && rate >= 0.0 {
            Ok(rate)
        } else {
            Err(ConfigError::Invalid {
                key,
                value: rate.to_string(),
                reason: "must be a non-negative number".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_in_dev() {
        let config = load(&[("APP_ENV", "dev")]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.jwt_secret, DEV_JWT_SECRET);
        assert_eq!(config.token_ttl, Duration::from_secs(1440 * 60));
        assert_eq!(config.actor_buffer, 32);
        assert_eq!(config.distance_timeout, Duration::from_millis(3000));
        assert_eq!(config.rates, PricingRates::default());
        assert_eq!(config.admin, None);
        assert_eq!(config.distance_api_url, None);
    }

    #[test]
    fn secret_is_required_outside_dev() {
        assert_eq!(load(&[]).unwrap_err(), ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn malformed_values_are_errors() {
        let err = load(&[("JWT_SECRET", "s"), ("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));

        let err = load(&[("JWT_SECRET", "s"), ("PRICE_PER_KM", "-1")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PRICE_PER_KM", .. }));

        let err = load(&[("JWT_SECRET", "s"), ("ACTOR_BUFFER", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "ACTOR_BUFFER", .. }));
    }

    #[test]
    fn admin_seed_needs_email_and_password() {
        let config = load(&[
            ("JWT_SECRET", "s"),
            ("ADMIN_EMAIL", "root@fleet.test"),
            ("ADMIN_PASSWORD", "hunter22"),
        ])
        .unwrap();
        let admin = config.admin.unwrap();
        assert_eq!(admin.email, "root@fleet.test");
        assert_eq!(admin.name, "Administrator");

        let config = load(&[("JWT_SECRET", "s"), ("ADMIN_EMAIL", "root@fleet.test")]).unwrap();
        assert_eq!(config.admin, None);
    }
}
