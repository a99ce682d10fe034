//! Environment-driven configuration
//!
//! `.env` is loaded by `main` before [`Config::from_env`] runs, so values in
//! the real environment win over the file.

use std::env;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_LIST_LIMIT: u64 = 50;
pub const MAX_LIST_LIMIT: u64 = 100;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Page sizes for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLimits {
    pub default: u64,
    pub max: u64,
}

impl Default for ListLimits {
    fn default() -> Self {
        Self {
            default: DEFAULT_LIST_LIMIT,
            max: MAX_LIST_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub run_migrations: bool,
    pub list_limits: ListLimits,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr = parse_or("BIND_ADDR", lookup("BIND_ADDR"), || {
            DEFAULT_BIND_ADDR.parse().ok()
        })?;

        let run_migrations = match lookup("RUN_MIGRATIONS") {
            None => true,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "RUN_MIGRATIONS",
                        value: raw,
                    })
                }
            },
        };

        let default = parse_or("DEFAULT_LIST_LIMIT", lookup("DEFAULT_LIST_LIMIT"), || {
            Some(DEFAULT_LIST_LIMIT)
        })?;
        let max = parse_or("MAX_LIST_LIMIT", lookup("MAX_LIST_LIMIT"), || Some(MAX_LIST_LIMIT))?;

        if default == 0 || default > max {
            return Err(ConfigError::Invalid {
                name: "DEFAULT_LIST_LIMIT",
                value: default.to_string(),
            });
        }

        Ok(Self {
            database_url,
            bind_addr,
            run_migrations,
            list_limits: ListLimits { default, max },
        })
    }
}

fn parse_or<T, D>(name: &'static str, raw: Option<String>, default: D) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    D: FnOnce() -> Option<T>,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => default().ok_or(ConfigError::Invalid {
            name,
            value: String::new(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "sqlite::memory:")])).unwrap();

        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert!(config.run_migrations);
        assert_eq!(config.list_limits, ListLimits::default());
    }

    #[test]
    fn test_database_url_required() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn test_overrides_and_invalid_values() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/registry"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("RUN_MIGRATIONS", "false"),
            ("DEFAULT_LIST_LIMIT", "20"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert!(!config.run_migrations);
        assert_eq!(config.list_limits.default, 20);

        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/registry"),
            ("DEFAULT_LIST_LIMIT", "500"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "DEFAULT_LIST_LIMIT", .. }));

        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/registry"),
            ("BIND_ADDR", "nowhere"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "BIND_ADDR", .. }));
    }
}
