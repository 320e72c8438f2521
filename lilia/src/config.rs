use std::collections::HashSet;

use thiserror::Error;

const DEFAULT_PREFIX: &str = "!";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Process configuration, read once from the environment at start up.
#[derive(Clone, Debug)]
pub(crate) struct Config {
    pub(crate) database_url: String,
    pub(crate) discord_token: String,
    pub(crate) prefix: String,
    pub(crate) max_connections: u32,
    pub(crate) blacklisted_users: HashSet<u64>,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let database_url = required("DATABASE_URL")?;
        let discord_token = required("DISCORD_TOKEN")?;
        let prefix = lookup("LILIA_PREFIX")
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid {
                    key: "DATABASE_MAX_CONNECTIONS",
                    value,
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let blacklisted_users = match lookup("LILIA_BLACKLISTED_USERS") {
            Some(value) => parse_id_list("LILIA_BLACKLISTED_USERS", &value)?,
            None => HashSet::new(),
        };
        Ok(Self {
            database_url,
            discord_token,
            prefix,
            max_connections,
            blacklisted_users,
        })
    }
}

/// Comma separated snowflakes, blank entries ignored.
fn parse_id_list(key: &'static str, value: &str) -> Result<HashSet<u64>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse().map_err(|_| ConfigError::Invalid {
                key,
                value: id.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_values_are_absent() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/lilia"),
            ("DISCORD_TOKEN", "token"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "postgres://localhost/lilia");
        assert_eq!(config.prefix, "!");
        assert_eq!(config.max_connections, 10);
        assert!(config.blacklisted_users.is_empty());
    }

    #[test]
    fn missing_database_url_is_reported() {
        let err = Config::from_lookup(lookup(&[("DISCORD_TOKEN", "token")])).unwrap_err();

        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/lilia"),
            ("DISCORD_TOKEN", "  "),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::Missing("DISCORD_TOKEN")));
    }

    #[test]
    fn blacklist_tolerates_spaces_and_empty_entries() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/lilia"),
            ("DISCORD_TOKEN", "token"),
            ("LILIA_BLACKLISTED_USERS", " 42, ,1075829327409971250,"),
        ]))
        .unwrap();

        assert_eq!(
            config.blacklisted_users,
            HashSet::from([42, 1_075_829_327_409_971_250])
        );
    }

    #[test]
    fn non_numeric_blacklist_entry_is_rejected() {
        let err = parse_id_list("LILIA_BLACKLISTED_USERS", "42,alice").unwrap_err();

        match err {
            ConfigError::Invalid { value, .. } => assert_eq!(value, "alice"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn zero_connections_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/lilia"),
            ("DISCORD_TOKEN", "token"),
            ("DATABASE_MAX_CONNECTIONS", "0"),
        ]))
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                ..
            }
        ));
    }
}
