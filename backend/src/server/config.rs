//! Runtime settings loaded via OrthoConfig.
//!
//! Values come from `--flags`, `TODO_*` environment variables or a config
//! file, in that order of precedence. Accessors apply defaults and validate.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use rand::RngCore;
use serde::Deserialize;
use todo_backend::domain::DEFAULT_CACHE_TTL;
use tracing::warn;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const EPHEMERAL_SECRET_BYTES: usize = 32;
const ALLOW_EPHEMERAL_SECRET_ENV: &str = "TODO_ALLOW_EPHEMERAL_SECRET";

/// Invalid or missing settings detected at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address `{value}`")]
    InvalidBindAddr {
        /// Rejected value.
        value: String,
    },
    /// `database_url` was not provided.
    #[error("database_url is required (set TODO_DATABASE_URL)")]
    MissingDatabaseUrl,
    /// `jwt_secret` was not provided and no fallback is allowed.
    #[error("jwt_secret is required (set TODO_JWT_SECRET)")]
    MissingJwtSecret,
}

/// Settings for the `todo-backend` binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TODO")]
pub struct AppSettings {
    /// Listener address, for example `127.0.0.1:4000`.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Redis URL; the in-process cache is used when absent.
    pub redis_url: Option<String>,
    /// HMAC key for bearer tokens.
    pub jwt_secret: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Lifetime of cached to-do reads, in seconds.
    pub cache_ttl_secs: Option<u64>,
}

impl AppSettings {
    /// Address to bind, defaulting to `0.0.0.0:4000`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim()
            .parse()
            .map_err(|_| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
            })
    }

    /// Database URL; there is no default.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        non_blank(self.database_url.as_deref()).ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Redis URL, if one is configured.
    pub fn redis_url(&self) -> Option<&str> {
        non_blank(self.redis_url.as_deref())
    }

    /// Pool size, defaulting to 10.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
            .max(1)
    }

    /// Cache TTL, defaulting to [`DEFAULT_CACHE_TTL`]. Zero is raised to one
    /// second.
    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl_secs
            .map_or(DEFAULT_CACHE_TTL, |secs| Duration::from_secs(secs.max(1)))
    }

    /// Token signing secret.
    ///
    /// When none is configured and `allow_ephemeral` is set, a random secret
    /// is generated; tokens then stop validating after a restart.
    pub fn resolve_jwt_secret(
        &self,
        allow_ephemeral: bool,
    ) -> Result<Zeroizing<String>, SettingsError> {
        match non_blank(self.jwt_secret.as_deref()) {
            Some(secret) => Ok(Zeroizing::new(secret.to_owned())),
            None if allow_ephemeral => {
                warn!("jwt_secret not set; using ephemeral signing secret (dev only)");
                Ok(ephemeral_secret())
            }
            None => Err(SettingsError::MissingJwtSecret),
        }
    }
}

/// Whether a missing signing secret may be replaced by a random one.
pub fn ephemeral_secret_allowed() -> bool {
    cfg!(debug_assertions)
        || env::var(ALLOW_EPHEMERAL_SECRET_ENV).ok().as_deref() == Some("1")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.trim().is_empty())
}

fn ephemeral_secret() -> Zeroizing<String> {
    let mut bytes = Zeroizing::new([0_u8; EPHEMERAL_SECRET_BYTES]);
    rand::thread_rng().fill_bytes(&mut *bytes);
    Zeroizing::new(hex::encode(&*bytes))
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and defaults.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const KEYS: [&str; 6] = [
        "TODO_BIND_ADDR",
        "TODO_DATABASE_URL",
        "TODO_REDIS_URL",
        "TODO_JWT_SECRET",
        "TODO_DB_MAX_CONNECTIONS",
        "TODO_CACHE_TTL_SECS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("todo-backend")])
            .expect("config should load")
    }

    fn cleared() -> Vec<(&'static str, Option<String>)> {
        KEYS.iter().map(|key| (*key, None)).collect()
    }

    fn with(overrides: &[(&'static str, &str)]) -> Vec<(&'static str, Option<String>)> {
        let mut vars = cleared();
        for (key, value) in overrides {
            if let Some(slot) = vars.iter_mut().find(|(name, _)| name == key) {
                slot.1 = Some((*value).to_owned());
            }
        }
        vars
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(cleared());

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default parses"),
            "0.0.0.0:4000".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.db_max_connections(), 10);
        assert_eq!(settings.cache_ttl(), DEFAULT_CACHE_TTL);
        assert!(settings.redis_url().is_none());
        assert_eq!(
            settings.database_url(),
            Err(SettingsError::MissingDatabaseUrl)
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(with(&[
            ("TODO_BIND_ADDR", "127.0.0.1:9000"),
            ("TODO_DATABASE_URL", "postgres://db/todo"),
            ("TODO_REDIS_URL", "redis://cache:6379"),
            ("TODO_DB_MAX_CONNECTIONS", "4"),
            ("TODO_CACHE_TTL_SECS", "30"),
        ]));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr().expect("parses").port(), 9000);
        assert_eq!(settings.database_url(), Ok("postgres://db/todo"));
        assert_eq!(settings.redis_url(), Some("redis://cache:6379"));
        assert_eq!(settings.db_max_connections(), 4);
        assert_eq!(settings.cache_ttl(), Duration::from_secs(30));
    }

    #[rstest]
    fn malformed_bind_addr_is_rejected() {
        let _guard = lock_env(with(&[("TODO_BIND_ADDR", "not-an-address")]));

        let error = load_from_empty_args().bind_addr().expect_err("invalid");
        assert_eq!(
            error,
            SettingsError::InvalidBindAddr {
                value: "not-an-address".to_owned()
            }
        );
    }

    #[rstest]
    fn blank_redis_url_selects_in_process_cache() {
        let _guard = lock_env(with(&[("TODO_REDIS_URL", "  ")]));
        assert!(load_from_empty_args().redis_url().is_none());
    }

    #[rstest]
    fn configured_secret_wins_over_fallback() {
        let _guard = lock_env(with(&[("TODO_JWT_SECRET", "s3cret")]));

        let secret = load_from_empty_args()
            .resolve_jwt_secret(true)
            .expect("configured");
        assert_eq!(secret.as_str(), "s3cret");
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn missing_secret_depends_on_fallback(#[case] allow_ephemeral: bool) {
        let _guard = lock_env(cleared());

        let resolved = load_from_empty_args().resolve_jwt_secret(allow_ephemeral);
        if allow_ephemeral {
            let secret = resolved.expect("ephemeral secret");
            assert_eq!(secret.len(), EPHEMERAL_SECRET_BYTES * 2);
            assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
        } else {
            assert_eq!(resolved.map(|_| ()), Err(SettingsError::MissingJwtSecret));
        }
    }

    #[rstest]
    fn opt_in_flag_allows_ephemeral_secret() {
        let _guard = lock_env([(ALLOW_EPHEMERAL_SECRET_ENV, Some("1".to_owned()))]);
        assert!(ephemeral_secret_allowed());
    }

    #[rstest]
    fn zero_cache_ttl_is_raised_to_one_second() {
        let _guard = lock_env(with(&[("TODO_CACHE_TTL_SECS", "0")]));
        assert_eq!(load_from_empty_args().cache_ttl(), Duration::from_secs(1));
    }
}
