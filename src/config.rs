//! Client configuration read from the host page.
//!
//! The server-rendered page can tune the client through `data-*` attributes
//! on `<body>`. Every key has a default, so a bare page works unchanged.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_LOGOUT_PATH: &str = "/logout";
pub const DEFAULT_USERNAME_KEY: &str = "username";

pub const API_BASE_ATTR: &str = "data-api-base";
pub const POLL_INTERVAL_ATTR: &str = "data-poll-interval-ms";
pub const LOGIN_PATH_ATTR: &str = "data-login-path";
pub const LOGOUT_PATH_ATTR: &str = "data-logout-path";
pub const USERNAME_KEY_ATTR: &str = "data-username-key";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key} '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for backend URLs; empty means same origin.
    pub api_base: String,
    pub poll_interval: Duration,
    pub login_path: String,
    pub logout_path: String,
    /// Session-storage key holding the cached username.
    pub username_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            logout_path: DEFAULT_LOGOUT_PATH.to_owned(),
            username_key: DEFAULT_USERNAME_KEY.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Build config from attribute lookups. Missing or blank values fall back
    /// to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the poll interval is not a
    /// positive integer or a path does not start with `/`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        let api_base = value(API_BASE_ATTR)
            .map(|v| v.trim_end_matches('/').to_owned())
            .unwrap_or_default();
        let poll_interval = match value(POLL_INTERVAL_ATTR) {
            Some(raw) => Duration::from_millis(parse_interval(&raw)?),
            None => Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        };
        let login_path = parse_path(LOGIN_PATH_ATTR, value(LOGIN_PATH_ATTR), DEFAULT_LOGIN_PATH)?;
        let logout_path = parse_path(
            LOGOUT_PATH_ATTR,
            value(LOGOUT_PATH_ATTR),
            DEFAULT_LOGOUT_PATH,
        )?;
        let username_key = value(USERNAME_KEY_ATTR)
            .unwrap_or_else(|| DEFAULT_USERNAME_KEY.to_owned());

        Ok(Self {
            api_base,
            poll_interval,
            login_path,
            logout_path,
            username_key,
        })
    }

    /// Read config from `<body>` attributes, falling back to defaults on error.
    pub fn from_document() -> Self {
        #[cfg(feature = "csr")]
        {
            let Some(body) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.body())
            else {
                return Self::default();
            };
            match Self::from_lookup(|key| body.get_attribute(key)) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("{e}; using default client config");
                    Self::default()
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            Self::default()
        }
    }
}

fn parse_interval(raw: &str) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            key: POLL_INTERVAL_ATTR,
            value: raw.to_owned(),
            reason: "must be greater than zero",
        }),
        Ok(ms) => Ok(ms),
        Err(_) => Err(ConfigError::Invalid {
            key: POLL_INTERVAL_ATTR,
            value: raw.to_owned(),
            reason: "expected milliseconds as an integer",
        }),
    }
}

fn parse_path(
    key: &'static str,
    raw: Option<String>,
    default: &str,
) -> Result<String, ConfigError> {
    match raw {
        Some(path) if path.starts_with('/') => Ok(path),
        Some(path) => Err(ConfigError::Invalid {
            key,
            value: path,
            reason: "must start with '/'",
        }),
        None => Ok(default.to_owned()),
    }
}
