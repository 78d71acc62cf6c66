//! Client configuration resolved from build-time environment variables.
//!
//! The WASM bundle has no process environment at runtime, so values are baked
//! in with `option_env!` when the crate is compiled:
//!
//! - `FITWELL_API_URL`: REST base URL (default `http://localhost:3001/api`)
//! - `FITWELL_BACKEND`: `remote` (default) or `mock`
//! - `FITWELL_APP_ORIGIN`: origin used in confirmation links
//!   (default `http://localhost:3000`)

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_APP_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown FITWELL_BACKEND: {0} (expected 'remote' or 'mock')")]
    UnknownBackend(String),
    #[error("invalid {var}: {value} (expected an http(s) URL)")]
    InvalidUrl { var: &'static str, value: String },
}

/// Which auth backend implementation the session store talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackendMode {
    /// REST API at [`ClientConfig::api_base_url`].
    #[default]
    Remote,
    /// Storage-backed development mock; no network traffic.
    DevMock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub backend: BackendMode,
    pub app_origin: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            backend: BackendMode::default(),
            app_origin: DEFAULT_APP_ORIGIN.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Build the config from the values captured at compile time.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable is set to an unsupported value.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(
            option_env!("FITWELL_API_URL"),
            option_env!("FITWELL_BACKEND"),
            option_env!("FITWELL_APP_ORIGIN"),
        )
    }

    /// Build the config from optional raw values, applying defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the backend mode is unknown or a URL does
    /// not use an http(s) scheme.
    pub fn from_values(
        api_url: Option<&str>,
        backend: Option<&str>,
        app_origin: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let api_base_url = parse_url("FITWELL_API_URL", api_url, DEFAULT_API_BASE_URL)?;
        let backend = parse_backend(backend)?;
        let app_origin = parse_url("FITWELL_APP_ORIGIN", app_origin, DEFAULT_APP_ORIGIN)?;
        Ok(Self { api_base_url, backend, app_origin })
    }
}

fn parse_backend(raw: Option<&str>) -> Result<BackendMode, ConfigError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()).unwrap_or("remote") {
        "remote" => Ok(BackendMode::Remote),
        "mock" | "dev-mock" => Ok(BackendMode::DevMock),
        other => Err(ConfigError::UnknownBackend(other.to_owned())),
    }
}

fn parse_url(var: &'static str, raw: Option<&str>, default: &str) -> Result<String, ConfigError> {
    let value = raw.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(default);
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ConfigError::InvalidUrl { var, value: value.to_owned() });
    }
    Ok(value.trim_end_matches('/').to_owned())
}
