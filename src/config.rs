// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! once at startup and never changes afterward.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SECRET` | HMAC secret used to sign access tokens | Required |
//! | `AUTH_CLIENTS` | Registered clients as `id:secret` pairs, comma separated | - |
//! | `CLIENT_ID` | Single registered client id | - |
//! | `CLIENT_SECRET` | Secret for `CLIENT_ID` | - |
//! | `TOKEN_TTL_SECS` | Access token lifetime in seconds (1 to 31536000) | `3600` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//!
//! At least one client must be registered through `AUTH_CLIENTS` and/or
//! `CLIENT_ID` + `CLIENT_SECRET`.

use std::sync::Arc;

use chrono::Duration;

use crate::auth::{
    AuthService, Clock, ClientRegistry, RegisteredClient, RegistryError, SigningSecret,
};

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the token signing secret.
///
/// Shared by issuer and verifier. Rotating it invalidates every outstanding
/// token.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the registered client list.
///
/// # Format
/// `client_a:secret_a,client_b:secret_b`. The id ends at the first `:`, so
/// secrets may themselves contain `:`.
pub const AUTH_CLIENTS_ENV: &str = "AUTH_CLIENTS";
pub const CLIENT_ID_ENV: &str = "CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "CLIENT_SECRET";
pub const TOKEN_TTL_SECS_ENV: &str = "TOKEN_TTL_SECS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Upper bound for `TOKEN_TTL_SECS` (365 days). Keeps `iat + lifetime` far
/// from `i64` overflow.
pub const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Signing secret used when `JWT_SECRET` is unset in `dev` builds.
#[cfg(feature = "dev")]
pub const DEV_JWT_SECRET: &str = "dev-only-insecure-signing-secret";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
    #[error("no clients registered; set AUTH_CLIENTS or CLIENT_ID/CLIENT_SECRET")]
    NoClients,
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// Process configuration, read once at startup.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub clients: Vec<RegisteredClient>,
    pub token_lifetime: Duration,
    pub log_format: LogFormat,
    /// Set when `jwt_secret` is the `dev` build fallback.
    pub dev_secret: bool,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(PORT_ENV) {
            Some(raw) => raw.trim().parse().map_err(|e| ConfigError::Invalid {
                var: PORT_ENV,
                reason: format!("{e}"),
            })?,
            None => DEFAULT_PORT,
        };

        let (jwt_secret, dev_secret) = match get(JWT_SECRET_ENV) {
            Some(secret) => (secret, false),
            None => (dev_secret_fallback()?, true),
        };

        let clients = parse_clients(get(AUTH_CLIENTS_ENV), get(CLIENT_ID_ENV), get(CLIENT_SECRET_ENV))?;

        let token_lifetime = match get(TOKEN_TTL_SECS_ENV) {
            Some(raw) => {
                let secs: i64 = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                    var: TOKEN_TTL_SECS_ENV,
                    reason: format!("{e}"),
                })?;
                if !(1..=MAX_TOKEN_TTL_SECS).contains(&secs) {
                    return Err(ConfigError::Invalid {
                        var: TOKEN_TTL_SECS_ENV,
                        reason: format!("must be between 1 and {MAX_TOKEN_TTL_SECS}"),
                    });
                }
                Duration::try_seconds(secs).ok_or_else(|| ConfigError::Invalid {
                    var: TOKEN_TTL_SECS_ENV,
                    reason: "out of range".to_string(),
                })?
            }
            None => Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
        };

        let log_format = match get(LOG_FORMAT_ENV).map(|v| v.trim().to_ascii_lowercase()) {
            None => LogFormat::default(),
            Some(v) if v == "json" => LogFormat::Json,
            Some(v) if v == "pretty" => LogFormat::Pretty,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: LOG_FORMAT_ENV,
                    reason: format!("expected 'json' or 'pretty', got '{other}'"),
                })
            }
        };

        Ok(Self {
            host,
            port,
            jwt_secret,
            clients,
            token_lifetime,
            log_format,
            dev_secret,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build the authentication service described by this configuration.
    pub fn auth_service(&self, clock: Arc<dyn Clock>) -> Result<AuthService, ConfigError> {
        let registry = ClientRegistry::new(self.clients.iter().cloned())?;
        let secret = SigningSecret::new(&self.jwt_secret).map_err(|e| ConfigError::Invalid {
            var: JWT_SECRET_ENV,
            reason: e.to_string(),
        })?;
        Ok(AuthService::new(registry, secret, self.token_lifetime, clock))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("jwt_secret", &"<redacted>")
            .field("clients", &self.clients)
            .field("token_lifetime", &self.token_lifetime)
            .field("log_format", &self.log_format)
            .field("dev_secret", &self.dev_secret)
            .finish()
    }
}

#[cfg(feature = "dev")]
fn dev_secret_fallback() -> Result<String, ConfigError> {
    Ok(DEV_JWT_SECRET.to_string())
}

#[cfg(not(feature = "dev"))]
fn dev_secret_fallback() -> Result<String, ConfigError> {
    Err(ConfigError::Missing(JWT_SECRET_ENV))
}

fn parse_clients(
    list: Option<String>,
    single_id: Option<String>,
    single_secret: Option<String>,
) -> Result<Vec<RegisteredClient>, ConfigError> {
    let mut clients = Vec::new();

    if let Some(list) = list {
        for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (id, secret) = entry.split_once(':').ok_or_else(|| ConfigError::Invalid {
                var: AUTH_CLIENTS_ENV,
                reason: "expected entries of the form 'client_id:client_secret'".to_string(),
            })?;
            clients.push(RegisteredClient::new(id.trim(), secret));
        }
    }

    match (single_id, single_secret) {
        (Some(id), Some(secret)) => clients.push(RegisteredClient::new(id.trim(), secret)),
        (None, None) => {}
        (Some(_), None) => return Err(ConfigError::Missing(CLIENT_SECRET_ENV)),
        (None, Some(_)) => return Err(ConfigError::Missing(CLIENT_ID_ENV)),
    }

    if clients.is_empty() {
        return Err(ConfigError::NoClients);
    }
    Ok(clients)
}
