//! Process configuration read from the environment.

use std::net::SocketAddr;

use anyhow::Context;
use tracing::warn;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// `None` selects the in-memory repositories.
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    ///
    /// Unparseable values fall back to their defaults with a warning. Enabling persistent
    /// stores without `DATABASE_URL` is an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = match lookup("BIND_ADDR") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(value = %raw, default = DEFAULT_BIND_ADDR, "invalid BIND_ADDR; using default");
                default_bind_addr()
            }),
            None => default_bind_addr(),
        };

        let persistent = match lookup("USE_PERSISTENT_STORES") {
            Some(raw) => parse_bool(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "invalid USE_PERSISTENT_STORES; using in-memory stores");
                false
            }),
            None => false,
        };

        let database = if persistent {
            let url = lookup("DATABASE_URL")
                .filter(|url| !url.trim().is_empty())
                .context("DATABASE_URL must be set when USE_PERSISTENT_STORES is enabled")?;
            let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
                Some(raw) => match raw.trim().parse::<u32>() {
                    Ok(n) if n > 0 => n,
                    _ => {
                        warn!(
                            value = %raw,
                            default = DEFAULT_MAX_CONNECTIONS,
                            "invalid DATABASE_MAX_CONNECTIONS; using default"
                        );
                        DEFAULT_MAX_CONNECTIONS
                    }
                },
                None => DEFAULT_MAX_CONNECTIONS,
            };
            Some(DatabaseConfig {
                url,
                max_connections,
            })
        } else {
            None
        };

        if database.is_none() && lookup("DATABASE_URL").is_some() {
            warn!("DATABASE_URL is set but USE_PERSISTENT_STORES is off; using in-memory stores");
        }

        Ok(Self {
            bind_addr,
            database,
        })
    }

    pub fn uses_persistent_stores(&self) -> bool {
        self.database.is_some()
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
