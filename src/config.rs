use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::CatalogError;

/// Process configuration.
///
/// Layering (later wins):
/// 1. built-in defaults
/// 2. unprefixed `DATABASE_URL`, `HOST`, `PORT`, `LOGLEVEL`
/// 3. `CATALOG_*` variables, e.g. `CATALOG_MAX_CONNECTIONS=10`
///
/// `database_url` names an embedded SQLite file, so there is no transport and
/// no certificate to check. There is no "skip certificate verification"
/// setting; a networked store would need one added here as an explicit,
/// default-off option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub loglevel: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub statement_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:catalog.sqlite".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            loglevel: "info".to_string(),
            max_connections: 5,
            acquire_timeout_secs: 5,
            statement_timeout_secs: 10,
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(&["DATABASE_URL", "HOST", "PORT", "LOGLEVEL"]))
            .merge(Env::prefixed("CATALOG_"))
    }

    /// Load from the environment and validate.
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> Result<Self, CatalogError> {
        let cfg: Config = figment
            .extract()
            .map_err(|e| CatalogError::Config(format!("invalid configuration: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.database_url.trim().is_empty() {
            return Err(CatalogError::Config(
                "database_url must not be empty".to_string(),
            ));
        }
        if self.max_connections == 0 {
            return Err(CatalogError::Config(
                "max_connections must be at least 1".to_string(),
            ));
        }
        if self.acquire_timeout_secs == 0 || self.statement_timeout_secs == 0 {
            return Err(CatalogError::Config(
                "timeouts must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn statement_timeout(&self) -> Duration {
        Duration::from_secs(self.statement_timeout_secs)
    }
}
