use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use log::{debug, error, info};

use crate::error::{BotError, Result};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_GO_BIN: &str = "go";
const DEFAULT_DOC_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub go_bin: String,
    pub doc_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source, falling back
    /// to defaults for anything unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| {
                error!("Failed to parse LISTEN_ADDR: {}", e);
                BotError::Config(format!("invalid LISTEN_ADDR: {e}"))
            })?;

        let go_bin = lookup("GO_BIN").unwrap_or_else(|| DEFAULT_GO_BIN.to_string());
        if go_bin.trim().is_empty() {
            error!("GO_BIN is set but empty");
            return Err(BotError::Config("GO_BIN must not be empty".to_string()));
        }

        let timeout_secs = match lookup("DOC_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                error!("Failed to parse DOC_TIMEOUT_SECS: {}", e);
                BotError::Config(format!("invalid DOC_TIMEOUT_SECS: {e}"))
            })?,
            None => DEFAULT_DOC_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(BotError::Config(
                "DOC_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        info!("Configuration loaded successfully");
        debug!("Listen address: {}", listen_addr);
        debug!("Go binary: {}", go_bin);
        debug!("Doc lookup timeout: {}s", timeout_secs);

        Ok(Self {
            listen_addr,
            go_bin,
            doc_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
