//! Documentation lookup through the `go doc` command.

use std::future::Future;
use std::process::Stdio;
use std::time::Duration;

use log::{debug, warn};
use tokio::process::Command;

use crate::config::Config;
use crate::error::{BotError, Result};

/// Source of plain-text documentation for a Go symbol.
pub trait DocLookup: Send + Sync + 'static {
    /// Fetch the documentation for `symbol`.
    fn lookup(&self, symbol: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Runs `<bin> doc <symbol>` as a child process.
#[derive(Debug, Clone)]
pub struct GoDoc {
    bin: String,
    timeout: Duration,
}

impl GoDoc {
    pub fn new(bin: impl Into<String>, timeout: Duration) -> Self {
        Self {
            bin: bin.into(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.go_bin.clone(), config.doc_timeout)
    }
}

impl DocLookup for GoDoc {
    async fn lookup(&self, symbol: &str) -> Result<String> {
        debug!("Running {} doc {}", self.bin, symbol);

        let mut command = Command::new(&self.bin);
        command
            .arg("doc")
            .arg(symbol)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| BotError::LookupTimeout {
                symbol: symbol.to_string(),
                seconds: self.timeout.as_secs(),
            })?
            .map_err(|e| BotError::Lookup {
                symbol: symbol.to_string(),
                message: format!("failed to run {}: {}", self.bin, e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                "{} doc {} exited with {}: {}",
                self.bin,
                symbol,
                output.status,
                stderr.trim()
            );
            return Err(BotError::Lookup {
                symbol: symbol.to_string(),
                message: format!("exited with {}: {}", output.status, stderr.trim()),
            });
        }

        debug!(
            "{} doc {} returned {} bytes",
            self.bin,
            symbol,
            output.stdout.len()
        );
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
