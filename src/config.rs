use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::warn;
use serde::Deserialize;

use crate::exchanges::{Exchange, REGISTRY};

// ------------------------------------------------------------
// Root configuration
// ------------------------------------------------------------
//
// Loaded from `config.json` (or the `--config` path).
//
// It defines:
// - Which exchanges are normalized during replay
// - Output formatting
// - Optional debug configuration
//
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Exchange list; absent means every supported exchange
    #[serde(default)]
    pub exchanges: Option<Vec<ExchangeConfig>>,

    #[serde(default)]
    pub output: OutputConfig,

    /// Optional debug configuration
    pub debug: Option<DebugConfig>,
}

// ------------------------------------------------------------
// Exchange configuration
// ------------------------------------------------------------
#[derive(Debug, Deserialize, Clone)]
pub struct ExchangeConfig {
    /// Exchange identifier (e.g. "bitmex", "coinbase", "deribit")
    pub name: String,

    /// Enables or disables this exchange at runtime
    pub enabled: bool,
}

// ------------------------------------------------------------
// Output configuration
// ------------------------------------------------------------
#[derive(Debug, Deserialize, Clone, Default)]
pub struct OutputConfig {
    /// Pretty-print emitted filter records
    #[serde(default)]
    pub pretty: bool,
}

// ------------------------------------------------------------
// Debug configuration
// ------------------------------------------------------------
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    /// Enables debug-level logging
    pub log: Option<bool>,
}

impl Config {
    pub fn debug_log(&self) -> bool {
        self.debug
            .as_ref()
            .is_some_and(|d| d.log.unwrap_or(false))
    }

    /// Exchanges replay should normalize.
    ///
    /// Unknown names are reported and ignored.
    pub fn enabled_exchanges(&self) -> Vec<Exchange> {
        let Some(list) = &self.exchanges else {
            return REGISTRY.supported().collect();
        };

        for name in self.unknown_exchange_names() {
            warn!("config: unknown exchange '{}', ignoring", name);
        }

        list.iter()
            .filter(|e| e.enabled)
            .filter_map(|e| e.name.parse::<Exchange>().ok())
            .collect()
    }

    /// Configured names that are not exchange identifiers, enabled or not.
    pub fn unknown_exchange_names(&self) -> Vec<&str> {
        self.exchanges
            .iter()
            .flatten()
            .filter(|e| e.name.parse::<Exchange>().is_err())
            .map(|e| e.name.as_str())
            .collect()
    }
}

/// Reads a JSON configuration file from disk.
///
/// Returns `Ok(None)` when the file does not exist so the caller can
/// fall back to defaults.
pub fn load_config(path: &Path) -> anyhow::Result<Option<Config>> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let cfg = serde_json::from_str(&data)?;
    Ok(Some(cfg))
}
