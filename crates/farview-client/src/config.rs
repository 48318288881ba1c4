//! Client configuration, loaded from an optional JSON file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Synchronization loop period in milliseconds.
    pub tick_interval_ms: u64,
    /// Display frame rate for the headless render loop.
    pub frame_rate_hz: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 5,
            frame_rate_hz: 72,
        }
    }
}

pub fn load(path: &Path) -> Result<ClientConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}
