//! Probe profile (YAML)

use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

/// Connection profile for the probe: where to talk, how long to wait,
/// and optionally who to authenticate as.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Profile {
    /// Backend origin, e.g. `https://api.gigpoint.io`
    pub origin: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: Option<u64>,
    /// Account email for authenticated probing
    pub email: Option<String>,
    /// Account password for authenticated probing
    pub password: Option<String>,
}

impl Profile {
    /// Load a profile from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&raw)?)
    }
}
