// File: src/config.rs
// Purpose: Router configuration parsing from TOML

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::NavigationError;

/// Router configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// State was rendered on the server; skip the startup resolution
    #[serde(default)]
    pub server_rendered: bool,

    /// Exact-path redirects, source → destination, in file order
    #[serde(default)]
    pub redirects: IndexMap<String, String>,

    /// Routes bound to message types
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// One configured route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub pattern: String,

    /// Message types dispatched on match; empty binds the no-action marker
    #[serde(default)]
    pub actions: Vec<String>,
}

impl RouterConfig {
    /// Parses configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, NavigationError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads configuration from a file, or defaults when it does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no router config found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
