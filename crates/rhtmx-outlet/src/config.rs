// File: src/config.rs
// Purpose: Configuration parsing from outlet.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::route::RouteDeclaration;

/// Navigator configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Route declarations; views declared here are tags only (no factories)
    #[serde(default)]
    pub routes: Vec<RouteDeclaration>,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Base reference patterns and relative paths resolve against (default: "/")
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Whether static segments match case-insensitively (default: false)
    #[serde(default)]
    pub case_insensitive: bool,

    /// Redirect hops allowed within one navigation (default: 200)
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Tag for depths with neither a factory view nor a declared view (default: "div")
    #[serde(default = "default_view_tag")]
    pub default_view_tag: String,
}

fn default_base_path() -> String {
    "/".to_string()
}

fn default_max_redirects() -> usize {
    200
}

fn default_view_tag() -> String {
    "div".to_string()
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            case_insensitive: false,
            max_redirects: default_max_redirects(),
            default_view_tag: default_view_tag(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./outlet.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("outlet.toml")
    }

    /// Parse configuration from TOML text; blank input yields the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(toml::from_str(content)?)
    }
}
