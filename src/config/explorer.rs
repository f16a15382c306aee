// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Runtime configuration for the explorer service

use std::env;
use url::Url;

pub const DEFAULT_REGISTRY_URL: &str = "https://registry.testnet.initia.xyz/chains.json";

/// Configuration for the explorer service and CLI
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Chain registry document URL
    pub registry_url: String,
    /// API bind host
    pub api_host: String,
    /// API bind port
    pub api_port: u16,
    /// Chain selected at startup (name or id); first catalog entry if unset
    pub initial_chain: Option<String>,
    /// User-Agent sent with registry and probe requests
    pub user_agent: String,
}

impl ExplorerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            registry_url: env::var("CHAIN_REGISTRY_URL").unwrap_or(defaults.registry_url),
            api_host: env::var("API_HOST").unwrap_or(defaults.api_host),
            api_port: env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.api_port),
            initial_chain: env::var("INITIAL_CHAIN").ok().filter(|v| !v.is_empty()),
            user_agent: env::var("HTTP_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.registry_url.is_empty() {
            return Err("Registry URL must not be empty".to_string());
        }
        let parsed = Url::parse(&self.registry_url)
            .map_err(|e| format!("Invalid registry URL '{}': {}", self.registry_url, e))?;
        if !["http", "https"].contains(&parsed.scheme()) {
            return Err(format!(
                "Registry URL must be http or https, got '{}'",
                parsed.scheme()
            ));
        }
        if self.api_port == 0 {
            return Err("API port must be greater than 0".to_string());
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            api_host: "127.0.0.1".to_string(),
            api_port: 8080,
            initial_chain: None,
            user_agent: format!("chain-explorer/{}", crate::version::VERSION_NUMBER),
        }
    }
}
