use std::env;

use tracing::debug;

use crate::error::{ActionError, Result};

pub const DEFAULT_TOKEN_API_URL: &str = "https://tokens.jup.ag";
pub const DEFAULT_QUOTE_API_URL: &str = "https://quote-api.jup.ag/v6";

/// Endpoints used by the Jupiter actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rpc_url: String,
    pub token_api_url: String,
    pub quote_api_url: String,
}

impl Config {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            token_api_url: DEFAULT_TOKEN_API_URL.to_string(),
            quote_api_url: DEFAULT_QUOTE_API_URL.to_string(),
        }
    }

    /// Load configuration from the process environment (and `.env`, if present).
    ///
    /// `MAINNET_RPC_URL` is required; the Jupiter endpoints fall back to the
    /// public APIs.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let rpc_url = env::var("MAINNET_RPC_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ActionError::Config("MAINNET_RPC_URL is not set".to_string()))?;

        let config = Self {
            rpc_url,
            token_api_url: env::var("JUPITER_TOKEN_API_URL")
                .unwrap_or_else(|_| DEFAULT_TOKEN_API_URL.to_string()),
            quote_api_url: env::var("JUPITER_QUOTE_API_URL")
                .unwrap_or_else(|_| DEFAULT_QUOTE_API_URL.to_string()),
        };

        debug!(
            token_api = %config.token_api_url,
            quote_api = %config.quote_api_url,
            "Loaded configuration"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_public_jupiter_endpoints() {
        let config = Config::new("http://localhost:8899");
        assert_eq!(config.rpc_url, "http://localhost:8899");
        assert_eq!(config.token_api_url, DEFAULT_TOKEN_API_URL);
        assert_eq!(config.quote_api_url, DEFAULT_QUOTE_API_URL);
    }

    // Both cases share one test so they never race on the process environment.
    #[test]
    fn from_env_requires_rpc_url_and_defaults_jupiter_endpoints() {
        env::remove_var("JUPITER_TOKEN_API_URL");
        env::remove_var("JUPITER_QUOTE_API_URL");

        env::remove_var("MAINNET_RPC_URL");
        assert!(matches!(Config::from_env(), Err(ActionError::Config(_))));

        env::set_var("MAINNET_RPC_URL", "   ");
        assert!(matches!(Config::from_env(), Err(ActionError::Config(_))));

        env::set_var("MAINNET_RPC_URL", "https://rpc.example.com");
        let config = Config::from_env().unwrap();
        assert_eq!(config.rpc_url, "https://rpc.example.com");
        assert_eq!(config.token_api_url, DEFAULT_TOKEN_API_URL);
        assert_eq!(config.quote_api_url, DEFAULT_QUOTE_API_URL);

        env::remove_var("MAINNET_RPC_URL");
    }
}
