use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Token not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Wallet scan failed: {0}")]
    Scan(String),

    #[error("Solana RPC error: {0}")]
    Rpc(String),

    #[error("Jupiter API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ActionError>;
