pub mod actions;
pub mod agent;
pub mod balance;
pub mod config;
pub mod directory;
pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod quote;
pub mod rpc;
pub mod scanner;
pub mod swap_actions;
pub mod token_actions;
pub mod trade_actions;

pub use actions::{Action, ActionExample, ActionMetadata, ActionRegistry, Reply, ReplyCallback};
pub use agent::Agent;
pub use balance::{BalanceCheckRequest, BalanceResolver, TokenHolding};
pub use config::Config;
pub use directory::{JupiterTokenClient, TokenDescriptor, TokenDirectory};
pub use error::{ActionError, Result};
pub use model::TextGenerator;
pub use quote::{JupiterQuoteClient, QuoteSource, SwapQuote};
pub use rpc::{ChainReader, RpcChainReader};
pub use scanner::{scan_wallet, AccountState, TokenProgram, WalletTokenAccount};
pub use swap_actions::register_swap_actions;
pub use token_actions::register_token_actions;
pub use trade_actions::register_trade_actions;

/// Convenience helper to register all Jupiter actions (JUP_INFO, JUP_SWAP,
/// TRADE) on a registry.
pub fn register_all_actions(registry: &mut ActionRegistry) {
    register_token_actions(registry);
    register_swap_actions(registry);
    register_trade_actions(registry);
}
