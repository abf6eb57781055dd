//! Balance sufficiency checks for native SOL and SPL tokens.

use std::str::FromStr;
use std::sync::Arc;

use futures::future::try_join_all;
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use solana_sdk::pubkey::Pubkey;
use tracing::{debug, info};

use crate::directory::{TokenDescriptor, TokenDirectory};
use crate::error::{ActionError, Result};
use crate::rpc::ChainReader;
use crate::scanner::{scan_wallet, WalletTokenAccount};

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceCheckRequest {
    pub symbol: String,
    pub wallet_address: String,
    pub requested_amount: f64,
}

/// A wallet account paired with the directory metadata of its mint.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenHolding {
    pub account: WalletTokenAccount,
    pub token: TokenDescriptor,
}

pub fn is_native_symbol(symbol: &str) -> bool {
    matches!(symbol.to_lowercase().as_str(), "sol" | "solana")
}

pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

fn parse_wallet(wallet_address: &str) -> Result<Pubkey> {
    Pubkey::from_str(wallet_address.trim())
        .map_err(|e| ActionError::Validation(format!("invalid wallet address {wallet_address}: {e}")))
}

pub struct BalanceResolver {
    chain: Arc<dyn ChainReader>,
    directory: Arc<dyn TokenDirectory>,
}

impl BalanceResolver {
    pub fn new(chain: Arc<dyn ChainReader>, directory: Arc<dyn TokenDirectory>) -> Self {
        Self { chain, directory }
    }

    /// Whether `wallet_address` holds at least `required_amount` of `symbol`.
    ///
    /// `sol`/`solana` reads the native balance at confirmed commitment; any
    /// other symbol is matched against the wallet's token accounts. A failed
    /// directory lookup fails the whole check.
    pub async fn has_sufficient_balance(
        &self,
        symbol: &str,
        wallet_address: &str,
        required_amount: f64,
    ) -> Result<bool> {
        let owner = parse_wallet(wallet_address)?;

        if is_native_symbol(symbol) {
            let lamports = self.chain.native_balance(&owner).await?;
            let balance = lamports_to_sol(lamports);
            debug!(wallet = wallet_address, balance, required_amount, "Checked native balance");
            return Ok(balance >= required_amount);
        }

        let sufficient = match self.find_holding_for(symbol, &owner).await? {
            Some(holding) => holding.account.ui_amount >= required_amount,
            None => false,
        };
        info!(symbol, wallet = wallet_address, required_amount, sufficient, "Checked token balance");
        Ok(sufficient)
    }

    pub async fn check(&self, request: &BalanceCheckRequest) -> Result<bool> {
        self.has_sufficient_balance(&request.symbol, &request.wallet_address, request.requested_amount)
            .await
    }

    /// First token account (legacy program first) whose mint's symbol
    /// matches `symbol`, ignoring case.
    pub async fn find_holding(&self, symbol: &str, wallet_address: &str) -> Result<Option<TokenHolding>> {
        let owner = parse_wallet(wallet_address)?;
        self.find_holding_for(symbol, &owner).await
    }

    async fn find_holding_for(&self, symbol: &str, owner: &Pubkey) -> Result<Option<TokenHolding>> {
        let accounts = scan_wallet(self.chain.as_ref(), owner).await?;

        // try_join_all keeps results in scanner order.
        let tokens = try_join_all(
            accounts
                .iter()
                .map(|account| self.directory.lookup_token(&account.mint_address)),
        )
        .await?;

        let holding = accounts
            .into_iter()
            .zip(tokens)
            .find(|(_, token)| token.has_symbol(symbol))
            .map(|(account, token)| TokenHolding { account, token });

        if holding.is_none() {
            debug!(symbol, owner = %owner, "No token account matches symbol");
        }
        Ok(holding)
    }
}
