//! Wallet token-account discovery across both SPL token programs.

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::error::{ActionError, Result};
use crate::rpc::ChainReader;

/// Token program namespace an account lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenProgram {
    Legacy,
    Token2022,
}

impl TokenProgram {
    /// Scan order: legacy accounts are always reported first.
    pub const ALL: [TokenProgram; 2] = [TokenProgram::Legacy, TokenProgram::Token2022];

    pub fn id(&self) -> Pubkey {
        match self {
            TokenProgram::Legacy => spl_token::id(),
            TokenProgram::Token2022 => spl_token_2022::id(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountState {
    Uninitialized,
    Initialized,
    Frozen,
}

/// A token account held by a wallet, as reported by the RPC node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletTokenAccount {
    pub owner_wallet: String,
    pub account_address: String,
    pub program: TokenProgram,
    pub mint_address: String,
    pub raw_amount: u64,
    pub ui_amount: f64,
    pub decimals: u8,
    pub state: AccountState,
    pub has_transfer_fee: bool,
}

impl WalletTokenAccount {
    /// Zero-decimal accounts are NFTs or badges and have no fungible amount.
    pub fn is_eligible(&self) -> bool {
        self.state == AccountState::Initialized && self.raw_amount > 0 && self.decimals > 0
    }
}

/// Collect every eligible token account owned by `owner`.
///
/// Both programs are queried at processed commitment; if either query fails
/// the scan fails as a whole.
pub async fn scan_wallet(reader: &dyn ChainReader, owner: &Pubkey) -> Result<Vec<WalletTokenAccount>> {
    let (legacy, extended) = tokio::try_join!(
        reader.token_accounts(owner, TokenProgram::Legacy),
        reader.token_accounts(owner, TokenProgram::Token2022),
    )
    .map_err(|e| ActionError::Scan(format!("token accounts of {owner}: {e}")))?;

    let legacy: Vec<_> = legacy.into_iter().filter(WalletTokenAccount::is_eligible).collect();
    let extended: Vec<_> = extended.into_iter().filter(WalletTokenAccount::is_eligible).collect();

    debug!(
        owner = %owner,
        legacy = legacy.len(),
        token_2022 = extended.len(),
        "Scanned wallet token accounts"
    );

    Ok(legacy.into_iter().chain(extended).collect())
}
