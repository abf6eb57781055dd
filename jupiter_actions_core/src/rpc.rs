//! Solana JSON-RPC access used by the scanner and the balance resolver.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use solana_account_decoder::UiAccountData;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_request::TokenAccountsFilter;
use solana_client::rpc_response::RpcKeyedAccount;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use tracing::{debug, warn};

use crate::error::{ActionError, Result};
use crate::scanner::{AccountState, TokenProgram, WalletTokenAccount};

const TRANSFER_FEE_EXTENSION: &str = "transferFeeAmount";

/// Read-only view of the chain needed by the actions.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Parsed token accounts owned by `owner` under one token program,
    /// unfiltered, in node order.
    async fn token_accounts(&self, owner: &Pubkey, program: TokenProgram) -> Result<Vec<WalletTokenAccount>>;

    /// Native balance in lamports.
    async fn native_balance(&self, owner: &Pubkey) -> Result<u64>;
}

/// `ChainReader` backed by a long-lived RPC client.
pub struct RpcChainReader {
    client: Arc<RpcClient>,
}

impl RpcChainReader {
    pub fn new(rpc_url: &str) -> Self {
        Self {
            client: Arc::new(RpcClient::new(rpc_url.to_string())),
        }
    }

}

#[async_trait]
impl ChainReader for RpcChainReader {
    async fn token_accounts(&self, owner: &Pubkey, program: TokenProgram) -> Result<Vec<WalletTokenAccount>> {
        let response = self
            .client
            .get_token_accounts_by_owner_with_commitment(
                owner,
                TokenAccountsFilter::ProgramId(program.id()),
                CommitmentConfig::processed(),
            )
            .await
            .map_err(|e| ActionError::Rpc(format!("getTokenAccountsByOwner ({program:?}): {e}")))?;

        let accounts = response
            .value
            .iter()
            .map(|keyed| {
                parse_token_account(owner, program, keyed).map_err(|e| {
                    warn!(account = %keyed.pubkey, "Unparsable token account: {}", e);
                    e
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(owner = %owner, ?program, count = accounts.len(), "Fetched token accounts");
        Ok(accounts)
    }

    async fn native_balance(&self, owner: &Pubkey) -> Result<u64> {
        let response = self
            .client
            .get_balance_with_commitment(owner, CommitmentConfig::confirmed())
            .await
            .map_err(|e| ActionError::Rpc(format!("getBalance: {e}")))?;
        Ok(response.value)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParsedTokenAccountInfo {
    mint: String,
    state: AccountState,
    token_amount: ParsedTokenAmount,
    #[serde(default)]
    extensions: Vec<ParsedExtension>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParsedTokenAmount {
    amount: String,
    decimals: u8,
    #[serde(default)]
    ui_amount: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ParsedExtension {
    extension: String,
}

/// Decode a `jsonParsed` token account into a `WalletTokenAccount`.
pub(crate) fn parse_token_account(
    owner: &Pubkey,
    program: TokenProgram,
    keyed: &RpcKeyedAccount,
) -> Result<WalletTokenAccount> {
    let parsed = match &keyed.account.data {
        UiAccountData::Json(parsed) => &parsed.parsed,
        _ => return Err(ActionError::Parse("expected jsonParsed account data".to_string())),
    };

    let info = parsed
        .get("info")
        .cloned()
        .ok_or_else(|| ActionError::Parse("missing info field".to_string()))?;
    let info: ParsedTokenAccountInfo =
        serde_json::from_value(info).map_err(|e| ActionError::Parse(format!("token account info: {e}")))?;

    let raw_amount = info
        .token_amount
        .amount
        .parse::<u64>()
        .map_err(|e| ActionError::Parse(format!("token amount {}: {e}", info.token_amount.amount)))?;
    let decimals = info.token_amount.decimals;
    let ui_amount = info
        .token_amount
        .ui_amount
        .unwrap_or_else(|| crate::format::raw_to_ui(raw_amount, decimals));

    Ok(WalletTokenAccount {
        owner_wallet: owner.to_string(),
        account_address: keyed.pubkey.clone(),
        program,
        mint_address: info.mint,
        raw_amount,
        ui_amount,
        decimals,
        state: info.state,
        has_transfer_fee: info
            .extensions
            .iter()
            .any(|ext| ext.extension == TRANSFER_FEE_EXTENSION),
    })
}
