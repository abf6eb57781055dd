#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use jupiter_actions_core::{
    AccountState, ActionError, Agent, ChainReader, QuoteSource, Reply, ReplyCallback, SwapQuote,
    TextGenerator, TokenDescriptor, TokenDirectory, TokenProgram, WalletTokenAccount,
};
use solana_sdk::pubkey::Pubkey;

pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";
pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
pub const BONK_MINT: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";

pub fn descriptor(mint: &str, symbol: &str, decimals: u8) -> TokenDescriptor {
    TokenDescriptor {
        mint_address: mint.to_string(),
        name: format!("{symbol} Token"),
        symbol: symbol.to_string(),
        decimals,
        logo_url: format!("https://example.com/{symbol}.png"),
        tags: vec!["verified".to_string()],
        daily_volume: 1_000.0,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        freeze_authority: None,
        mint_authority: None,
        permanent_delegate: None,
        minted_at: None,
        coingecko_id: None,
    }
}

pub fn token_account(
    program: TokenProgram,
    mint: &str,
    raw_amount: u64,
    decimals: u8,
    state: AccountState,
) -> WalletTokenAccount {
    WalletTokenAccount {
        owner_wallet: "owner".to_string(),
        account_address: format!("{mint}-{raw_amount}"),
        program,
        mint_address: mint.to_string(),
        raw_amount,
        ui_amount: raw_amount as f64 / 10f64.powi(i32::from(decimals)),
        decimals,
        state,
        has_transfer_fee: false,
    }
}

#[derive(Default)]
pub struct FakeChain {
    pub legacy: Vec<WalletTokenAccount>,
    pub token_2022: Vec<WalletTokenAccount>,
    pub lamports: u64,
    pub fail_program: Option<TokenProgram>,
}

#[async_trait]
impl ChainReader for FakeChain {
    async fn token_accounts(
        &self,
        _owner: &Pubkey,
        program: TokenProgram,
    ) -> jupiter_actions_core::Result<Vec<WalletTokenAccount>> {
        if self.fail_program == Some(program) {
            return Err(ActionError::Rpc("connection refused".to_string()));
        }
        Ok(match program {
            TokenProgram::Legacy => self.legacy.clone(),
            TokenProgram::Token2022 => self.token_2022.clone(),
        })
    }

    async fn native_balance(&self, _owner: &Pubkey) -> jupiter_actions_core::Result<u64> {
        Ok(self.lamports)
    }
}

#[derive(Default)]
pub struct FakeDirectory {
    pub tokens: HashMap<String, TokenDescriptor>,
    pub lookups: Mutex<Vec<String>>,
}

impl FakeDirectory {
    pub fn with(tokens: Vec<TokenDescriptor>) -> Self {
        Self {
            tokens: tokens
                .into_iter()
                .map(|t| (t.mint_address.clone(), t))
                .collect(),
            lookups: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TokenDirectory for FakeDirectory {
    async fn lookup_token(&self, mint_address: &str) -> jupiter_actions_core::Result<TokenDescriptor> {
        self.lookups.lock().unwrap().push(mint_address.to_string());
        self.tokens
            .get(mint_address)
            .cloned()
            .ok_or_else(|| ActionError::NotFound(mint_address.to_string()))
    }
}

#[derive(Default)]
pub struct FakeQuotes {
    pub quote: Option<SwapQuote>,
    pub requests: Mutex<Vec<(String, String, String, u16)>>,
}

#[async_trait]
impl QuoteSource for FakeQuotes {
    async fn quote(
        &self,
        input_mint: &str,
        output_mint: &str,
        raw_amount: &str,
        slippage_bps: u16,
    ) -> jupiter_actions_core::Result<SwapQuote> {
        self.requests.lock().unwrap().push((
            input_mint.to_string(),
            output_mint.to_string(),
            raw_amount.to_string(),
            slippage_bps,
        ));
        self.quote
            .clone()
            .ok_or_else(|| ActionError::Api("no route".to_string()))
    }
}

/// Answers every prompt with the same text and records the prompts.
pub struct ScriptedModel {
    pub answer: String,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedModel {
    async fn generate_text(&self, context: &str) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(context.to_string());
        Ok(self.answer.clone())
    }
}

#[derive(Default)]
pub struct RecordingCallback {
    pub replies: Mutex<Vec<Reply>>,
}

impl RecordingCallback {
    pub fn texts(&self) -> Vec<String> {
        self.replies
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.text.clone())
            .collect()
    }
}

#[async_trait]
impl ReplyCallback for RecordingCallback {
    async fn send(&self, reply: Reply) -> anyhow::Result<()> {
        self.replies.lock().unwrap().push(reply);
        Ok(())
    }
}

pub fn agent(
    chain: FakeChain,
    directory: FakeDirectory,
    quotes: FakeQuotes,
    model: ScriptedModel,
) -> Agent {
    Agent::from_parts(
        Arc::new(chain),
        Arc::new(directory),
        Arc::new(quotes),
        Arc::new(model),
    )
}
