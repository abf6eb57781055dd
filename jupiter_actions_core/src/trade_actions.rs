use async_trait::async_trait;
use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::actions::{Action, ActionExample, ActionMetadata, ActionRegistry, Reply};
use crate::agent::Agent;
use crate::format::{format_trade, TradeLeg};
use crate::model::extract;

// =============================================================================
// TRADE - Check both sides of a peer-to-peer token trade
// =============================================================================

#[derive(Debug)]
pub struct TradeAction {
    meta: ActionMetadata,
}

impl TradeAction {
    pub fn new() -> Self {
        let input_schema = json!({
            "type": "object",
            "properties": {
                "from_token": {
                    "type": "string",
                    "description": "Symbol the maker sends (SOL or an SPL token symbol)",
                },
                "to_token": {
                    "type": "string",
                    "description": "Symbol the taker sends back",
                },
                "send_amount": {
                    "type": "number",
                    "description": "Amount of from_token the maker sends",
                },
                "receive_amount": {
                    "type": "number",
                    "description": "Amount of to_token the maker receives",
                },
                "fromWallet": {
                    "type": "string",
                    "description": "Maker wallet address",
                },
                "toWallet": {
                    "type": "string",
                    "description": "Taker wallet address",
                },
            },
            "required": ["from_token", "to_token", "send_amount", "receive_amount", "fromWallet", "toWallet"],
            "additionalProperties": false,
        });

        let examples = vec![ActionExample {
            input: json!({
                "from_token": "sol",
                "to_token": "usdc",
                "send_amount": 10,
                "receive_amount": 5,
                "fromWallet": "8xzt6HrynLyiLpU17Qd8xGhCSfKv9WJqRKHsmzYdvvQP",
                "toWallet": "6izt4HswnLyiLpU17Qd8xGhCSfKv9WJqRKHsmzYdvvQK",
            }),
            output: json!({
                "text": "Swap 10 SOL from 8xzt6HrynLyiLpU17Qd8xGhCSfKv9WJqRKHsmzYdvvQP to 5 USDC to 6izt4HswnLyiLpU17Qd8xGhCSfKv9WJqRKHsmzYdvvQK\nBoth wallets hold sufficient balances.",
            }),
            explanation: "Transfer 10 SOL for 5 USDC from 8xzt6HrynLyiLpU17Qd8xGhCSfKv9WJqRKHsmzYdvvQP to 6izt4HswnLyiLpU17Qd8xGhCSfKv9WJqRKHsmzYdvvQK".to_string(),
        }];

        let meta = ActionMetadata {
            name: "TRADE".to_string(),
            similes: vec![
                "SWAP".to_string(),
                "TRADE".to_string(),
                "TRANSFER".to_string(),
            ],
            description: "Check that both wallets of a peer-to-peer token trade hold the amounts they offer".to_string(),
            examples,
            input_schema,
            extraction_prompt: "Extract the swap details from the user's message. The message is: {message}\n\
                Only respond with the swap details, follow this schema \
                {\"from_token\": \"sol\", \"to_token\": \"usdc\", \"send_amount\": 200, \"receive_amount\": 200, \"fromWallet\": \"wallet_address_1\", \"toWallet\": \"wallet_address_2\"}, \
                mention only values, do not include any other text"
                .to_string(),
            failure_message: "Sorry, there was an error processing the trade.".to_string(),
        };

        Self { meta }
    }
}

impl Default for TradeAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for TradeAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, agent: &Agent, input: Value) -> Result<Reply> {
        #[derive(Deserialize)]
        struct Input {
            from_token: String,
            to_token: String,
            send_amount: f64,
            receive_amount: f64,
            #[serde(rename = "fromWallet")]
            from_wallet: String,
            #[serde(rename = "toWallet")]
            to_wallet: String,
        }

        let parsed: Input = extract(input)?;
        let resolver = agent.balance_resolver();

        let maker_sufficient = resolver
            .has_sufficient_balance(&parsed.from_token, &parsed.from_wallet, parsed.send_amount)
            .await?;
        let taker_sufficient = resolver
            .has_sufficient_balance(&parsed.to_token, &parsed.to_wallet, parsed.receive_amount)
            .await?;
        info!(maker_sufficient, taker_sufficient, "Checked trade balances");

        let maker = TradeLeg {
            token: parsed.from_token,
            amount: parsed.send_amount,
            wallet: parsed.from_wallet,
            sufficient: maker_sufficient,
        };
        let taker = TradeLeg {
            token: parsed.to_token,
            amount: parsed.receive_amount,
            wallet: parsed.to_wallet,
            sufficient: taker_sufficient,
        };

        Ok(Reply::new(format_trade(&maker, &taker)))
    }
}

// =============================================================================
// Register trade actions
// =============================================================================

pub fn register_trade_actions(registry: &mut ActionRegistry) {
    registry.register(TradeAction::new());
}
