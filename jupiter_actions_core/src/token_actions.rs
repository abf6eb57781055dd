use async_trait::async_trait;
use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::actions::{Action, ActionExample, ActionMetadata, ActionRegistry, Reply};
use crate::agent::Agent;
use crate::format::format_token_info;
use crate::model::extract;

// =============================================================================
// JUP_INFO - Describe a token from the Jupiter token directory
// =============================================================================

#[derive(Debug)]
pub struct TokenInfoAction {
    meta: ActionMetadata,
}

impl TokenInfoAction {
    pub fn new() -> Self {
        let input_schema = json!({
            "type": "object",
            "properties": {
                "mintAddress": {
                    "type": "string",
                    "description": "Mint address of the token to describe",
                }
            },
            "required": ["mintAddress"],
            "additionalProperties": false,
        });

        let examples = vec![
            ActionExample {
                input: json!({
                    "mintAddress": "So11111111111111111111111111111111111111112",
                }),
                output: json!({
                    "text": "🔹 Name: Wrapped SOL (SOL)\n🔹 Address: So11111111111111111111111111111111111111112\n🔹 Decimals: 9",
                }),
                explanation: "Tell me about the token with mint address So11111111111111111111111111111111111111112".to_string(),
            },
            ActionExample {
                input: json!({
                    "mintAddress": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                }),
                output: json!({
                    "text": "🔹 Name: USD Coin (USDC)\n🔹 Address: EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v\n🔹 Decimals: 6",
                }),
                explanation: "Get info for token EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".to_string(),
            },
        ];

        let meta = ActionMetadata {
            name: "JUP_INFO".to_string(),
            similes: vec!["TOKEN".to_string(), "TOKEN__INFO".to_string()],
            description: "Fetch and display token info for provided token mint address".to_string(),
            examples,
            input_schema,
            extraction_prompt: "Extract the token mint address from the user's message. The message is: {message}\n\
                Only respond with the token mint address, follow this schema {\"mintAddress\": \"So11111111111111111111111111111111111111112\"}, \
                mention only values, do not include any other text"
                .to_string(),
            failure_message: "Sorry, there was an error fetching the token info.".to_string(),
        };

        Self { meta }
    }
}

impl Default for TokenInfoAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for TokenInfoAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, agent: &Agent, input: Value) -> Result<Reply> {
        #[derive(Deserialize)]
        struct Input {
            #[serde(rename = "mintAddress")]
            mint_address: String,
        }

        let parsed: Input = extract(input)?;
        let token = agent.directory.lookup_token(parsed.mint_address.trim()).await?;
        info!(mint = %token.mint_address, symbol = %token.symbol, "Fetched token info");

        Ok(Reply::new(format_token_info(&token)))
    }
}

// =============================================================================
// Register token actions
// =============================================================================

pub fn register_token_actions(registry: &mut ActionRegistry) {
    registry.register(TokenInfoAction::new());
}
