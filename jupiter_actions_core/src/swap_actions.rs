use async_trait::async_trait;
use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::actions::{Action, ActionExample, ActionMetadata, ActionRegistry, Reply};
use crate::agent::Agent;
use crate::error::ActionError;
use crate::format::{format_swap, ui_to_raw};
use crate::model::extract;

const MAX_SLIPPAGE_BPS: f64 = 10_000.0;

/// Validate an extracted slippage, given in basis points.
pub fn slippage_bps(value: f64) -> Result<u16, ActionError> {
    if !value.is_finite() || value.fract() != 0.0 || !(0.0..=MAX_SLIPPAGE_BPS).contains(&value) {
        return Err(ActionError::Validation(format!(
            "slippage must be whole basis points in 0..=10000, got {value}"
        )));
    }
    Ok(value as u16)
}

// =============================================================================
// JUP_SWAP - Quote a swap through Jupiter
// =============================================================================

#[derive(Debug)]
pub struct SwapInfoAction {
    meta: ActionMetadata,
}

impl SwapInfoAction {
    pub fn new() -> Self {
        let input_schema = json!({
            "type": "object",
            "properties": {
                "from": {
                    "type": "string",
                    "description": "Mint address of the token to sell",
                },
                "to": {
                    "type": "string",
                    "description": "Mint address of the token to buy",
                },
                "amount": {
                    "type": "number",
                    "description": "Amount of the input token, in whole units",
                },
                "slippage": {
                    "type": "number",
                    "description": "Maximum slippage in basis points",
                },
            },
            "required": ["from", "to", "amount", "slippage"],
            "additionalProperties": false,
        });

        let examples = vec![
            ActionExample {
                input: json!({
                    "from": "So11111111111111111111111111111111111111112",
                    "to": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                    "amount": 0.1,
                    "slippage": 50,
                }),
                output: json!({ "text": "0.1 SOL : 23.45 USDC" }),
                explanation: "How much USDC do I get for 0.1 SOL with 50 bps slippage".to_string(),
            },
            ActionExample {
                input: json!({
                    "from": "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263",
                    "to": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                    "amount": 100,
                    "slippage": 2,
                }),
                output: json!({ "text": "100 Bonk : 0.0021 USDC" }),
                explanation: "Swap 100 DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263 to EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v with slippage 2 bps".to_string(),
            },
        ];

        let meta = ActionMetadata {
            name: "JUP_SWAP".to_string(),
            similes: vec![
                "SWAP".to_string(),
                "SWAP__INFO".to_string(),
                "SWAP_TOKENS".to_string(),
            ],
            description: "Fetch and display swap info for provided mints and token".to_string(),
            examples,
            input_schema,
            extraction_prompt: "Extract the swap addresses, amount and slippage from the user's message. The message is: {message}\n\
                Only respond with the swap addresses, amount and slippage, follow this schema \
                {\"from\": \"So11111111111111111111111111111111111111112\", \"to\": \"EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v\", \"amount\": 200, \"slippage\": 2}, \
                mention only values, do not include any other text"
                .to_string(),
            failure_message: "Sorry, there was an error fetching the swap info.".to_string(),
        };

        Self { meta }
    }
}

impl Default for SwapInfoAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for SwapInfoAction {
    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    async fn call(&self, agent: &Agent, input: Value) -> Result<Reply> {
        #[derive(Deserialize)]
        struct Input {
            from: String,
            to: String,
            amount: f64,
            slippage: f64,
        }

        let parsed: Input = extract(input)?;
        let slippage_bps = slippage_bps(parsed.slippage)?;

        let from_token = agent.directory.lookup_token(parsed.from.trim()).await?;
        let to_token = agent.directory.lookup_token(parsed.to.trim()).await?;
        let raw_amount = ui_to_raw(parsed.amount, from_token.decimals)?;

        let quote = agent
            .quotes
            .quote(
                &from_token.mint_address,
                &to_token.mint_address,
                &raw_amount,
                slippage_bps,
            )
            .await?;
        info!(
            from = %from_token.symbol,
            to = %to_token.symbol,
            in_amount = %quote.in_amount,
            out_amount = %quote.out_amount,
            "Fetched swap quote"
        );

        Ok(Reply::new(format_swap(&quote, &from_token, &to_token)?))
    }
}

// =============================================================================
// Register swap actions
// =============================================================================

pub fn register_swap_actions(registry: &mut ActionRegistry) {
    registry.register(SwapInfoAction::new());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slippage_is_passed_through_as_basis_points() {
        assert_eq!(slippage_bps(2.0).unwrap(), 2);
        assert_eq!(slippage_bps(150.0).unwrap(), 150);
        assert_eq!(slippage_bps(0.0).unwrap(), 0);
        assert_eq!(slippage_bps(10_000.0).unwrap(), 10_000);
    }

    #[test]
    fn slippage_outside_basis_point_range_is_rejected() {
        assert!(matches!(slippage_bps(-1.0), Err(ActionError::Validation(_))));
        assert!(matches!(slippage_bps(10_001.0), Err(ActionError::Validation(_))));
        assert!(matches!(slippage_bps(0.5), Err(ActionError::Validation(_))));
        assert!(matches!(slippage_bps(f64::NAN), Err(ActionError::Validation(_))));
    }
}
