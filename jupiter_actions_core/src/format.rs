//! Pure rendering and unit conversion helpers.

use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::directory::TokenDescriptor;
use crate::error::{ActionError, Result};
use crate::quote::SwapQuote;

/// Convert an amount in smallest units to display units.
pub fn raw_to_ui(raw_amount: u64, decimals: u8) -> f64 {
    raw_amount as f64 / 10f64.powi(i32::from(decimals))
}

/// Convert a display amount to smallest units, truncating any digits beyond
/// `decimals`.
pub fn ui_to_raw(amount: f64, decimals: u8) -> Result<String> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ActionError::Validation(format!("invalid token amount: {amount}")));
    }
    let scale = 10u64
        .checked_pow(u32::from(decimals))
        .ok_or_else(|| ActionError::Validation(format!("unsupported decimals: {decimals}")))?;
    let amount = BigDecimal::from_str(&amount.to_string())
        .map_err(|e| ActionError::Parse(format!("amount {amount}: {e}")))?;

    let (raw, _) = (amount * BigDecimal::from(scale))
        .with_scale(0)
        .into_bigint_and_exponent();
    Ok(raw.to_string())
}

fn parse_raw(amount: &str) -> Result<u64> {
    amount
        .trim()
        .parse::<u64>()
        .map_err(|e| ActionError::Parse(format!("raw amount {amount:?}: {e}")))
}

/// Render a quote as `"<in> <FROM> : <out> <TO>"`.
pub fn format_swap(quote: &SwapQuote, from: &TokenDescriptor, to: &TokenDescriptor) -> Result<String> {
    let in_amount = raw_to_ui(parse_raw(&quote.in_amount)?, from.decimals);
    let out_amount = raw_to_ui(parse_raw(&quote.out_amount)?, to.decimals);
    Ok(format!(
        "{} {} : {} {}",
        in_amount, from.symbol, out_amount, to.symbol
    ))
}

/// Multi-line description of a token for chat replies.
pub fn format_token_info(token: &TokenDescriptor) -> String {
    let tags = if token.tags.is_empty() {
        "none".to_string()
    } else {
        token.tags.join(", ")
    };

    [
        format!("🔹 Name: {} ({})", token.name, token.symbol),
        format!("🔹 Address: {}", token.mint_address),
        format!("🔹 Decimals: {}", token.decimals),
        format!("🔹 Daily Volume: {}", group_thousands(token.daily_volume)),
        format!(
            "🔹 Created At: {}",
            token.created_at.format("%-m/%-d/%Y, %-I:%M:%S %p UTC")
        ),
        format!("🔹 Tags: {}", tags),
        format!("🔹 Logo: {}", token.logo_url),
        format!(
            "🔹 CoinGecko ID: {}",
            token.coingecko_id.as_deref().unwrap_or("n/a")
        ),
    ]
    .join("\n")
}

/// One side of a peer-to-peer trade.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeLeg {
    pub token: String,
    pub amount: f64,
    pub wallet: String,
    pub sufficient: bool,
}

pub fn format_trade(maker: &TradeLeg, taker: &TradeLeg) -> String {
    let mut text = format!(
        "Swap {} {} from {} to {} {} to {}",
        maker.amount,
        maker.token.to_uppercase(),
        maker.wallet,
        taker.amount,
        taker.token.to_uppercase(),
        taker.wallet,
    );

    if maker.sufficient && taker.sufficient {
        text.push_str("\nBoth wallets hold sufficient balances.");
        return text;
    }
    for leg in [maker, taker].into_iter().filter(|leg| !leg.sufficient) {
        text.push_str(&format!(
            "\n{} does not hold {} {}.",
            leg.wallet,
            leg.amount,
            leg.token.to_uppercase()
        ));
    }
    text
}

/// `1234567.891` -> `"1,234,567.891"`; at most three fraction digits.
pub fn group_thousands(value: f64) -> String {
    let formatted = format!("{:.3}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}
