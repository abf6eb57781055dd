use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ActionError, Result};

/// Language model used to turn a user's message into action parameters.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, context: &str) -> anyhow::Result<String>;
}

/// Parse the model's answer as a JSON object.
///
/// Only the first non-empty line counts, and a surrounding markdown code
/// fence is ignored.
pub fn parse_model_output(raw: &str) -> Result<Value> {
    let line = raw
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with("```"))
        .ok_or_else(|| ActionError::Parse("empty model output".to_string()))?;

    let value: Value = serde_json::from_str(line)
        .map_err(|e| ActionError::Parse(format!("model output {line:?}: {e}")))?;
    if !value.is_object() {
        return Err(ActionError::Parse(format!("model output is not an object: {line}")));
    }
    Ok(value)
}

/// Deserialize extracted parameters into an action's input type.
pub fn extract<T: DeserializeOwned>(input: Value) -> Result<T> {
    serde_json::from_value(input).map_err(|e| ActionError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn keeps_only_the_first_line() {
        let value = parse_model_output("{\"mintAddress\": \"abc\"}\nSure, here you go!").unwrap();
        assert_eq!(value, json!({ "mintAddress": "abc" }));
    }

    #[test]
    fn skips_code_fences() {
        let value = parse_model_output("```json\n{\"amount\": 2}\n```").unwrap();
        assert_eq!(value, json!({ "amount": 2 }));
    }

    #[test]
    fn rejects_non_json_and_non_objects() {
        assert!(matches!(parse_model_output("no idea"), Err(ActionError::Parse(_))));
        assert!(matches!(parse_model_output("[1, 2]"), Err(ActionError::Parse(_))));
        assert!(matches!(parse_model_output("   \n"), Err(ActionError::Parse(_))));
    }

    #[test]
    fn missing_fields_are_validation_errors() {
        #[derive(Debug, Deserialize)]
        struct Input {
            #[allow(dead_code)]
            amount: f64,
        }

        let result = extract::<Input>(json!({ "from": "SOL" }));
        assert!(matches!(result, Err(ActionError::Validation(_))));
    }
}
