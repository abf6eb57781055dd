use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::agent::Agent;
use crate::model::parse_model_output;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionExample {
    pub input: Value,
    pub output: Value,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionMetadata {
    pub name: String,
    pub similes: Vec<String>,
    pub description: String,
    pub examples: Vec<ActionExample>,
    pub input_schema: Value,
    /// Prompt sent to the language model; `{message}` is replaced with the
    /// user's text.
    pub extraction_prompt: String,
    /// Reply sent when anything in the handler fails.
    pub failure_message: String,
}

impl ActionMetadata {
    pub fn prompt_for(&self, message: &str) -> String {
        self.extraction_prompt.replace("{message}", message)
    }
}

/// Text delivered back to the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
}

impl Reply {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
pub trait ReplyCallback: Send + Sync {
    async fn send(&self, reply: Reply) -> Result<()>;
}

#[async_trait]
pub trait Action: Send + Sync {
    fn metadata(&self) -> &ActionMetadata;

    async fn call(&self, agent: &Agent, input: Value) -> Result<Reply>;
}

#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Arc<dyn Action>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    pub fn register<A>(&mut self, action: A)
    where
        A: Action + 'static,
    {
        let action = Arc::new(action) as Arc<dyn Action>;
        let name = action.metadata().name.clone();
        self.actions.insert(name, action);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Action>> {
        self.actions.get(name).cloned()
    }

    /// Execute an action by name with already extracted JSON input.
    pub async fn execute(
        &self,
        name: &str,
        agent: &Agent,
        input: Value,
    ) -> Result<Reply> {
        let action = self
            .get(name)
            .ok_or_else(|| anyhow!("Unknown action: {name}"))?;
        action.call(agent, input).await
    }

    /// Handle a free-form user message: extract parameters through the
    /// agent's language model, run the action and deliver the reply.
    ///
    /// Failures inside the action are reported to the user with the action's
    /// generic failure message; only an unknown action name or a failing
    /// callback is returned as an error.
    pub async fn handle_message(
        &self,
        name: &str,
        agent: &Agent,
        message: &str,
        callback: &dyn ReplyCallback,
    ) -> Result<bool> {
        let action = self
            .get(name)
            .ok_or_else(|| anyhow!("Unknown action: {name}"))?;
        let meta = action.metadata();

        let outcome = async {
            let generated = agent.model.generate_text(&meta.prompt_for(message)).await?;
            debug!(action = %meta.name, output = %generated, "Model extracted parameters");
            let input = parse_model_output(&generated)?;
            let reply = action.call(agent, input).await?;
            Ok::<_, anyhow::Error>(reply)
        }
        .await;

        let reply = match outcome {
            Ok(reply) => reply,
            Err(e) => {
                warn!(action = %meta.name, error = %e, "Action failed");
                Reply::new(meta.failure_message.clone())
            }
        };

        callback.send(reply).await?;
        Ok(true)
    }

    /// Return metadata for all registered actions (useful for AI tool schemas).
    pub fn metadata(&self) -> Vec<ActionMetadata> {
        self.actions
            .values()
            .map(|a| a.metadata().clone())
            .collect()
    }
}
