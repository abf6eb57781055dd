use std::sync::Arc;

use crate::balance::BalanceResolver;
use crate::config::Config;
use crate::directory::{JupiterTokenClient, TokenDirectory};
use crate::error::Result;
use crate::model::TextGenerator;
use crate::quote::{JupiterQuoteClient, QuoteSource};
use crate::rpc::{ChainReader, RpcChainReader};

/// Collaborators shared by every action. Built once and passed explicitly.
#[derive(Clone)]
pub struct Agent {
    pub chain: Arc<dyn ChainReader>,
    pub directory: Arc<dyn TokenDirectory>,
    pub quotes: Arc<dyn QuoteSource>,
    pub model: Arc<dyn TextGenerator>,
}

impl Agent {
    pub fn new(config: &Config, model: Arc<dyn TextGenerator>) -> Result<Self> {
        Ok(Self {
            chain: Arc::new(RpcChainReader::new(&config.rpc_url)),
            directory: Arc::new(JupiterTokenClient::new(&config.token_api_url)?),
            quotes: Arc::new(JupiterQuoteClient::new(&config.quote_api_url)?),
            model,
        })
    }

    pub fn from_parts(
        chain: Arc<dyn ChainReader>,
        directory: Arc<dyn TokenDirectory>,
        quotes: Arc<dyn QuoteSource>,
        model: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            chain,
            directory,
            quotes,
            model,
        }
    }

    pub fn balance_resolver(&self) -> BalanceResolver {
        BalanceResolver::new(self.chain.clone(), self.directory.clone())
    }
}
