// src/filtering/renounced.rs

use super::{FilterOutcome, PoolFilter};
use crate::{
    decoders::{
        raydium::amm_v4::{PoolKeys, PoolState},
        spl_token_decoders::MintState,
    },
    rpc::AccountFetcher,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Vérifie que l'autorité de mint du token de base a été révoquée.
pub struct RenouncedFilter {
    fetcher: Arc<dyn AccountFetcher>,
}

impl RenouncedFilter {
    pub fn new(fetcher: Arc<dyn AccountFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl PoolFilter for RenouncedFilter {
    fn name(&self) -> &'static str {
        "renounced"
    }

    async fn execute(&self, _keys: &PoolKeys, state: &PoolState) -> FilterOutcome {
        let base_mint = state.base_mint;

        let account = match self.fetcher.get_account(&base_mint).await {
            Ok(Some(account)) => account,
            Ok(None) => {
                return FilterOutcome::Fail("Renounced -> Failed to fetch account data".to_string());
            }
            Err(e) => {
                debug!(mint = %base_mint, error = %e, "Échec de lecture du mint.");
                return FilterOutcome::Undetermined(format!(
                    "Renounced -> Failed to check if mint is renounced: {}",
                    e
                ));
            }
        };

        match MintState::decode_base(&account.data) {
            Ok(mint) if mint.is_mint_renounced() => FilterOutcome::Pass,
            Ok(_) => FilterOutcome::Fail("Renounced -> Creator can mint more tokens".to_string()),
            Err(e) => {
                debug!(mint = %base_mint, error = %e, "Mint indécodable.");
                FilterOutcome::Undetermined(format!("Renounced -> Failed to check if mint is renounced: {}", e))
            }
        }
    }
}
