// src/filtering/burn.rs

use super::{FilterOutcome, PoolFilter};
use crate::{
    decoders::raydium::amm_v4::{PoolKeys, PoolState},
    rpc::AccountFetcher,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Vérifie que la totalité du LP a été brûlée (supply nulle) :
/// le créateur ne peut alors plus retirer la liquidité.
pub struct BurnFilter {
    fetcher: Arc<dyn AccountFetcher>,
}

impl BurnFilter {
    pub fn new(fetcher: Arc<dyn AccountFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl PoolFilter for BurnFilter {
    fn name(&self) -> &'static str {
        "burn"
    }

    async fn execute(&self, keys: &PoolKeys, _state: &PoolState) -> FilterOutcome {
        match self.fetcher.get_token_supply(&keys.lp_mint).await {
            Ok(supply) if supply.ui_amount == 0.0 => FilterOutcome::Pass,
            Ok(_) => FilterOutcome::Fail("Burned -> Creator didn't burn LP".to_string()),
            // "invalid params" : le mint LP n'existe pas.
            Err(e) if e.is_invalid_params() => FilterOutcome::Pass,
            Err(e) => {
                debug!(mint = %keys.base_mint, error = %e, "Échec de la vérification du burn LP.");
                FilterOutcome::Undetermined(format!("Burned -> Failed to check if LP is burned: {}", e))
            }
        }
    }
}
