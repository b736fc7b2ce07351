// src/bin/filter_runner.rs

use anyhow::{Context, Result};
use futures::{StreamExt, stream};
use lp_guard::{
    config::Config,
    data_pipeline::{CandidatePool, scan_candidates},
    decoders::raydium::amm_v4::{load_pool_state, resolve_pool_keys},
    filtering::PoolFilters,
    monitoring::logging::setup_logging,
    rpc::{AccountFetcher, ResilientRpcClient},
};
use std::sync::Arc;
use tracing::{info, warn};

const CONCURRENT_POOLS: usize = 8;

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();

    // 1. Configuration et client résilient
    let config = Config::load().context("Chargement de la configuration")?;
    let constants = config.constants()?;
    let fetcher: Arc<dyn AccountFetcher> = Arc::new(ResilientRpcClient::from_config(&config)?);
    let filters = PoolFilters::from_config(&config, fetcher.clone());
    info!(filters = filters.len(), "Filtres enregistrés.");

    // 2. Scan des candidats
    let candidates = scan_candidates(fetcher.as_ref(), &constants)
        .await
        .context("Échec du scan des pools candidats")?;

    // 3. Résolution puis filtrage, pool par pool
    let evaluate = |candidate: CandidatePool| {
        let fetcher = fetcher.clone();
        let filters = &filters;
        async move {
            let state = load_pool_state(fetcher.as_ref(), &constants, &candidate.id).await?;
            let keys = resolve_pool_keys(fetcher.as_ref(), &constants, &candidate.id, &state).await?;
            let verdict = filters.execute(&keys, &state).await;
            Ok::<_, lp_guard::error::ResolutionError>((keys, verdict))
        }
    };

    let mut results = stream::iter(candidates).map(evaluate).buffer_unordered(CONCURRENT_POOLS);

    let mut accepted = 0usize;
    while let Some(result) = results.next().await {
        match result {
            Ok((keys, verdict)) if verdict.accepted() => {
                accepted += 1;
                println!("{}", serde_json::to_string(&keys)?);
            }
            Ok((keys, verdict)) => {
                info!(pool = %keys.id, reasons = %verdict.reason_chain(), "Pool rejeté.");
            }
            Err(e) => warn!(error = %e, "Pool non résolu."),
        }
    }

    info!(accepted, "Évaluation terminée.");
    Ok(())
}
