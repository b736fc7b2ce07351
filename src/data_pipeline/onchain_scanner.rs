// src/data_pipeline/onchain_scanner.rs

use crate::{
    config::PoolConstants,
    decoders::raydium::amm_v4::{AMM_VERSION, LIQUIDITY_STATE_V4_SPAN, MARKET_PROGRAM_ID_OFFSET, QUOTE_MINT_OFFSET},
    error::FetchError,
    rpc::{AccountFetcher, AccountPredicate},
};
use solana_sdk::pubkey::Pubkey;
use tracing::info;

/// Identité minimale d'un pool candidat, sans ses données.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidatePool {
    pub id: Pubkey,
    pub version: u8,
    pub program_id: Pubkey,
}

/// Le résultat d'un scan : une photo à un instant donné, consommée une seule fois.
/// Pour un nouvel état du ledger, il faut relancer un scan.
#[derive(Debug)]
pub struct Candidates {
    program_id: Pubkey,
    ids: std::vec::IntoIter<Pubkey>,
}

impl Iterator for Candidates {
    type Item = CandidatePool;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|id| CandidatePool {
            id,
            version: AMM_VERSION,
            program_id: self.program_id,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl ExactSizeIterator for Candidates {}

/// Les trois prédicats (conjonctifs) envoyés au RPC :
/// taille exacte d'un pool V4, quote mint attendu, programme de marché attendu.
pub fn candidate_predicates(constants: &PoolConstants) -> Vec<AccountPredicate> {
    vec![
        AccountPredicate::DataSize(LIQUIDITY_STATE_V4_SPAN as u64),
        AccountPredicate::memcmp(QUOTE_MINT_OFFSET, constants.quote_mint),
        AccountPredicate::memcmp(MARKET_PROGRAM_ID_OFFSET, constants.market_program_id),
    ]
}

/// Scanne le programme AMM pour les pools cotés dans le quote mint configuré.
/// Aucune donnée de compte n'est transférée : seules les adresses reviennent.
pub async fn scan_candidates(
    fetcher: &dyn AccountFetcher,
    constants: &PoolConstants,
) -> Result<Candidates, FetchError> {
    let predicates = candidate_predicates(constants);
    let ids = fetcher
        .query_accounts_by_filter(&constants.amm_program_id, &predicates)
        .await?;

    info!(
        program = %constants.amm_program_id,
        quote_mint = %constants.quote_mint,
        count = ids.len(),
        "Scan on-chain terminé."
    );

    Ok(Candidates {
        program_id: constants.amm_program_id,
        ids: ids.into_iter(),
    })
}
