// src/decoders/raydium/amm_v4/keys.rs

use super::{
    authority::{amm_authority, market_authority},
    market::{MARKET_EVENT_QUEUE_OFFSET, MINIMAL_MARKET_STATE_V3_SPAN, MinimalMarketStateV3},
    pool::PoolState,
};
use crate::{
    config::PoolConstants,
    decoders::layout::AccountLayout,
    error::ResolutionError,
    rpc::AccountFetcher,
};
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use tracing::{debug, warn};

/// Le bot d'origine fixe les décimales du LP à 5 quel que soit le pool.
pub const LP_DECIMALS: u8 = 5;
pub const AMM_VERSION: u8 = 4;
pub const MARKET_VERSION: u8 = 3;

/// Toutes les adresses nécessaires pour décrire un pool AMM V4 tradable.
/// Construite en une fois par `resolve_pool_keys`, jamais partiellement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolKeys {
    #[serde(serialize_with = "as_base58")]
    pub id: Pubkey,
    #[serde(serialize_with = "as_base58")]
    pub base_mint: Pubkey,
    #[serde(serialize_with = "as_base58")]
    pub quote_mint: Pubkey,
    #[serde(serialize_with = "as_base58")]
    pub lp_mint: Pubkey,
    pub base_decimals: u8,
    pub quote_decimals: u8,
    pub lp_decimals: u8,
    pub version: u8,
    #[serde(serialize_with = "as_base58")]
    pub program_id: Pubkey,
    #[serde(serialize_with = "as_base58")]
    pub authority: Pubkey,
    #[serde(serialize_with = "as_base58")]
    pub open_orders: Pubkey,
    #[serde(serialize_with = "as_base58")]
    pub target_orders: Pubkey,
    #[serde(serialize_with = "as_base58")]
    pub base_vault: Pubkey,
    #[serde(serialize_with = "as_base58")]
    pub quote_vault: Pubkey,
    #[serde(serialize_with = "as_base58")]
    pub withdraw_queue: Pubkey,
    #[serde(serialize_with = "as_base58")]
    pub lp_vault: Pubkey,
    pub market_version: u8,
    #[serde(serialize_with = "as_base58")]
    pub market_program_id: Pubkey,
    #[serde(serialize_with = "as_base58")]
    pub market_id: Pubkey,
    #[serde(serialize_with = "as_base58")]
    pub market_authority: Pubkey,
    #[serde(serialize_with = "as_base58")]
    pub market_base_vault: Pubkey,
    #[serde(serialize_with = "as_base58")]
    pub market_quote_vault: Pubkey,
    #[serde(serialize_with = "as_base58")]
    pub market_bids: Pubkey,
    #[serde(serialize_with = "as_base58")]
    pub market_asks: Pubkey,
    #[serde(serialize_with = "as_base58")]
    pub market_event_queue: Pubkey,
    #[serde(serialize_with = "as_base58")]
    pub lookup_table_account: Pubkey,
}

fn as_base58<S: serde::Serializer>(key: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(key)
}

fn decimals(field: &'static str, value: u64) -> Result<u8, ResolutionError> {
    u8::try_from(value).map_err(|_| ResolutionError::InvalidDecimals { field, value })
}

/// Charge et décode l'état d'un pool candidat.
/// Le compte doit exister et appartenir au programme AMM configuré.
pub async fn load_pool_state(
    fetcher: &dyn AccountFetcher,
    constants: &PoolConstants,
    id: &Pubkey,
) -> Result<PoolState, ResolutionError> {
    let account = fetcher
        .get_account(id)
        .await?
        .ok_or(ResolutionError::AccountAbsent { address: *id })?;

    if account.owner != constants.amm_program_id {
        return Err(ResolutionError::UnexpectedOwner {
            address: *id,
            owner: account.owner,
            expected: constants.amm_program_id,
        });
    }

    Ok(PoolState::decode(&account.data)?)
}

/// Assemble les `PoolKeys` d'un pool à partir de son état décodé.
///
/// Seule la plage [event_queue, bids, asks] du marché est lue. Un marché
/// introuvable est un échec de résolution, pas un verdict négatif.
pub async fn resolve_pool_keys(
    fetcher: &dyn AccountFetcher,
    constants: &PoolConstants,
    id: &Pubkey,
    state: &PoolState,
) -> Result<PoolKeys, ResolutionError> {
    let market_id = state.market_id;
    let market_program_id = state.market_program_id;

    let market_data = match fetcher
        .get_account_slice(&market_id, MARKET_EVENT_QUEUE_OFFSET, MINIMAL_MARKET_STATE_V3_SPAN)
        .await
    {
        Ok(Some(data)) => data,
        Ok(None) => {
            warn!(pool = %id, market = %market_id, "Marché introuvable, résolution abandonnée.");
            return Err(ResolutionError::AccountAbsent { address: market_id });
        }
        Err(e) => {
            warn!(pool = %id, market = %market_id, error = %e, "Échec de lecture du marché.");
            return Err(e.into());
        }
    };
    let market = MinimalMarketStateV3::decode(&market_data)?;

    let (authority, _) = amm_authority(&constants.amm_program_id);
    let (market_authority, _) = market_authority(&market_program_id, &market_id)?;

    let keys = PoolKeys {
        id: *id,
        base_mint: state.base_mint,
        quote_mint: state.quote_mint,
        lp_mint: state.lp_mint,
        base_decimals: decimals("base_decimal", state.base_decimals())?,
        quote_decimals: decimals("quote_decimal", state.quote_decimals())?,
        lp_decimals: LP_DECIMALS,
        version: AMM_VERSION,
        program_id: constants.amm_program_id,
        authority,
        open_orders: state.open_orders,
        target_orders: state.target_orders,
        base_vault: state.base_vault,
        quote_vault: state.quote_vault,
        withdraw_queue: state.withdraw_queue,
        lp_vault: state.lp_vault,
        market_version: MARKET_VERSION,
        market_program_id,
        market_id,
        market_authority,
        market_base_vault: state.base_vault,
        market_quote_vault: state.quote_vault,
        market_bids: market.bids,
        market_asks: market.asks,
        market_event_queue: market.event_queue,
        lookup_table_account: Pubkey::default(),
    };

    debug!(pool = %id, market = %market_id, "PoolKeys résolues.");
    Ok(keys)
}
