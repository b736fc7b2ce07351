// src/decoders/raydium/amm_v4/test.rs

use super::*;
use crate::{
    config::{OPENBOOK_PROGRAM_ID, PoolConstants, RAYDIUM_AMM_V4_PROGRAM_ID},
    decoders::layout::AccountLayout,
    error::{FetchError, LayoutError, ResolutionError},
    rpc::mock::MockFetcher,
};
use bytemuck::Zeroable;
use solana_sdk::{pubkey, pubkey::Pubkey};

/// Octets pseudo-aléatoires mais reproductibles.
fn noise(len: usize, seed: u64) -> Vec<u8> {
    let mut x = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
    (0..len)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x as u8
        })
        .collect()
}

fn sample_pool_state(market_id: Pubkey) -> PoolState {
    let mut state = PoolState::zeroed();
    state.status = 6;
    state.base_decimal = 9;
    state.quote_decimal = 6;
    state.base_vault = Pubkey::new_unique();
    state.quote_vault = Pubkey::new_unique();
    state.base_mint = Pubkey::new_unique();
    state.quote_mint = PoolConstants::default().quote_mint;
    state.lp_mint = Pubkey::new_unique();
    state.open_orders = Pubkey::new_unique();
    state.market_id = market_id;
    state.market_program_id = OPENBOOK_PROGRAM_ID;
    state.target_orders = Pubkey::new_unique();
    state.withdraw_queue = Pubkey::new_unique();
    state.lp_vault = Pubkey::new_unique();
    state
}

/// Un compte de marché V3 complet (388 octets) avec event_queue/bids/asks à l'offset 253.
fn market_account(event_queue: Pubkey, bids: Pubkey, asks: Pubkey) -> Vec<u8> {
    let mut data = noise(388, 42);
    let start = MARKET_EVENT_QUEUE_OFFSET;
    data[start..start + 32].copy_from_slice(event_queue.as_ref());
    data[start + 32..start + 64].copy_from_slice(bids.as_ref());
    data[start + 64..start + 96].copy_from_slice(asks.as_ref());
    data
}

// --- Codec ---

#[test]
fn pool_state_round_trips() {
    for seed in 1..8 {
        let bytes = noise(LIQUIDITY_STATE_V4_SPAN, seed);
        let state = PoolState::decode(&bytes).unwrap();
        assert_eq!(state.encode(), bytes);
    }
}

#[test]
fn market_state_round_trips() {
    let bytes = noise(MINIMAL_MARKET_STATE_V3_SPAN, 3);
    let market = MinimalMarketStateV3::decode(&bytes).unwrap();
    assert_eq!(market.encode(), bytes);
    assert_eq!(market.event_queue.as_ref(), &bytes[..32]);
    assert_eq!(market.asks.as_ref(), &bytes[64..]);
}

#[test]
fn pool_state_fields_sit_at_their_offsets() {
    let state = sample_pool_state(Pubkey::new_unique());
    let bytes = state.encode();

    assert_eq!(&bytes[QUOTE_MINT_OFFSET..QUOTE_MINT_OFFSET + 32], state.quote_mint.as_ref());
    assert_eq!(
        &bytes[MARKET_PROGRAM_ID_OFFSET..MARKET_PROGRAM_ID_OFFSET + 32],
        state.market_program_id.as_ref()
    );
    assert_eq!(&bytes[32..40], &9u64.to_le_bytes());
    assert_eq!(&bytes[40..48], &6u64.to_le_bytes());
}

#[test]
fn wrong_length_is_malformed() {
    for len in [0, LIQUIDITY_STATE_V4_SPAN - 1, LIQUIDITY_STATE_V4_SPAN + 1] {
        assert_eq!(
            PoolState::decode(&vec![0; len]),
            Err(LayoutError::MalformedAccount {
                layout: "LiquidityStateV4",
                expected: LIQUIDITY_STATE_V4_SPAN,
                actual: len,
            })
        );
    }
    assert!(matches!(
        MinimalMarketStateV3::decode(&[0; 95]),
        Err(LayoutError::MalformedAccount { expected: 96, actual: 95, .. })
    ));
}

// --- Dérivation ---

#[test]
fn amm_authority_matches_mainnet() {
    let (authority, _) = amm_authority(&RAYDIUM_AMM_V4_PROGRAM_ID);
    assert_eq!(authority, pubkey!("5Q544fKrFoe6tsEbD7S8EmxGTJYAKtTVhAW5Q5pge4j1"));
}

#[test]
fn derivation_is_deterministic() {
    let market = Pubkey::new_unique();
    assert_eq!(amm_authority(&RAYDIUM_AMM_V4_PROGRAM_ID), amm_authority(&RAYDIUM_AMM_V4_PROGRAM_ID));
    assert_eq!(
        market_authority(&OPENBOOK_PROGRAM_ID, &market).unwrap(),
        market_authority(&OPENBOOK_PROGRAM_ID, &market).unwrap()
    );
}

#[test]
fn distinct_inputs_give_distinct_authorities() {
    let programs: Vec<Pubkey> = (0..16).map(|_| Pubkey::new_unique()).collect();
    let mut authorities: Vec<Pubkey> = programs.iter().map(|p| amm_authority(p).0).collect();
    authorities.sort();
    authorities.dedup();
    assert_eq!(authorities.len(), programs.len());

    let market_a = Pubkey::new_unique();
    let market_b = Pubkey::new_unique();
    assert_ne!(
        market_authority(&OPENBOOK_PROGRAM_ID, &market_a).unwrap().0,
        market_authority(&OPENBOOK_PROGRAM_ID, &market_b).unwrap().0
    );
}

#[test]
fn market_authority_uses_first_valid_nonce() {
    let market = Pubkey::new_unique();
    let (authority, nonce) = market_authority(&OPENBOOK_PROGRAM_ID, &market).unwrap();
    let expected =
        Pubkey::create_program_address(&[market.as_ref(), &nonce.to_le_bytes()], &OPENBOOK_PROGRAM_ID).unwrap();
    assert_eq!(authority, expected);
    for lower in 0..nonce {
        assert!(
            Pubkey::create_program_address(&[market.as_ref(), &lower.to_le_bytes()], &OPENBOOK_PROGRAM_ID)
                .is_err()
        );
    }
}

// --- Résolution ---

#[tokio::test]
async fn resolves_market_addresses_from_slice() {
    let market_id = Pubkey::new_unique();
    let (event_queue, bids, asks) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
    let fetcher =
        MockFetcher::new().with_account(market_id, OPENBOOK_PROGRAM_ID, market_account(event_queue, bids, asks));
    let constants = PoolConstants::default();
    let id = Pubkey::new_unique();
    let state = sample_pool_state(market_id);

    let keys = resolve_pool_keys(&fetcher, &constants, &id, &state).await.unwrap();

    assert_eq!(keys.market_event_queue, event_queue);
    assert_eq!(keys.market_bids, bids);
    assert_eq!(keys.market_asks, asks);
    assert_eq!(keys.id, id);
    assert_eq!(keys.base_mint, state.base_mint);
    assert_eq!(keys.lp_mint, state.lp_mint);
    assert_eq!(keys.base_vault, state.base_vault);
    assert_eq!(keys.market_base_vault, state.base_vault);
    assert_eq!(keys.market_quote_vault, state.quote_vault);
    assert_eq!(keys.withdraw_queue, state.withdraw_queue);
    assert_eq!((keys.base_decimals, keys.quote_decimals, keys.lp_decimals), (9, 6, LP_DECIMALS));
    assert_eq!(keys.authority, amm_authority(&constants.amm_program_id).0);
    assert_eq!(keys.market_authority, market_authority(&OPENBOOK_PROGRAM_ID, &market_id).unwrap().0);
    assert_eq!(keys.lookup_table_account, Pubkey::default());
}

#[tokio::test]
async fn missing_market_aborts_resolution() {
    let market_id = Pubkey::new_unique();
    let state = sample_pool_state(market_id);

    let result =
        resolve_pool_keys(&MockFetcher::new(), &PoolConstants::default(), &Pubkey::new_unique(), &state).await;

    assert_eq!(result, Err(ResolutionError::AccountAbsent { address: market_id }));
}

#[tokio::test]
async fn market_fetch_error_aborts_resolution() {
    let market_id = Pubkey::new_unique();
    let fetcher = MockFetcher::new().with_account_error(market_id, FetchError::Timeout);
    let state = sample_pool_state(market_id);

    let result = resolve_pool_keys(&fetcher, &PoolConstants::default(), &Pubkey::new_unique(), &state).await;

    assert_eq!(result, Err(ResolutionError::Fetch(FetchError::Timeout)));
}

#[tokio::test]
async fn truncated_market_is_malformed() {
    let market_id = Pubkey::new_unique();
    // Le compte s'arrête au milieu de `asks` : la tranche renvoyée est trop courte.
    let fetcher = MockFetcher::new().with_account(market_id, OPENBOOK_PROGRAM_ID, vec![1; 300]);
    let state = sample_pool_state(market_id);

    let result = resolve_pool_keys(&fetcher, &PoolConstants::default(), &Pubkey::new_unique(), &state).await;

    assert!(matches!(result, Err(ResolutionError::Layout(LayoutError::MalformedAccount { actual: 47, .. }))));
}

#[tokio::test]
async fn oversized_decimals_are_rejected() {
    let market_id = Pubkey::new_unique();
    let fetcher = MockFetcher::new().with_account(
        market_id,
        OPENBOOK_PROGRAM_ID,
        market_account(Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique()),
    );
    let mut state = sample_pool_state(market_id);
    state.base_decimal = 300;

    let result = resolve_pool_keys(&fetcher, &PoolConstants::default(), &Pubkey::new_unique(), &state).await;

    assert_eq!(result, Err(ResolutionError::InvalidDecimals { field: "base_decimal", value: 300 }));
}

#[tokio::test]
async fn loads_pool_state_owned_by_amm() {
    let id = Pubkey::new_unique();
    let state = sample_pool_state(Pubkey::new_unique());
    let fetcher = MockFetcher::new().with_account(id, RAYDIUM_AMM_V4_PROGRAM_ID, state.encode());

    let loaded = load_pool_state(&fetcher, &PoolConstants::default(), &id).await.unwrap();

    assert_eq!(loaded, state);
}

#[tokio::test]
async fn load_rejects_foreign_or_missing_accounts() {
    let constants = PoolConstants::default();
    let id = Pubkey::new_unique();
    let owner = Pubkey::new_unique();
    let state = sample_pool_state(Pubkey::new_unique());
    let fetcher = MockFetcher::new().with_account(id, owner, state.encode());

    assert_eq!(
        load_pool_state(&fetcher, &constants, &id).await,
        Err(ResolutionError::UnexpectedOwner { address: id, owner, expected: constants.amm_program_id })
    );

    let missing = Pubkey::new_unique();
    assert_eq!(
        load_pool_state(&fetcher, &constants, &missing).await,
        Err(ResolutionError::AccountAbsent { address: missing })
    );
}

#[test]
fn pool_keys_serialize_as_base58() {
    let state = sample_pool_state(Pubkey::new_unique());
    let (authority, _) = amm_authority(&RAYDIUM_AMM_V4_PROGRAM_ID);
    let keys = PoolKeys {
        id: Pubkey::default(),
        base_mint: state.base_mint,
        quote_mint: state.quote_mint,
        lp_mint: state.lp_mint,
        base_decimals: 9,
        quote_decimals: 6,
        lp_decimals: LP_DECIMALS,
        version: AMM_VERSION,
        program_id: RAYDIUM_AMM_V4_PROGRAM_ID,
        authority,
        open_orders: state.open_orders,
        target_orders: state.target_orders,
        base_vault: state.base_vault,
        quote_vault: state.quote_vault,
        withdraw_queue: state.withdraw_queue,
        lp_vault: state.lp_vault,
        market_version: MARKET_VERSION,
        market_program_id: OPENBOOK_PROGRAM_ID,
        market_id: state.market_id,
        market_authority: Pubkey::default(),
        market_base_vault: state.base_vault,
        market_quote_vault: state.quote_vault,
        market_bids: Pubkey::default(),
        market_asks: Pubkey::default(),
        market_event_queue: Pubkey::default(),
        lookup_table_account: Pubkey::default(),
    };

    let json = serde_json::to_value(&keys).unwrap();

    assert_eq!(json["authority"], "5Q544fKrFoe6tsEbD7S8EmxGTJYAKtTVhAW5Q5pge4j1");
    assert_eq!(json["programId"], RAYDIUM_AMM_V4_PROGRAM_ID.to_string());
    assert_eq!(json["lpDecimals"], 5);
}
