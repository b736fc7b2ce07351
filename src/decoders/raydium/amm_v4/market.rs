// src/decoders/raydium/amm_v4/market.rs

use crate::decoders::layout::AccountLayout;
use bytemuck::{Pod, Zeroable};
use solana_sdk::pubkey::Pubkey;
use std::mem::size_of;

/// Offset de `event_queue` dans un compte de marché OpenBook/Serum V3
/// (5 octets de padding + flags + own_address + ... + request_queue).
pub const MARKET_EVENT_QUEUE_OFFSET: usize = 253;

/// Seule la plage [event_queue, bids, asks] du marché nous intéresse.
/// On ne demande jamais le reste du compte au RPC.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Debug, PartialEq, Eq)]
pub struct MinimalMarketStateV3 {
    pub event_queue: Pubkey,
    pub bids: Pubkey,
    pub asks: Pubkey,
}

impl AccountLayout for MinimalMarketStateV3 {
    const NAME: &'static str = "MinimalMarketStateV3";
}

pub const MINIMAL_MARKET_STATE_V3_SPAN: usize = size_of::<MinimalMarketStateV3>();

const _: () = assert!(MINIMAL_MARKET_STATE_V3_SPAN == 32 * 3);
