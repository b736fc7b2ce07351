// src/decoders/raydium/amm_v4/pool.rs

use crate::decoders::layout::AccountLayout;
use bytemuck::{Pod, Zeroable};
use solana_sdk::pubkey::Pubkey;
use std::mem::{offset_of, size_of};

// --- STRUCTURE DE DONNÉES BRUTES (Miroir exact du compte AmmInfo V4) ---
// 752 octets. Les champs `u64`/`u128` ne sont pas alignés dans le compte,
// d'où le `packed` : ne jamais prendre de référence sur ces champs, les copier.
#[repr(C, packed)]
#[derive(Clone, Copy, Pod, Zeroable, Debug, PartialEq)]
pub struct LiquidityStateV4 {
    pub status: u64,
    pub nonce: u64,
    pub max_order: u64,
    pub depth: u64,
    pub base_decimal: u64,
    pub quote_decimal: u64,
    pub state: u64,
    pub reset_flag: u64,
    pub min_size: u64,
    pub vol_max_cut_ratio: u64,
    pub amount_wave_ratio: u64,
    pub base_lot_size: u64,
    pub quote_lot_size: u64,
    pub min_price_multiplier: u64,
    pub max_price_multiplier: u64,
    pub system_decimal_value: u64,
    // Fees
    pub min_separate_numerator: u64,
    pub min_separate_denominator: u64,
    pub trade_fee_numerator: u64,
    pub trade_fee_denominator: u64,
    pub pnl_numerator: u64,
    pub pnl_denominator: u64,
    pub swap_fee_numerator: u64,
    pub swap_fee_denominator: u64,
    // OutPutData
    pub base_need_take_pnl: u64,
    pub quote_need_take_pnl: u64,
    pub quote_total_pnl: u64,
    pub base_total_pnl: u64,
    pub pool_open_time: u64,
    pub punish_pc_amount: u64,
    pub punish_coin_amount: u64,
    pub orderbook_to_init_time: u64,
    pub swap_base_in_amount: u128,
    pub swap_quote_out_amount: u128,
    pub swap_base2_quote_fee: u64,
    pub swap_quote_in_amount: u128,
    pub swap_base_out_amount: u128,
    pub swap_quote2_base_fee: u64,
    // Comptes
    pub base_vault: Pubkey,
    pub quote_vault: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub lp_mint: Pubkey,
    pub open_orders: Pubkey,
    pub market_id: Pubkey,
    pub market_program_id: Pubkey,
    pub target_orders: Pubkey,
    pub withdraw_queue: Pubkey,
    pub lp_vault: Pubkey,
    pub owner: Pubkey,
    pub lp_reserve: u64,
    pub padding: [u64; 3],
}

/// Alias lisible : l'état décodé d'un pool AMM V4.
pub type PoolState = LiquidityStateV4;

impl AccountLayout for LiquidityStateV4 {
    const NAME: &'static str = "LiquidityStateV4";
}

pub const LIQUIDITY_STATE_V4_SPAN: usize = size_of::<LiquidityStateV4>();
pub const QUOTE_MINT_OFFSET: usize = offset_of!(LiquidityStateV4, quote_mint);
pub const MARKET_PROGRAM_ID_OFFSET: usize = offset_of!(LiquidityStateV4, market_program_id);

const _: () = assert!(LIQUIDITY_STATE_V4_SPAN == 752);
const _: () = assert!(QUOTE_MINT_OFFSET == 432);
const _: () = assert!(MARKET_PROGRAM_ID_OFFSET == 560);

impl LiquidityStateV4 {
    pub fn base_decimals(&self) -> u64 {
        self.base_decimal
    }

    pub fn quote_decimals(&self) -> u64 {
        self.quote_decimal
    }
}
