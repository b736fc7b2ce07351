// src/decoders/spl_token_decoders/mint.rs

use crate::decoders::layout::AccountLayout;
use bytemuck::{Pod, Zeroable};
use solana_sdk::pubkey::Pubkey;
use std::mem::size_of;

// --- LAYOUT DU MINT SPL (82 octets) ---
// Les options COption sont encodées sur 4 octets : 0 = None, 1 = Some.
// Un mint Token-2022 commence par ces mêmes 82 octets, suivis des extensions.
#[repr(C, packed)]
#[derive(Clone, Copy, Pod, Zeroable, Debug, PartialEq)]
pub struct MintState {
    pub mint_authority_option: u32,
    pub mint_authority: Pubkey,
    pub supply: u64,
    pub decimals: u8,
    pub is_initialized: u8,
    pub freeze_authority_option: u32,
    pub freeze_authority: Pubkey,
}

impl AccountLayout for MintState {
    const NAME: &'static str = "MintState";
}

pub const MINT_STATE_SPAN: usize = size_of::<MintState>();

const _: () = assert!(MINT_STATE_SPAN == 82);

impl MintState {
    /// `true` si l'autorité de mint a été révoquée.
    pub fn is_mint_renounced(&self) -> bool {
        let option = self.mint_authority_option;
        option == 0
    }

    pub fn mint_authority(&self) -> Option<Pubkey> {
        (!self.is_mint_renounced()).then_some(self.mint_authority)
    }

    pub fn freeze_authority(&self) -> Option<Pubkey> {
        let option = self.freeze_authority_option;
        (option != 0).then_some(self.freeze_authority)
    }

    /// Décode la partie de base d'un compte de mint (SPL Token ou Token-2022).
    /// Les données doivent contenir au moins `MINT_STATE_SPAN` octets.
    /// Seul le préfixe de base est lu : le type de compte et les extensions
    /// Token-2022 ne sont pas validés.
    pub fn decode_base(data: &[u8]) -> Result<Self, crate::error::LayoutError> {
        let base = data.get(..MINT_STATE_SPAN).unwrap_or(data);
        Self::decode(base)
    }
}
