// src/decoders/raydium/amm_v4/authority.rs

//! Dérivation des adresses "autorité" d'un pool AMM V4.
//!
//! Aucune de ces adresses n'est stockée dans un compte : elles sont calculées.
//! Le schéma est celui des Program Derived Addresses de Solana :
//! `sha256(seed_0 || ... || seed_n || program_id || "ProgramDerivedAddress")`,
//! valide seulement si le résultat n'est PAS un point de la courbe ed25519.
//!
//! - Autorité du pool : `find_program_address(["amm authority"], amm_program)`,
//!   c'est-à-dire le premier bump en partant de 255 qui donne une adresse hors courbe.
//! - Autorité du marché (vault signer) : `create_program_address([market_id, nonce_u64_le], market_program)`
//!   avec le premier nonce en partant de 0 qui donne une adresse hors courbe.

use crate::error::ResolutionError;
use solana_sdk::pubkey::{Pubkey, PubkeyError};

pub const AMM_AUTHORITY_SEED: &[u8] = b"amm authority";

/// Nombre maximal de nonces essayés pour l'autorité du marché.
pub const MAX_VAULT_SIGNER_NONCE: u64 = 100;

/// Dérive l'autorité d'un pool AMM V4 à partir de l'identifiant du programme.
pub fn amm_authority(amm_program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[AMM_AUTHORITY_SEED], amm_program_id)
}

/// Dérive l'autorité (vault signer) d'un marché OpenBook.
pub fn market_authority(
    market_program_id: &Pubkey,
    market_id: &Pubkey,
) -> Result<(Pubkey, u64), ResolutionError> {
    for nonce in 0..MAX_VAULT_SIGNER_NONCE {
        let nonce_bytes = nonce.to_le_bytes();
        match Pubkey::create_program_address(&[market_id.as_ref(), &nonce_bytes], market_program_id) {
            Ok(address) => return Ok((address, nonce)),
            // Adresse sur la courbe : on essaie le nonce suivant.
            Err(PubkeyError::InvalidSeeds) => continue,
            Err(_) => break,
        }
    }

    Err(ResolutionError::MarketAuthorityNotFound {
        market: *market_id,
        program_id: *market_program_id,
    })
}
