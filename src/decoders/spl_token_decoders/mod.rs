// src/decoders/spl_token_decoders/mod.rs

pub mod mint;

pub use mint::{MINT_STATE_SPAN, MintState};
