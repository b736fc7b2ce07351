// src/decoders/mod.rs

// --- Les layouts de comptes que nous savons décoder ---
pub mod layout;
pub mod raydium;
pub mod spl_token_decoders;

pub use layout::AccountLayout;
