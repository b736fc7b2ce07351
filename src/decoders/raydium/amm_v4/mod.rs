// src/decoders/raydium/amm_v4/mod.rs

pub mod authority;
pub mod keys;
pub mod market;
pub mod pool;

#[cfg(test)]
mod test;

pub use authority::*;
pub use keys::*;
pub use market::*;
pub use pool::*;
