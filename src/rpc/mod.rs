// src/rpc/mod.rs

pub mod fetcher;
pub mod resilient_client;

#[cfg(test)]
pub(crate) mod mock;

pub use fetcher::{AccountFetcher, AccountPredicate, RawAccount, TokenSupply};
pub use resilient_client::ResilientRpcClient;
