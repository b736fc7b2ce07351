// src/rpc/mock.rs

// Un faux ledger en mémoire pour les tests.

use super::fetcher::{AccountFetcher, AccountPredicate, RawAccount, TokenSupply};
use crate::error::FetchError;
use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use std::collections::HashMap;

#[derive(Default)]
pub struct MockFetcher {
    accounts: HashMap<Pubkey, RawAccount>,
    supplies: HashMap<Pubkey, Result<TokenSupply, FetchError>>,
    account_errors: HashMap<Pubkey, FetchError>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, address: Pubkey, owner: Pubkey, data: Vec<u8>) -> Self {
        self.accounts.insert(address, RawAccount { owner, data });
        self
    }

    pub fn with_supply(mut self, mint: Pubkey, supply: Result<TokenSupply, FetchError>) -> Self {
        self.supplies.insert(mint, supply);
        self
    }

    pub fn with_account_error(mut self, address: Pubkey, error: FetchError) -> Self {
        self.account_errors.insert(address, error);
        self
    }

    fn lookup(&self, address: &Pubkey) -> Result<Option<&RawAccount>, FetchError> {
        if let Some(error) = self.account_errors.get(address) {
            return Err(error.clone());
        }
        Ok(self.accounts.get(address))
    }
}

#[async_trait]
impl AccountFetcher for MockFetcher {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<RawAccount>, FetchError> {
        Ok(self.lookup(address)?.cloned())
    }

    async fn get_account_slice(
        &self,
        address: &Pubkey,
        offset: usize,
        length: usize,
    ) -> Result<Option<Vec<u8>>, FetchError> {
        // Comme le RPC : une tranche hors limites est tronquée, pas une erreur.
        Ok(self.lookup(address)?.map(|account| {
            account
                .data
                .iter()
                .skip(offset)
                .take(length)
                .copied()
                .collect()
        }))
    }

    async fn get_token_supply(&self, mint: &Pubkey) -> Result<TokenSupply, FetchError> {
        self.supplies.get(mint).cloned().unwrap_or(Err(FetchError::Query {
            code: FetchError::INVALID_PARAMS,
            message: "Invalid param: could not find mint".to_string(),
        }))
    }

    async fn query_accounts_by_filter(
        &self,
        program_id: &Pubkey,
        predicates: &[AccountPredicate],
    ) -> Result<Vec<Pubkey>, FetchError> {
        let mut matches: Vec<Pubkey> = self
            .accounts
            .iter()
            .filter(|(_, account)| account.owner == *program_id)
            .filter(|(_, account)| predicates.iter().all(|p| p.matches(&account.data)))
            .map(|(address, _)| *address)
            .collect();
        matches.sort();
        Ok(matches)
    }
}
