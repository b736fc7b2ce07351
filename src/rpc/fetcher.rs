// src/rpc/fetcher.rs

use crate::error::FetchError;
use async_trait::async_trait;
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_sdk::pubkey::Pubkey;

/// Un compte brut tel que renvoyé par le ledger.
/// Son existence est portée par l'`Option` qui l'entoure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAccount {
    pub owner: Pubkey,
    pub data: Vec<u8>,
}

/// Supply d'un mint telle que renvoyée par `getTokenSupply`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenSupply {
    pub amount: u64,
    pub decimals: u8,
    pub ui_amount: f64,
}

impl TokenSupply {
    pub fn from_raw(amount: u64, decimals: u8) -> Self {
        Self {
            amount,
            decimals,
            ui_amount: amount as f64 / 10f64.powi(decimals as i32),
        }
    }
}

/// Prédicat évalué côté serveur lors d'un scan de comptes de programme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountPredicate {
    /// La taille totale du compte doit être exactement celle-ci.
    DataSize(u64),
    /// Les octets à `offset` doivent être exactement `bytes`.
    Memcmp { offset: usize, bytes: Vec<u8> },
}

impl AccountPredicate {
    pub fn memcmp(offset: usize, bytes: impl AsRef<[u8]>) -> Self {
        AccountPredicate::Memcmp {
            offset,
            bytes: bytes.as_ref().to_vec(),
        }
    }

    /// Évaluation locale, identique à celle du nœud RPC.
    pub fn matches(&self, data: &[u8]) -> bool {
        match self {
            AccountPredicate::DataSize(size) => data.len() as u64 == *size,
            AccountPredicate::Memcmp { offset, bytes } => offset
                .checked_add(bytes.len())
                .and_then(|end| data.get(*offset..end))
                .is_some_and(|slice| slice == bytes.as_slice()),
        }
    }

    pub fn to_rpc_filter(&self) -> RpcFilterType {
        match self {
            AccountPredicate::DataSize(size) => RpcFilterType::DataSize(*size),
            AccountPredicate::Memcmp { offset, bytes } => {
                RpcFilterType::Memcmp(Memcmp::new_base58_encoded(*offset, bytes))
            }
        }
    }
}

/// Le contrat attendu du client du ledger.
///
/// Les ré-essais, timeouts et la gestion de connexion relèvent de
/// l'implémentation ; le reste de la crate ne voit que ces quatre opérations.
#[async_trait]
pub trait AccountFetcher: Send + Sync {
    /// Récupère un compte complet, `None` s'il n'existe pas.
    async fn get_account(&self, address: &Pubkey) -> Result<Option<RawAccount>, FetchError>;

    /// Récupère seulement `length` octets à partir de `offset`.
    async fn get_account_slice(
        &self,
        address: &Pubkey,
        offset: usize,
        length: usize,
    ) -> Result<Option<Vec<u8>>, FetchError>;

    async fn get_token_supply(&self, mint: &Pubkey) -> Result<TokenSupply, FetchError>;

    /// Adresses des comptes du programme qui satisfont TOUS les prédicats.
    async fn query_accounts_by_filter(
        &self,
        program_id: &Pubkey,
        predicates: &[AccountPredicate],
    ) -> Result<Vec<Pubkey>, FetchError>;
}
