// src/error.rs

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Erreur du codec de layouts : la taille des données ne correspond pas au layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Compte {layout} malformé : {expected} octets attendus, {actual} reçus")]
    MalformedAccount {
        layout: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Erreur remontée par un `AccountFetcher`.
/// L'absence d'un compte n'est PAS une erreur : elle est représentée par `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Erreur RPC {code}: {message}")]
    Query { code: i64, message: String },

    #[error("Délai dépassé pour la requête RPC")]
    Timeout,

    #[error("Erreur de transport: {0}")]
    Transport(String),
}

impl FetchError {
    /// Code JSON-RPC "invalid params". Le nœud le renvoie notamment pour
    /// `getTokenSupply` sur un mint qui n'existe pas.
    pub const INVALID_PARAMS: i64 = -32602;

    pub fn code(&self) -> Option<i64> {
        match self {
            FetchError::Query { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_invalid_params(&self) -> bool {
        self.code() == Some(Self::INVALID_PARAMS)
    }
}

/// Échec de la résolution d'un pool. Aucune `PoolKeys` partielle n'est exposée.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolutionError {
    #[error("Compte {address} introuvable")]
    AccountAbsent { address: Pubkey },

    #[error("Le compte {address} appartient à {owner}, {expected} attendu")]
    UnexpectedOwner {
        address: Pubkey,
        owner: Pubkey,
        expected: Pubkey,
    },

    #[error("Aucune autorité de marché trouvée pour {market} sous le programme {program_id}")]
    MarketAuthorityNotFound { market: Pubkey, program_id: Pubkey },

    #[error("Décimales invalides pour le champ {field}: {value}")]
    InvalidDecimals { field: &'static str, value: u64 },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}
