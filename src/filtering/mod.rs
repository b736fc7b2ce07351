// src/filtering/mod.rs

//! Le pipeline de filtres de confiance appliqué à un pool résolu.
//!
//! Chaque filtre est indépendant et ne renvoie jamais d'erreur : tout échec
//! est replié dans son `FilterOutcome`. Le pipeline lance tous les filtres en
//! parallèle, attend qu'ils aient TOUS terminé (aucune annulation sur le
//! premier échec), et n'accepte le pool que si chacun d'eux passe.

use crate::{
    config::Config,
    decoders::raydium::amm_v4::{PoolKeys, PoolState},
    rpc::AccountFetcher,
};
use async_trait::async_trait;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

pub mod burn;
pub mod renounced;

pub use burn::BurnFilter;
pub use renounced::RenouncedFilter;

/// Résultat d'un filtre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    Pass,
    /// Le contrôle a abouti et le pool ne le satisfait pas.
    Fail(String),
    /// Le contrôle n'a pas pu être mené à bien (réseau, décodage...).
    Undetermined(String),
}

impl FilterOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, FilterOutcome::Pass)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            FilterOutcome::Pass => None,
            FilterOutcome::Fail(reason) | FilterOutcome::Undetermined(reason) => Some(reason),
        }
    }
}

#[async_trait]
pub trait PoolFilter: Send + Sync {
    fn name(&self) -> &'static str;

    async fn execute(&self, keys: &PoolKeys, state: &PoolState) -> FilterOutcome;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterVerdict {
    pub filter: &'static str,
    pub passed: bool,
    pub reason: Option<String>,
    /// `true` si le filtre n'a pas pu conclure.
    pub undetermined: bool,
}

impl FilterVerdict {
    fn new(filter: &'static str, outcome: FilterOutcome) -> Self {
        Self {
            filter,
            passed: outcome.passed(),
            reason: outcome.reason().map(str::to_string),
            undetermined: matches!(outcome, FilterOutcome::Undetermined(_)),
        }
    }
}

/// Le verdict agrégé : un verdict par filtre, dans l'ordre d'enregistrement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineVerdict {
    pub verdicts: Vec<FilterVerdict>,
}

impl PipelineVerdict {
    pub fn accepted(&self) -> bool {
        self.verdicts.iter().all(|v| v.passed)
    }

    pub fn rejections(&self) -> impl Iterator<Item = &FilterVerdict> {
        self.verdicts.iter().filter(|v| !v.passed)
    }

    /// Les raisons de rejet, jointes pour les logs.
    pub fn reason_chain(&self) -> String {
        self.rejections()
            .filter_map(|v| v.reason.as_deref())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

#[derive(Default)]
pub struct PoolFilters {
    filters: Vec<Box<dyn PoolFilter>>,
}

impl PoolFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, filter: impl PoolFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Enregistre les filtres activés par la configuration.
    pub fn from_config(config: &Config, fetcher: Arc<dyn AccountFetcher>) -> Self {
        let mut filters = Self::new();
        if config.check_if_burned {
            filters = filters.with(BurnFilter::new(fetcher.clone()));
        }
        if config.check_if_mint_is_renounced {
            filters = filters.with(RenouncedFilter::new(fetcher));
        }
        filters
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub async fn execute(&self, keys: &PoolKeys, state: &PoolState) -> PipelineVerdict {
        let outcomes = join_all(self.filters.iter().map(|filter| filter.execute(keys, state))).await;

        let verdicts: Vec<FilterVerdict> = self
            .filters
            .iter()
            .zip(outcomes)
            .map(|(filter, outcome)| FilterVerdict::new(filter.name(), outcome))
            .collect();

        for verdict in verdicts.iter().filter(|v| !v.passed) {
            debug!(pool = %keys.id, filter = verdict.filter, reason = ?verdict.reason, "Filtre non passé.");
        }

        let verdict = PipelineVerdict { verdicts };
        info!(pool = %keys.id, accepted = verdict.accepted(), "Filtres évalués.");
        verdict
    }
}
