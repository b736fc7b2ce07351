// src/rpc/resilient_client.rs

use super::fetcher::{AccountFetcher, AccountPredicate, RawAccount, TokenSupply};
use crate::{config::Config, error::FetchError};
use anyhow::Result;
use async_trait::async_trait;
use solana_account_decoder::{UiAccountEncoding, UiDataSliceConfig};
use solana_client::{
    client_error::{ClientError, ClientErrorKind, Result as ClientResult},
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
    rpc_request::RpcError,
};
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use std::{future::Future, sync::Arc, time::Duration};
use tokio::time::sleep;
use tracing::debug;

/// Un "wrapper" autour du RpcClient de Solana qui ajoute une logique de
/// ré-essai automatique pour les erreurs réseau temporaires, et qui implémente
/// le contrat `AccountFetcher`.
#[derive(Clone)]
pub struct ResilientRpcClient {
    client: Arc<RpcClient>,
    max_retries: u8,
    delay_ms: u64,
}

impl ResilientRpcClient {
    pub fn new(rpc_url: String, commitment: CommitmentConfig, max_retries: u8, delay_ms: u64) -> Self {
        Self {
            client: Arc::new(RpcClient::new_with_commitment(rpc_url, commitment)),
            max_retries,
            delay_ms,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            config.solana_rpc_url.clone(),
            config.commitment_config()?,
            config.rpc_max_retries,
            config.rpc_retry_delay_ms,
        ))
    }

    pub fn commitment(&self) -> CommitmentConfig {
        self.client.commitment()
    }

    /// Détermine si une erreur du client est temporaire.
    /// Une réponse d'erreur JSON-RPC (avec un code) est définitive.
    fn is_retryable(error: &ClientError) -> bool {
        match error.kind() {
            ClientErrorKind::RpcError(RpcError::RpcResponseError { .. }) => false,
            ClientErrorKind::Reqwest(_) | ClientErrorKind::RpcError(_) | ClientErrorKind::Io(_) => true,
            _ => false,
        }
    }

    fn classify(error: ClientError) -> FetchError {
        match error.kind() {
            ClientErrorKind::RpcError(RpcError::RpcResponseError { code, message, .. }) => FetchError::Query {
                code: *code,
                message: message.clone(),
            },
            ClientErrorKind::Reqwest(e) if e.is_timeout() => FetchError::Timeout,
            _ => FetchError::Transport(error.to_string()),
        }
    }

    async fn with_retries<T, F, Fut>(&self, operation: &'static str, mut call: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let mut attempt = 0;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(e) if Self::is_retryable(&e) && attempt < self.max_retries => {
                    attempt += 1;
                    debug!(operation, attempt, error = %e, "Erreur RPC temporaire, nouvel essai.");
                    sleep(Duration::from_millis(self.delay_ms)).await;
                }
                Err(e) => return Err(Self::classify(e)),
            }
        }
    }

    fn account_config(&self, data_slice: Option<UiDataSliceConfig>) -> RpcAccountInfoConfig {
        RpcAccountInfoConfig {
            encoding: Some(UiAccountEncoding::Base64),
            data_slice,
            commitment: Some(self.commitment()),
            min_context_slot: None,
        }
    }
}

#[async_trait]
impl AccountFetcher for ResilientRpcClient {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<RawAccount>, FetchError> {
        let config = self.account_config(None);
        let response = self
            .with_retries("get_account", || {
                self.client.get_account_with_config(address, config.clone())
            })
            .await?;

        Ok(response.value.map(|account| RawAccount {
            owner: account.owner,
            data: account.data,
        }))
    }

    async fn get_account_slice(
        &self,
        address: &Pubkey,
        offset: usize,
        length: usize,
    ) -> Result<Option<Vec<u8>>, FetchError> {
        let config = self.account_config(Some(UiDataSliceConfig { offset, length }));
        let response = self
            .with_retries("get_account_slice", || {
                self.client.get_account_with_config(address, config.clone())
            })
            .await?;

        Ok(response.value.map(|account| account.data))
    }

    async fn get_token_supply(&self, mint: &Pubkey) -> Result<TokenSupply, FetchError> {
        let supply = self
            .with_retries("get_token_supply", || self.client.get_token_supply(mint))
            .await?;

        let amount = supply
            .amount
            .parse::<u64>()
            .map_err(|e| FetchError::Transport(format!("Supply invalide pour {}: {}", mint, e)))?;

        // Certains nœuds ne renvoient plus `uiAmount` : on le recalcule.
        Ok(match supply.ui_amount {
            Some(ui_amount) => TokenSupply {
                amount,
                decimals: supply.decimals,
                ui_amount,
            },
            None => TokenSupply::from_raw(amount, supply.decimals),
        })
    }

    async fn query_accounts_by_filter(
        &self,
        program_id: &Pubkey,
        predicates: &[AccountPredicate],
    ) -> Result<Vec<Pubkey>, FetchError> {
        // Tranche de longueur 0 : seules les adresses nous intéressent.
        let config = RpcProgramAccountsConfig {
            filters: Some(predicates.iter().map(AccountPredicate::to_rpc_filter).collect()),
            account_config: self.account_config(Some(UiDataSliceConfig { offset: 0, length: 0 })),
            with_context: Some(false),
            sort_results: None,
        };

        let accounts = self
            .with_retries("get_program_accounts", || {
                self.client.get_program_accounts_with_config(program_id, config.clone())
            })
            .await?;

        Ok(accounts.into_iter().map(|(address, _)| address).collect())
    }
}
