use anyhow::{Context, Result};
use serde::Deserialize;
use solana_sdk::{
    commitment_config::{CommitmentConfig, CommitmentLevel},
    pubkey,
    pubkey::Pubkey,
};
use std::str::FromStr;

pub const RAYDIUM_AMM_V4_PROGRAM_ID: Pubkey = pubkey!("675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8");
pub const OPENBOOK_PROGRAM_ID: Pubkey = pubkey!("srmqPvymJeFKQ4zGQed1GFppgkRHL9kaELCbyksJtPX");
pub const USDC_MINT: Pubkey = pubkey!("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v");

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub solana_rpc_url: String,

    #[serde(default = "default_commitment")]
    pub commitment: String,
    #[serde(default = "default_rpc_max_retries")]
    pub rpc_max_retries: u8,
    #[serde(default = "default_rpc_retry_delay_ms")]
    pub rpc_retry_delay_ms: u64,

    #[serde(default = "default_amm_program_id")]
    pub amm_program_id: String,
    #[serde(default = "default_market_program_id")]
    pub market_program_id: String,
    #[serde(default = "default_quote_mint")]
    pub quote_mint: String,

    #[serde(default = "default_true")]
    pub check_if_burned: bool,
    #[serde(default = "default_true")]
    pub check_if_mint_is_renounced: bool,
}

fn default_commitment() -> String {
    "processed".to_string()
}
fn default_rpc_max_retries() -> u8 {
    3
}
fn default_rpc_retry_delay_ms() -> u64 {
    500
}
fn default_amm_program_id() -> String {
    RAYDIUM_AMM_V4_PROGRAM_ID.to_string()
}
fn default_market_program_id() -> String {
    OPENBOOK_PROGRAM_ID.to_string()
}
fn default_quote_mint() -> String {
    USDC_MINT.to_string()
}
fn default_true() -> bool {
    true
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()?;
        Ok(config)
    }

    pub fn commitment_config(&self) -> Result<CommitmentConfig> {
        let commitment = CommitmentLevel::from_str(&self.commitment)
            .map_err(|e| anyhow::anyhow!("Commitment invalide '{}': {:?}", self.commitment, e))?;
        Ok(CommitmentConfig { commitment })
    }

    /// Les identifiants connus, parsés une fois pour toutes.
    pub fn constants(&self) -> Result<PoolConstants> {
        Ok(PoolConstants {
            amm_program_id: parse_pubkey("AMM_PROGRAM_ID", &self.amm_program_id)?,
            market_program_id: parse_pubkey("MARKET_PROGRAM_ID", &self.market_program_id)?,
            quote_mint: parse_pubkey("QUOTE_MINT", &self.quote_mint)?,
        })
    }
}

fn parse_pubkey(name: &str, value: &str) -> Result<Pubkey> {
    Pubkey::from_str(value).with_context(|| format!("{} n'est pas une adresse valide: {}", name, value))
}

/// Configuration immuable passée au scanner et au résolveur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConstants {
    pub amm_program_id: Pubkey,
    pub market_program_id: Pubkey,
    /// Le mint de la devise de cotation (USDC sur mainnet).
    pub quote_mint: Pubkey,
}

impl Default for PoolConstants {
    fn default() -> Self {
        Self {
            amm_program_id: RAYDIUM_AMM_V4_PROGRAM_ID,
            market_program_id: OPENBOOK_PROGRAM_ID,
            quote_mint: USDC_MINT,
        }
    }
}
