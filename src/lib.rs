// src/lib.rs

// Découverte, décodage et filtrage des pools AMM V4 sur Solana.
pub mod config;
pub mod data_pipeline;
pub mod decoders;
pub mod error;
pub mod filtering;
pub mod monitoring;
pub mod rpc;
