// src/data_pipeline/mod.rs

// Découverte des pools candidats directement sur la chaîne.
pub mod onchain_scanner;

pub use onchain_scanner::{CandidatePool, Candidates, scan_candidates};
