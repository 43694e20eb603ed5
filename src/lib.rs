// src/lib.rs - Main library file for cuckoo-diff
// Tree location: ./src/lib.rs

//! cuckoo-diff - Cuckoo Cycle share verification and difficulty scoring
//!
//! Verifies Cuckaroo29 and Cuckatoo31 proofs and turns a proof's BLAKE2b
//! cycle hash into a comparable difficulty, `floor((2^256 - scale) / H)`,
//! for ranking shares and checking them against a target.
//!
//! # Version History
//! - 0.1.0: Verification dispatch, cycle hash, difficulty scaling, share
//!   scoring pool and JSON settings

#![warn(missing_docs)]

pub mod algorithms;
/// Configuration module for scoring settings
pub mod config;
pub mod difficulty;
pub mod pool;
pub mod pow;

// Re-export main types for convenience
pub use algorithms::{
    Algorithm, CuckooVerifier, CycleDigest, CycleHasher, CycleVerifier, DigestOracle, PowError,
    VerifyError, PROOF_SIZE,
};
pub use config::Settings;
pub use difficulty::{ArithmeticError, CUCKATOO31_SCALE, DEFAULT_SCALE};
pub use pool::{score_shares, ShareJob, ShareOutcome, ShareResult};
pub use pow::{scaled_diff, unscaled_diff, verify, CuckooPow};

use hex::FromHexError;
use thiserror::Error;

/// Main error type for cuckoo-diff
#[derive(Error, Debug)]
pub enum CuckooDiffError {
    /// Verification or scoring errors
    #[error("PoW error: {0}")]
    Pow(#[from] PowError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Worker task failures
    #[error("Task error: {0}")]
    Task(String),

    /// IO operation errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Implement conversion from hex decode errors
impl From<FromHexError> for CuckooDiffError {
    fn from(err: FromHexError) -> Self {
        CuckooDiffError::Config(format!("Hex decode error: {}", err))
    }
}

/// Result type alias for cuckoo-diff operations
pub type Result<T> = std::result::Result<T, CuckooDiffError>;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Application name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Application description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Initialize logging
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .map_err(|e| CuckooDiffError::Config(format!("Logging already initialized: {}", e)))?;

    tracing::info!("{} v{} - {}", NAME, VERSION, DESCRIPTION);
    Ok(())
}
