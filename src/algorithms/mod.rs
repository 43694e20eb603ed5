// src/algorithms/mod.rs - Unified algorithms module for C29 and C31
// Tree location: ./src/algorithms/mod.rs

//! Algorithms module for cuckoo-diff
//!
//! Provides unified access to the Cuckaroo29 and Cuckatoo31 verifiers and
//! the proof digest. Defines the variant selector, the collaborator traits
//! and the error types shared by the rest of the crate.
//!
//! # Version History
//! - 0.1.0: Unified C29/C31 verification with the digest oracle and
//!   verifier behind traits

pub mod cuckaroo29;
pub mod cuckatoo31;
pub mod cycle;
pub mod cyclehash;
pub mod siphash;

pub use cyclehash::{CycleDigest, CycleHasher};

use crate::difficulty::ArithmeticError;
use siphash::SipKeys;
use thiserror::Error;

/// Required cycle length (shared by both variants)
pub const PROOF_SIZE: usize = 42;

/// Supported cuckoo cycle variants, keyed by edge bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// ASIC-resistant variant, 29 edge bits
    Cuckaroo29,
    /// ASIC-friendly variant, 31 edge bits
    Cuckatoo31,
}

impl Algorithm {
    /// Select the variant for a graph-size parameter.
    ///
    /// Only 29 and 31 are recognized; every other value is rejected rather
    /// than mapped onto a default variant.
    pub fn from_edge_bits(edge_bits: u32) -> Result<Self, PowError> {
        match edge_bits {
            cuckaroo29::EDGE_BITS => Ok(Algorithm::Cuckaroo29),
            cuckatoo31::EDGE_BITS => Ok(Algorithm::Cuckatoo31),
            other => Err(PowError::InvalidParameter(other)),
        }
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Cuckaroo29 => "Cuckaroo29",
            Algorithm::Cuckatoo31 => "Cuckatoo31",
        }
    }

    /// Get edge bits parameter
    pub fn edge_bits(&self) -> u32 {
        match self {
            Algorithm::Cuckaroo29 => cuckaroo29::EDGE_BITS,
            Algorithm::Cuckatoo31 => cuckatoo31::EDGE_BITS,
        }
    }

    /// Largest valid edge index
    pub fn edge_mask(&self) -> u64 {
        match self {
            Algorithm::Cuckaroo29 => cuckaroo29::EDGE_MASK,
            Algorithm::Cuckatoo31 => cuckatoo31::EDGE_MASK,
        }
    }

    /// Whether this is the larger-graph variant with a fixed scale constant
    pub fn is_large_graph(&self) -> bool {
        matches!(self, Algorithm::Cuckatoo31)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Reasons a proof fails cycle verification
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyError {
    /// Edge index beyond the graph
    #[error("edge index too big")]
    TooBig,
    /// Edge indices not strictly ascending
    #[error("edge indices not ascending")]
    TooSmall,
    /// Endpoints do not pair up
    #[error("endpoints don't match up")]
    NonMatching,
    /// Some node has degree above two
    #[error("branch in cycle")]
    Branch,
    /// Some endpoint has no partner
    #[error("cycle dead ends")]
    DeadEnd,
    /// The edges close into a cycle shorter than the proof
    #[error("cycle too short")]
    ShortCycle,
}

/// Errors from verification, hashing and scoring
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PowError {
    /// Graph-size parameter outside the recognized values
    #[error("invalid graph size parameter: {0} edge bits")]
    InvalidParameter(u32),

    /// Proof does not have the fixed cycle length
    #[error("wrong proof size: expected {expected}, got {actual}")]
    ProofSize {
        /// Required number of edges
        expected: usize,
        /// Number of edges supplied
        actual: usize,
    },

    /// Proof is not a valid cycle
    #[error("invalid cycle: {0}")]
    Verify(#[from] VerifyError),

    /// Difficulty computation failed
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

/// Reject proofs that are not exactly [`PROOF_SIZE`] edges long
pub fn check_proof_size(proof: &[u32]) -> Result<(), PowError> {
    if proof.len() != PROOF_SIZE {
        return Err(PowError::ProofSize {
            expected: PROOF_SIZE,
            actual: proof.len(),
        });
    }
    Ok(())
}

/// Produces the 32-byte digest a proof is scored by
pub trait DigestOracle: Send + Sync {
    /// Digest `proof` for the given variant, in its native byte order
    fn digest(&self, algorithm: Algorithm, proof: &[u32]) -> Result<CycleDigest, PowError>;
}

/// Checks that a proof is a cycle in the graph derived from a header
pub trait CycleVerifier: Send + Sync {
    /// `Ok(())` for a valid cycle, `Err(PowError::Verify(_))` naming the
    /// failed rule otherwise
    fn verify(&self, header: &[u8], proof: &[u32], algorithm: Algorithm) -> Result<(), PowError>;
}

/// Default verifier backed by the built-in Cuckaroo29/Cuckatoo31 checks
#[derive(Debug, Clone, Copy, Default)]
pub struct CuckooVerifier;

impl CycleVerifier for CuckooVerifier {
    fn verify(&self, header: &[u8], proof: &[u32], algorithm: Algorithm) -> Result<(), PowError> {
        let keys = SipKeys::from_header(header);
        match algorithm {
            Algorithm::Cuckaroo29 => cuckaroo29::Cuckaroo29::from_keys(keys).verify(proof),
            Algorithm::Cuckatoo31 => cuckatoo31::Cuckatoo31::from_keys(keys).verify(proof),
        }
    }
}
