// src/pow.rs - Verification dispatch and difficulty facade
// Tree location: ./src/pow.rs

//! Public verification and scoring API
//!
//! [`CuckooPow`] routes each call to the variant selected by the raw edge
//! bits, rejecting anything other than 29 or 31 up front. The digest oracle
//! and cycle verifier are pluggable; the free functions use the built-in
//! ones.

use crate::algorithms::{
    Algorithm, CuckooVerifier, CycleHasher, CycleVerifier, DigestOracle, PowError,
};
use crate::difficulty::{self, DEFAULT_SCALE};
use num_bigint::BigUint;

/// Verification and difficulty scoring over a digest oracle and a verifier
#[derive(Debug, Clone, Default)]
pub struct CuckooPow<O = CycleHasher, V = CuckooVerifier> {
    oracle: O,
    verifier: V,
}

impl CuckooPow {
    /// Facade over the built-in hasher and verifiers
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: DigestOracle, V: CycleVerifier> CuckooPow<O, V> {
    /// Facade over caller-supplied collaborators
    pub fn with_collaborators(oracle: O, verifier: V) -> Self {
        Self { oracle, verifier }
    }

    /// Digest oracle in use
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Cycle verifier in use
    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    /// Whether `proof` is a valid cycle for `header`.
    ///
    /// A proof that breaks a cycle rule is `Ok(false)`; a bad graph-size
    /// parameter or proof length is an error.
    pub fn verify(&self, header: &[u8], proof: &[u32], edge_bits: u32) -> Result<bool, PowError> {
        match self.verify_detailed(header, proof, edge_bits) {
            Ok(()) => Ok(true),
            Err(PowError::Verify(reason)) => {
                tracing::debug!("Cycle rejected: edge_bits={}, reason={}", edge_bits, reason);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Like [`verify`](Self::verify) but names the rule a bad proof breaks
    pub fn verify_detailed(&self, header: &[u8], proof: &[u32], edge_bits: u32) -> Result<(), PowError> {
        let algorithm = Algorithm::from_edge_bits(edge_bits)?;
        tracing::debug!("Verifying {} proof", algorithm);
        self.verifier.verify(header, proof, algorithm)
    }

    /// Difficulty of `proof` with `scale` subtracted from 2^256 (default 1)
    pub fn unscaled_diff(
        &self,
        edge_bits: u32,
        proof: &[u32],
        scale: Option<&BigUint>,
    ) -> Result<f64, PowError> {
        let algorithm = Algorithm::from_edge_bits(edge_bits)?;
        let scale = scale.cloned().unwrap_or_else(|| BigUint::from(DEFAULT_SCALE));
        self.diff_for(algorithm, proof, &scale)
    }

    /// Difficulty with the variant's scale: 7936 for Cuckatoo31, `alt_scale`
    /// otherwise
    pub fn scaled_diff(&self, edge_bits: u32, proof: &[u32], alt_scale: &BigUint) -> Result<f64, PowError> {
        let algorithm = Algorithm::from_edge_bits(edge_bits)?;
        let scale = difficulty::effective_scale(algorithm, alt_scale);
        self.diff_for(algorithm, proof, &scale)
    }

    fn diff_for(&self, algorithm: Algorithm, proof: &[u32], scale: &BigUint) -> Result<f64, PowError> {
        let digest = self.oracle.digest(algorithm, proof)?;
        let diff = difficulty::from_digest(&digest, scale)?;
        tracing::trace!("{} digest {} scored {:.2}", algorithm, digest.to_hex(), diff);
        Ok(diff)
    }
}

/// [`CuckooPow::verify`] with the built-in collaborators
pub fn verify(header: &[u8], proof: &[u32], edge_bits: u32) -> Result<bool, PowError> {
    CuckooPow::new().verify(header, proof, edge_bits)
}

/// [`CuckooPow::unscaled_diff`] with the built-in collaborators
pub fn unscaled_diff(edge_bits: u32, proof: &[u32], scale: Option<&BigUint>) -> Result<f64, PowError> {
    CuckooPow::new().unscaled_diff(edge_bits, proof, scale)
}

/// [`CuckooPow::scaled_diff`] with the built-in collaborators
pub fn scaled_diff(edge_bits: u32, proof: &[u32], alt_scale: &BigUint) -> Result<f64, PowError> {
    CuckooPow::new().scaled_diff(edge_bits, proof, alt_scale)
}

/// Test doubles for the collaborator traits
#[cfg(test)]
pub(crate) mod mock {
    use crate::algorithms::{Algorithm, CycleDigest, CycleVerifier, DigestOracle, PowError, VerifyError};
    use std::sync::Mutex;

    /// Oracle returning the same digest for every proof
    #[derive(Debug, Clone, Copy)]
    pub struct FixedOracle(pub CycleDigest);

    impl FixedOracle {
        /// Digest whose scored value is `value`
        pub fn with_value(value: u64) -> Self {
            let mut bytes = [0u8; 32];
            bytes[..8].copy_from_slice(&value.to_le_bytes());
            Self(CycleDigest(bytes))
        }
    }

    impl DigestOracle for FixedOracle {
        fn digest(&self, _algorithm: Algorithm, _proof: &[u32]) -> Result<CycleDigest, PowError> {
            Ok(self.0)
        }
    }

    /// Verifier that records which variant it was asked for
    #[derive(Debug, Default)]
    pub struct RecordingVerifier {
        pub calls: Mutex<Vec<Algorithm>>,
        pub reject: Option<VerifyError>,
    }

    impl RecordingVerifier {
        pub fn rejecting(reason: VerifyError) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reject: Some(reason),
            }
        }

        pub fn calls(&self) -> Vec<Algorithm> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }
    }

    impl CycleVerifier for RecordingVerifier {
        fn verify(&self, _header: &[u8], _proof: &[u32], algorithm: Algorithm) -> Result<(), PowError> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(algorithm);
            }
            match self.reject {
                Some(reason) => Err(reason.into()),
                None => Ok(()),
            }
        }
    }
}
