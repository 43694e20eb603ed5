//! Proof digest ("cycle hash")
//!
//! A proof is packed LSB-first at `edge_bits` bits per edge, hashed with
//! BLAKE2b-256, and handed out byte-reversed. Difficulty scoring reverses
//! it back before reading it as a big-endian integer.

use super::{check_proof_size, siphash::Blake2b256, Algorithm, DigestOracle, PowError};
use blake2::Digest;

/// Size of a proof digest in bytes
pub const DIGEST_SIZE: usize = 32;

/// A proof digest in the oracle's native (reversed) byte order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CycleDigest(pub [u8; DIGEST_SIZE]);

impl CycleDigest {
    /// Raw bytes in native order
    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// Hex encoding of the native bytes
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; DIGEST_SIZE]> for CycleDigest {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }
}

/// Pack edges LSB-first, `edge_bits` bits each; higher bits are dropped
pub fn pack_proof(proof: &[u32], edge_bits: u32) -> Vec<u8> {
    let total_bits = proof.len() * edge_bits as usize;
    let mut packed = vec![0u8; total_bits.div_ceil(8)];

    let mut bit = 0usize;
    for &edge in proof {
        for j in 0..edge_bits {
            if (edge >> j) & 1 == 1 {
                packed[bit / 8] |= 1 << (bit % 8);
            }
            bit += 1;
        }
    }
    packed
}

/// Digest a proof for the given variant
pub fn cycle_hash(algorithm: Algorithm, proof: &[u32]) -> Result<CycleDigest, PowError> {
    check_proof_size(proof)?;

    let packed = pack_proof(proof, algorithm.edge_bits());
    let hash = Blake2b256::digest(&packed);

    let mut reversed = [0u8; DIGEST_SIZE];
    for (out, byte) in reversed.iter_mut().zip(hash.iter().rev()) {
        *out = *byte;
    }
    Ok(CycleDigest(reversed))
}

/// Default digest oracle backed by [`cycle_hash`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleHasher;

impl DigestOracle for CycleHasher {
    fn digest(&self, algorithm: Algorithm, proof: &[u32]) -> Result<CycleDigest, PowError> {
        cycle_hash(algorithm, proof)
    }
}
