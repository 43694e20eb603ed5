// src/algorithms/cuckatoo31/mod.rs - Cuckatoo31 algorithm implementation
// Tree location: ./src/algorithms/cuckatoo31/mod.rs

//! Cuckatoo31 algorithm implementation
//!
//! Verification side of the Cuckatoo31 proof-of-work used by Grin mainnet.
//! Cuckatoo31 is the ASIC-friendly, larger-graph variant. Every node is an
//! independent SipHash of `2 * edge + side`, and nodes `x` and `x ^ 1` are
//! joined, so cycles are followed on `node >> 1`.
//!
//! # Version History
//! - 0.1.0: Initial verifier with sibling matching and parity-seeded XOR check

use super::{
    check_proof_size,
    cycle::{endpoints_cancel, follow_cycle, EndpointMatch},
    siphash::SipKeys,
    PowError, VerifyError, PROOF_SIZE,
};

/// Cuckatoo31 algorithm parameters
pub const EDGE_BITS: u32 = 31;
/// Number of edges in the graph (2^31)
pub const NUM_EDGES: u64 = 1u64 << EDGE_BITS; // 2,147,483,648 edges
/// Largest valid edge index, also the node mask
pub const EDGE_MASK: u64 = NUM_EDGES - 1;

/// Seed for the endpoint XOR check: sibling pairs leave one bit per pair
const XOR_SEED: u32 = ((PROOF_SIZE / 2) & 1) as u32;

/// Cuckatoo31 verification context for one header
#[derive(Debug, Clone)]
pub struct Cuckatoo31 {
    keys: SipKeys,
}

impl Cuckatoo31 {
    /// Create a verifier for the given header bytes
    pub fn new(header: &[u8]) -> Self {
        Self::from_keys(SipKeys::from_header(header))
    }

    /// Create a verifier from already derived SipHash keys
    pub fn from_keys(keys: SipKeys) -> Self {
        Self { keys }
    }

    /// Get the SipHash keys in use
    pub fn keys(&self) -> &SipKeys {
        &self.keys
    }

    /// Verify that `proof` is a 42-cycle in this header's graph
    pub fn verify(&self, proof: &[u32]) -> Result<(), PowError> {
        check_proof_size(proof)?;

        let mut uvs = [0u32; 2 * PROOF_SIZE];
        for (n, &edge) in proof.iter().enumerate() {
            if edge as u64 > EDGE_MASK {
                return Err(VerifyError::TooBig.into());
            }
            if n > 0 && edge <= proof[n - 1] {
                return Err(VerifyError::TooSmall.into());
            }
            uvs[2 * n] = self.keys.sipnode(edge, 0, EDGE_MASK);
            uvs[2 * n + 1] = self.keys.sipnode(edge, 1, EDGE_MASK);
        }

        if !endpoints_cancel(&uvs, XOR_SEED) {
            return Err(VerifyError::NonMatching.into());
        }
        follow_cycle(&uvs, EndpointMatch::Sibling)?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(EDGE_BITS, 31);
        assert_eq!(NUM_EDGES, 2_147_483_648);
        assert_eq!(EDGE_MASK, 0x7FFF_FFFF);
        assert_eq!(XOR_SEED, 1);
    }

    #[test]
    fn test_rejects_edge_too_big() {
        let verifier = Cuckatoo31::new(&[0u8; 80]);
        let mut proof: Vec<u32> = (0..42).collect();
        proof[41] = 1 << 31;
        assert_eq!(verifier.verify(&proof), Err(PowError::Verify(VerifyError::TooBig)));
    }

    #[test]
    fn test_rejects_unsorted() {
        let verifier = Cuckatoo31::new(&[0u8; 80]);
        let proof: Vec<u32> = (0..42).rev().collect();
        assert_eq!(verifier.verify(&proof), Err(PowError::Verify(VerifyError::TooSmall)));
    }

    #[test]
    fn test_rejects_wrong_length() {
        let verifier = Cuckatoo31::new(&[0u8; 80]);
        let proof: Vec<u32> = (0..43).collect();
        assert_eq!(
            verifier.verify(&proof),
            Err(PowError::ProofSize { expected: 42, actual: 43 })
        );
    }

    #[test]
    fn test_arbitrary_proof_is_not_a_cycle() {
        let verifier = Cuckatoo31::new(b"some block header");
        let proof: Vec<u32> = (0..42).map(|i| 12_345 + i * 1_000_003).collect();
        let result = verifier.verify(&proof);
        assert!(matches!(result, Err(PowError::Verify(_))));
        assert_ne!(result, Err(PowError::Verify(VerifyError::TooBig)));
        assert_ne!(result, Err(PowError::Verify(VerifyError::TooSmall)));
    }

    #[test]
    fn test_nodes_within_mask() {
        let verifier = Cuckatoo31::new(&[0xAAu8; 80]);
        for edge in [0u32, 1, 0x7FFF_FFFF] {
            assert!((verifier.keys().sipnode(edge, 0, EDGE_MASK) as u64) <= EDGE_MASK);
        }
    }

    // Grin's published Cuckatoo31 solution for nonce 99 over a zero header
    pub(crate) const C31_SOLUTION: [u32; PROOF_SIZE] = [
        0x1128e07, 0xc181131, 0x110fad36, 0x1135ddee, 0x1669c7d3, 0x1931e6ea, 0x1c0005f3,
        0x1dd6ecca, 0x1e29ce7e, 0x209736fc, 0x2692bf1a, 0x27b85aa9, 0x29bb7693, 0x2dc2a047,
        0x2e28650a, 0x2f381195, 0x350eb3f9, 0x3beed728, 0x3e861cbc, 0x41448cc1, 0x41f08f6d,
        0x42fbc48a, 0x4383ab31, 0x4389c61f, 0x4540a5ce, 0x49a17405, 0x50372ded, 0x512f0db0,
        0x588b6288, 0x5a36aa46, 0x5c29e1fe, 0x6118ab16, 0x634705b5, 0x6633d190, 0x6683782f,
        0x6728b6e1, 0x67adfb45, 0x68ae2306, 0x6d60f5e1, 0x78af3c4f, 0x7dde51ab, 0x7faced21,
    ];

    pub(crate) fn c31_header() -> [u8; 80] {
        let mut header = [0u8; 80];
        header[76..].copy_from_slice(&99u32.to_le_bytes());
        header
    }

    #[test]
    fn test_accepts_known_solution() {
        let verifier = Cuckatoo31::new(&c31_header());
        assert_eq!(verifier.verify(&C31_SOLUTION), Ok(()));
    }

    #[test]
    fn test_rejects_altered_solution() {
        let verifier = Cuckatoo31::new(&c31_header());
        let mut proof = C31_SOLUTION;
        proof[0] ^= 2;
        assert!(matches!(verifier.verify(&proof), Err(PowError::Verify(_))));

        // Same edges under another header
        let other = Cuckatoo31::new(&[0u8; 80]);
        assert!(matches!(other.verify(&C31_SOLUTION), Err(PowError::Verify(_))));
    }
}
