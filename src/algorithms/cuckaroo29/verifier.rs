// src/algorithms/cuckaroo29/verifier.rs - Solution verification for Cuckaroo29
// Tree location: ./src/algorithms/cuckaroo29/verifier.rs

//! Solution verification for Cuckaroo29
//!
//! Recomputes both endpoints of every proof edge from its SipHash block and
//! checks that the edges form a single 42-cycle.

use super::EDGE_MASK;
use crate::algorithms::{
    check_proof_size,
    cycle::{endpoints_cancel, follow_cycle, EndpointMatch},
    siphash::SipKeys,
    PowError, VerifyError, PROOF_SIZE,
};

/// Verify a Cuckaroo29 proof against the header's SipHash keys
pub fn verify_proof(keys: &SipKeys, proof: &[u32]) -> Result<(), PowError> {
    verify_with_mask(keys, proof, EDGE_MASK)
}

/// Cuckaroo verification over a graph of `edge_mask + 1` edges
pub(crate) fn verify_with_mask(keys: &SipKeys, proof: &[u32], edge_mask: u64) -> Result<(), PowError> {
    check_proof_size(proof)?;

    let mut uvs = [0u32; 2 * PROOF_SIZE];
    for (n, &edge) in proof.iter().enumerate() {
        if edge as u64 > edge_mask {
            return Err(VerifyError::TooBig.into());
        }
        if n > 0 && edge <= proof[n - 1] {
            return Err(VerifyError::TooSmall.into());
        }
        let hash = keys.sipblock(edge);
        uvs[2 * n] = (hash & edge_mask) as u32;
        uvs[2 * n + 1] = ((hash >> 32) & edge_mask) as u32;
    }

    if !endpoints_cancel(&uvs, 0) {
        return Err(VerifyError::NonMatching.into());
    }
    follow_cycle(&uvs, EndpointMatch::Exact)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascending_proof(start: u32, step: u32) -> Vec<u32> {
        (0..PROOF_SIZE as u32).map(|i| start + i * step).collect()
    }

    #[test]
    fn test_rejects_edge_too_big() {
        let keys = SipKeys::from_header(&[0u8; 80]);
        let mut proof = ascending_proof(0, 1);
        proof[41] = 1 << 29;
        assert_eq!(verify_proof(&keys, &proof), Err(PowError::Verify(VerifyError::TooBig)));
    }

    #[test]
    fn test_rejects_unsorted() {
        let keys = SipKeys::from_header(&[0u8; 80]);
        let mut proof = ascending_proof(10, 3);
        proof.swap(5, 6);
        assert_eq!(verify_proof(&keys, &proof), Err(PowError::Verify(VerifyError::TooSmall)));
    }

    #[test]
    fn test_rejects_duplicate_edges() {
        let keys = SipKeys::from_header(&[0u8; 80]);
        let proof = [0u32; PROOF_SIZE];
        assert_eq!(verify_proof(&keys, &proof), Err(PowError::Verify(VerifyError::TooSmall)));
    }

    #[test]
    fn test_rejects_wrong_length() {
        let keys = SipKeys::from_header(&[0u8; 80]);
        let proof = ascending_proof(0, 1);
        assert_eq!(
            verify_proof(&keys, &proof[..40]),
            Err(PowError::ProofSize { expected: 42, actual: 40 })
        );
    }

    #[test]
    fn test_arbitrary_proof_is_not_a_cycle() {
        // Well-formed but random edges essentially never pair up
        let keys = SipKeys::from_header(b"arbitrary header");
        let proof = ascending_proof(1000, 7919);
        let result = verify_proof(&keys, &proof);
        assert!(matches!(result, Err(PowError::Verify(_))));
        assert_ne!(result, Err(PowError::Verify(VerifyError::TooBig)));
        assert_ne!(result, Err(PowError::Verify(VerifyError::TooSmall)));
    }

    #[test]
    fn test_largest_edge_accepted_by_range_check() {
        let keys = SipKeys::from_header(&[1u8; 80]);
        let mut proof = ascending_proof(0, 1);
        proof[41] = EDGE_MASK as u32;
        let result = verify_proof(&keys, &proof);
        assert_ne!(result, Err(PowError::Verify(VerifyError::TooBig)));
    }

    // Grin's published Cuckaroo19 solution
    const C19_KEYS: [u64; 4] = [
        0x23796193872092ea,
        0xf1017d8a68c4b745,
        0xd312bd53d2cd307b,
        0x840acce5833ddc52,
    ];
    const C19_SOLUTION: [u32; PROOF_SIZE] = [
        0x45e9, 0x6a59, 0xf1ad, 0x10ef7, 0x129e8, 0x13e58, 0x17936, 0x19f7f, 0x208df, 0x23704,
        0x24564, 0x27e64, 0x2b828, 0x2bb41, 0x2ffc0, 0x304c5, 0x31f2a, 0x347de, 0x39686, 0x3ab6c,
        0x429ad, 0x45254, 0x49200, 0x4f8f8, 0x5697f, 0x57ad1, 0x5dd47, 0x607f8, 0x66199, 0x686c7,
        0x6d5f3, 0x6da7a, 0x6dbdf, 0x6f6bf, 0x6ffbb, 0x7580e, 0x78594, 0x785ac, 0x78b1d, 0x7b80d,
        0x7c11c, 0x7da35,
    ];
    const C19_MASK: u64 = (1 << 19) - 1;

    #[test]
    fn test_accepts_known_cuckaroo19_solution() {
        let keys = SipKeys::from_words(C19_KEYS);
        assert_eq!(verify_with_mask(&keys, &C19_SOLUTION, C19_MASK), Ok(()));
    }

    #[test]
    fn test_rejects_altered_cuckaroo19_solution() {
        let keys = SipKeys::from_words(C19_KEYS);
        let mut proof = C19_SOLUTION;
        proof[0] ^= 2;
        let result = verify_with_mask(&keys, &proof, C19_MASK);
        assert!(matches!(result, Err(PowError::Verify(_))));
    }
}
