//! Cuckaroo29 algorithm implementation
//!
//! Verification side of the Cuckaroo29 proof-of-work used by Grin.
//! Cuckaroo29 is a memory-hard, ASIC-resistant variant of the Cuckoo Cycle
//! algorithm whose edges are generated in SipHash blocks of 64.

pub mod verifier;

use super::{siphash::SipKeys, PowError};

/// Cuckaroo29 algorithm parameters
pub const EDGE_BITS: u32 = 29;
/// Number of edges in the graph (2^29)
pub const NUM_EDGES: u64 = 1 << EDGE_BITS; // 536,870,912 edges
/// Largest valid edge index, also the node mask
pub const EDGE_MASK: u64 = NUM_EDGES - 1;

/// Cuckaroo29 verification context for one header
#[derive(Debug, Clone)]
pub struct Cuckaroo29 {
    keys: SipKeys,
}

impl Cuckaroo29 {
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
        verifier::verify_proof(&self.keys, proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(EDGE_BITS, 29);
        assert_eq!(NUM_EDGES, 536_870_912);
        assert_eq!(EDGE_MASK, 0x1FFF_FFFF);
    }

    #[test]
    fn test_cuckaroo29_creation() {
        let header = [0u8; 80];
        let a = Cuckaroo29::new(&header);
        let b = Cuckaroo29::from_keys(SipKeys::from_header(&header));
        assert_eq!(a.keys(), b.keys());
    }
}
