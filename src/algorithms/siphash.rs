// src/algorithms/siphash.rs - SipHash-2-4 keyed from the puzzle header
// Tree location: ./src/algorithms/siphash.rs

//! SipHash-2-4 for Cuckoo Cycle edge generation
//!
//! Both supported variants derive four 64-bit SipHash keys from the header
//! with BLAKE2b-256 and use them directly as the initial SipHash state
//! (no XOR with the usual "somepseudorandomlygeneratedbytes" constants).
//!
//! - Cuckatoo31 hashes every node with a fresh state (`sipnode`).
//! - Cuckaroo29 hashes a block of 64 edges with one running state and
//!   mixes the block's last hash into every other entry (`sipblock`).
//!
//! # Version History
//! - 0.1.0: Merged the per-algorithm SipHashers into one keyed state

use blake2::{digest::consts::U32, Blake2b, Digest};

/// BLAKE2b with a 32-byte output, as used for key derivation and proof hashing
pub type Blake2b256 = Blake2b<U32>;

/// log2 of the number of edges hashed together by Cuckaroo
pub const EDGE_BLOCK_BITS: u32 = 6;
/// Number of edges hashed together by Cuckaroo
pub const EDGE_BLOCK_SIZE: usize = 1 << EDGE_BLOCK_BITS;
/// Mask selecting an edge's position inside its block
pub const EDGE_BLOCK_MASK: u64 = EDGE_BLOCK_SIZE as u64 - 1;

/// SipHash keys derived from a puzzle header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SipKeys {
    k0: u64,
    k1: u64,
    k2: u64,
    k3: u64,
}

impl SipKeys {
    /// Derive keys from arbitrary header bytes (BLAKE2b-256, four LE words)
    pub fn from_header(header: &[u8]) -> Self {
        let hash = Blake2b256::digest(header);
        let mut words = [0u64; 4];
        for (word, chunk) in words.iter_mut().zip(hash.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            *word = u64::from_le_bytes(buf);
        }
        Self::from_words(words)
    }

    /// Build keys from raw words
    pub fn from_words(words: [u64; 4]) -> Self {
        Self {
            k0: words[0],
            k1: words[1],
            k2: words[2],
            k3: words[3],
        }
    }

    /// Hash a single node with a fresh state and mask the result
    pub fn sipnode(&self, edge: u32, uorv: u32, edge_mask: u64) -> u32 {
        let mut state = SipState::new(self);
        state.hash24(2 * edge as u64 + uorv as u64);
        (state.xor_lanes() & edge_mask) as u32
    }

    /// Hash the whole block containing `edge` and return the edge's entry.
    ///
    /// Every entry except the last is XORed with the last one, so an edge's
    /// endpoints cannot be computed without hashing its entire block.
    pub fn sipblock(&self, edge: u32) -> u64 {
        let mut state = SipState::new(self);
        let edge0 = edge as u64 & !EDGE_BLOCK_MASK;
        let mut block = [0u64; EDGE_BLOCK_SIZE];
        for (i, entry) in block.iter_mut().enumerate() {
            state.hash24(edge0 + i as u64);
            *entry = state.xor_lanes();
        }

        let last = block[EDGE_BLOCK_MASK as usize];
        let pos = (edge as u64 & EDGE_BLOCK_MASK) as usize;
        if pos == EDGE_BLOCK_MASK as usize {
            last
        } else {
            block[pos] ^ last
        }
    }
}

/// Running SipHash-2-4 state
#[derive(Debug, Clone)]
struct SipState {
    v0: u64,
    v1: u64,
    v2: u64,
    v3: u64,
}

impl SipState {
    fn new(keys: &SipKeys) -> Self {
        Self {
            v0: keys.k0,
            v1: keys.k1,
            v2: keys.k2,
            v3: keys.k3,
        }
    }

    /// 2 compression rounds, 4 finalization rounds, no length block
    fn hash24(&mut self, nonce: u64) {
        self.v3 ^= nonce;
        self.round();
        self.round();
        self.v0 ^= nonce;
        self.v2 ^= 0xff;
        for _ in 0..4 {
            self.round();
        }
    }

    fn xor_lanes(&self) -> u64 {
        (self.v0 ^ self.v1) ^ (self.v2 ^ self.v3)
    }

    #[inline]
    fn round(&mut self) {
        self.v0 = self.v0.wrapping_add(self.v1);
        self.v2 = self.v2.wrapping_add(self.v3);
        self.v1 = self.v1.rotate_left(13);
        self.v3 = self.v3.rotate_left(16);
        self.v1 ^= self.v0;
        self.v3 ^= self.v2;
        self.v0 = self.v0.rotate_left(32);
        self.v2 = self.v2.wrapping_add(self.v1);
        self.v0 = self.v0.wrapping_add(self.v3);
        self.v1 = self.v1.rotate_left(17);
        self.v3 = self.v3.rotate_left(21);
        self.v1 ^= self.v2;
        self.v3 ^= self.v0;
        self.v2 = self.v2.rotate_left(32);
    }
}
