// src/difficulty.rs - Digest to difficulty scaling
// Tree location: ./src/difficulty.rs

//! Difficulty scaling
//!
//! A proof digest is reversed into a big-endian integer `H` and scored as
//! `floor((2^256 - scale) / H)`. The exact quotient is returned as an `f64`;
//! values above 2^53 lose precision and downstream consumers compare the
//! rounded values, so the rounding is part of the result.

use crate::algorithms::{Algorithm, CycleDigest};
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use thiserror::Error;

/// Scale used when none is supplied
pub const DEFAULT_SCALE: u32 = 1;

/// Scale the larger-graph variant always uses for scaled difficulty
pub const CUCKATOO31_SCALE: u32 = 7936;

/// Bit width of the difficulty domain
const DOMAIN_BITS: usize = 256;

/// Arithmetic failures while scoring a digest
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    /// Digest reads as zero, leaving nothing to divide by
    #[error("digest is zero")]
    ZeroDigest,
    /// Scale is at least 2^256
    #[error("scale constant exceeds the 256-bit domain")]
    ScaleOutOfRange,
}

/// 2^256
fn domain() -> BigUint {
    BigUint::one() << DOMAIN_BITS
}

/// Read a native-order digest as the integer it is scored by
pub fn digest_value(digest: &CycleDigest) -> BigUint {
    let mut bytes = *digest.as_bytes();
    bytes.reverse();
    BigUint::from_bytes_be(&bytes)
}

/// Exact `floor((2^256 - scale) / H)`
pub fn exact_from_digest(digest: &CycleDigest, scale: &BigUint) -> Result<BigUint, ArithmeticError> {
    let hash = digest_value(digest);
    if hash.is_zero() {
        return Err(ArithmeticError::ZeroDigest);
    }

    let domain = domain();
    if scale >= &domain {
        return Err(ArithmeticError::ScaleOutOfRange);
    }
    Ok((domain - scale) / hash)
}

/// Difficulty of a digest, rounded to `f64`
pub fn from_digest(digest: &CycleDigest, scale: &BigUint) -> Result<f64, ArithmeticError> {
    let exact = exact_from_digest(digest, scale)?;
    // Below 2^256, so always finite
    Ok(exact.to_f64().unwrap_or(f64::INFINITY))
}

/// Scale actually applied by scaled difficulty for a variant
pub fn effective_scale(algorithm: Algorithm, alt_scale: &BigUint) -> BigUint {
    match algorithm {
        Algorithm::Cuckatoo31 => BigUint::from(CUCKATOO31_SCALE),
        Algorithm::Cuckaroo29 => alt_scale.clone(),
    }
}
