//! Cycle following shared by both verifiers
//!
//! Endpoints are laid out as `uvs[2 * n]` (U side) and `uvs[2 * n + 1]`
//! (V side) for edge `n`. Walking from endpoint `i`, the only same-side
//! endpoint matching it must belong to the next edge of the cycle; we then
//! jump to that edge's other endpoint (`j ^ 1`) until we are back at 0.

use super::VerifyError;

/// How two endpoints on the same side are considered the same node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointMatch {
    /// Cuckaroo: endpoints are nodes
    Exact,
    /// Cuckatoo: node `x` joins node `x ^ 1`, and an exact repeat is a dead end
    Sibling,
}

impl EndpointMatch {
    fn matches(self, a: u32, b: u32) -> bool {
        match self {
            EndpointMatch::Exact => a == b,
            EndpointMatch::Sibling => a >> 1 == b >> 1,
        }
    }

    fn dead_end(self, a: u32, b: u32) -> bool {
        match self {
            EndpointMatch::Exact => false,
            EndpointMatch::Sibling => a == b,
        }
    }
}

/// XOR both sides' endpoints together starting from `init`.
///
/// Every node of a cycle appears an even number of times, so both folds are
/// zero for a valid proof.
pub fn endpoints_cancel(uvs: &[u32], init: u32) -> bool {
    let (xor0, xor1) = uvs
        .chunks_exact(2)
        .fold((init, init), |(x0, x1), pair| (x0 ^ pair[0], x1 ^ pair[1]));
    xor0 | xor1 == 0
}

/// Follow the cycle through `uvs` and check it uses every edge exactly once
pub fn follow_cycle(uvs: &[u32], matching: EndpointMatch) -> Result<(), VerifyError> {
    let len = uvs.len();
    if len < 2 || len % 2 != 0 {
        return Err(VerifyError::ShortCycle);
    }

    let mut steps = 0;
    let mut i = 0;
    loop {
        let mut j = i;
        let mut k = (i + 2) % len;
        while k != i {
            if matching.matches(uvs[k], uvs[i]) {
                if j != i {
                    return Err(VerifyError::Branch);
                }
                j = k;
            }
            k = (k + 2) % len;
        }
        if j == i || matching.dead_end(uvs[j], uvs[i]) {
            return Err(VerifyError::DeadEnd);
        }
        i = j ^ 1;
        steps += 1;
        if i == 0 {
            break;
        }
    }

    if steps == len / 2 {
        Ok(())
    } else {
        Err(VerifyError::ShortCycle)
    }
}
