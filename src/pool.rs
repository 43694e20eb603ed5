// src/pool.rs - Concurrent share scoring
// Tree location: ./src/pool.rs

//! Share scoring pool
//!
//! Scores a batch of independent shares (header, edge bits, proof) on
//! blocking worker threads. Each task owns its share; results come back in
//! submission order. Concurrency is bounded by a semaphore sized from
//! [`Settings::workers`].

use crate::algorithms::{Algorithm, CycleVerifier, DigestOracle, PowError};
use crate::config::Settings;
use crate::pow::CuckooPow;
use crate::{CuckooDiffError, Result};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// A share to verify and score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareJob {
    /// Header bytes the proof was found for (hex in JSON)
    #[serde(with = "hex_bytes")]
    pub header: Vec<u8>,
    /// Graph-size parameter
    pub edge_bits: u32,
    /// Edge indices of the claimed cycle
    pub proof: Vec<u32>,
}

/// What happened to a share
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareOutcome {
    /// Valid cycle, difficulty computed
    Scored,
    /// Not a valid cycle
    InvalidCycle,
    /// Valid cycle but the difficulty could not be computed
    Skipped,
    /// Proof could not be checked at all (e.g. wrong length)
    Malformed,
}

/// Result of scoring one share
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareResult {
    /// Position of the share in the submitted batch
    pub index: usize,
    /// Outcome of verification and scoring
    pub outcome: ShareOutcome,
    /// Scaled difficulty, present when scored
    pub difficulty: Option<f64>,
    /// Reason the share was not scored
    pub error: Option<String>,
}

impl ShareResult {
    fn scored(index: usize, difficulty: f64) -> Self {
        Self {
            index,
            outcome: ShareOutcome::Scored,
            difficulty: Some(difficulty),
            error: None,
        }
    }

    fn failed(index: usize, outcome: ShareOutcome, error: &PowError) -> Self {
        Self {
            index,
            outcome,
            difficulty: None,
            error: Some(error.to_string()),
        }
    }

    /// Whether the share met `target` difficulty
    pub fn meets(&self, target: f64) -> bool {
        self.difficulty.is_some_and(|d| d >= target)
    }
}

/// Verify and score one share
pub fn score_share<O: DigestOracle, V: CycleVerifier>(
    pow: &CuckooPow<O, V>,
    index: usize,
    job: &ShareJob,
    alt_scale: &BigUint,
) -> std::result::Result<ShareResult, PowError> {
    match pow.verify_detailed(&job.header, &job.proof, job.edge_bits) {
        Ok(()) => {}
        Err(e @ PowError::Verify(_)) => {
            tracing::debug!("Share #{} rejected: {}", index, e);
            return Ok(ShareResult::failed(index, ShareOutcome::InvalidCycle, &e));
        }
        Err(e @ PowError::ProofSize { .. }) => {
            return Ok(ShareResult::failed(index, ShareOutcome::Malformed, &e));
        }
        Err(e) => return Err(e),
    }

    match pow.scaled_diff(job.edge_bits, &job.proof, alt_scale) {
        Ok(difficulty) => Ok(ShareResult::scored(index, difficulty)),
        Err(e @ PowError::Arithmetic(_)) => {
            tracing::warn!("Share #{} skipped: {}", index, e);
            Ok(ShareResult::failed(index, ShareOutcome::Skipped, &e))
        }
        Err(e @ PowError::ProofSize { .. }) => Ok(ShareResult::failed(index, ShareOutcome::Malformed, &e)),
        Err(e) => Err(e),
    }
}

/// Score a batch of shares concurrently.
///
/// An unrecognized graph-size parameter anywhere in the batch is a
/// configuration defect and fails the whole batch before any work starts.
pub async fn score_shares<O, V>(
    pow: Arc<CuckooPow<O, V>>,
    jobs: Vec<ShareJob>,
    settings: &Settings,
) -> Result<Vec<ShareResult>>
where
    O: DigestOracle + 'static,
    V: CycleVerifier + 'static,
{
    for job in &jobs {
        Algorithm::from_edge_bits(job.edge_bits)?;
    }

    let workers = settings.workers.max(1);
    let semaphore = Arc::new(Semaphore::new(workers));
    let alt_scale = BigUint::from(settings.alt_scale);
    tracing::info!("Scoring {} shares on {} workers", jobs.len(), workers);

    let mut handles = Vec::with_capacity(jobs.len());
    for (index, job) in jobs.into_iter().enumerate() {
        let permit = Arc::clone(&semaphore)
            .acquire_owned()
            .await
            .map_err(|e| CuckooDiffError::Task(e.to_string()))?;
        let pow = Arc::clone(&pow);
        let alt_scale = alt_scale.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            score_share(&pow, index, &job, &alt_scale)
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = handle
            .await
            .map_err(|e| CuckooDiffError::Task(e.to_string()))??;
        results.push(result);
    }
    Ok(results)
}

/// Serde helpers storing bytes as hex strings
mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s.trim_start_matches("0x")).map_err(serde::de::Error::custom)
    }
}
