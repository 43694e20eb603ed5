// src/main.rs - Command line front end for share verification and scoring
// Tree location: ./src/main.rs

//! cuckoo-diff Main Entry Point
//!
//! Handles command-line arguments, loads settings, and runs verification,
//! difficulty scoring or batch scoring of shares from a JSON file.
//!
//! # Version History
//! - 0.1.0: verify, diff, batch and config commands

use chrono::Local;
use clap::{Parser, Subcommand};
use cuckoo_diff::{
    init, score_shares, Algorithm, CuckooDiffError, CuckooPow, Result, Settings, ShareJob,
    ShareOutcome, DEFAULT_SCALE,
};
use num_bigint::BigUint;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "cuckoo-diff")]
#[command(about = "Verify Cuckaroo29/Cuckatoo31 proofs and score their difficulty")]
struct Cli {
    /// JSON settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a proof against a header
    Verify {
        /// Edge bits (29 or 31)
        #[arg(short, long)]
        edge_bits: Option<u32>,
        /// Header bytes (hex)
        #[arg(long)]
        header: String,
        /// Comma separated edge indices
        #[arg(short, long)]
        proof: String,
    },
    /// Compute the difficulty of a proof
    Diff {
        /// Edge bits (29 or 31)
        #[arg(short, long)]
        edge_bits: Option<u32>,
        /// Comma separated edge indices
        #[arg(short, long)]
        proof: String,
        /// Scale subtracted from 2^256 (unscaled) or alternative scale (scaled)
        #[arg(short, long)]
        scale: Option<u64>,
        /// Apply the variant's scale rule instead of the raw scale
        #[arg(long)]
        scaled: bool,
    },
    /// Verify and score every share in a JSON file
    Batch {
        /// JSON array of {"header", "edge_bits", "proof"}
        file: PathBuf,
        /// Worker count override
        #[arg(short, long)]
        workers: Option<usize>,
        /// Minimum difficulty to count a share as meeting target
        #[arg(short, long)]
        target: Option<f64>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    init()?;

    let cli = Cli::parse();
    let settings = Settings::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Verify { edge_bits, header, proof } => {
            verify_proof(&settings, edge_bits, &header, &proof)?;
        }
        Commands::Diff { edge_bits, proof, scale, scaled } => {
            compute_diff(&settings, edge_bits, &proof, scale, scaled)?;
        }
        Commands::Batch { file, workers, target, json } => {
            run_batch(settings, &file, workers, target, json).await?;
        }
        Commands::Config => {
            show_config(&settings)?;
        }
    }

    Ok(())
}

fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

fn select_algorithm(settings: &Settings, edge_bits: Option<u32>) -> Result<Algorithm> {
    let edge_bits = edge_bits.unwrap_or(settings.default_edge_bits);
    Ok(Algorithm::from_edge_bits(edge_bits)?)
}

fn verify_proof(settings: &Settings, edge_bits: Option<u32>, header_hex: &str, proof: &str) -> Result<()> {
    let algorithm = select_algorithm(settings, edge_bits)?;
    let header = hex::decode(header_hex.trim_start_matches("0x"))?;
    let proof = parse_proof(proof)?;

    let pow = CuckooPow::new();
    match pow.verify_detailed(&header, &proof, algorithm.edge_bits()) {
        Ok(()) => println!("{} {} proof is a valid cycle", timestamp(), algorithm),
        Err(cuckoo_diff::PowError::Verify(reason)) => {
            println!("{} {} proof rejected: {}", timestamp(), algorithm, reason)
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn compute_diff(
    settings: &Settings,
    edge_bits: Option<u32>,
    proof: &str,
    scale: Option<u64>,
    scaled: bool,
) -> Result<()> {
    let algorithm = select_algorithm(settings, edge_bits)?;
    let proof = parse_proof(proof)?;
    let pow = CuckooPow::new();

    let difficulty = if scaled {
        let alt_scale = BigUint::from(scale.unwrap_or(settings.alt_scale));
        pow.scaled_diff(algorithm.edge_bits(), &proof, &alt_scale)?
    } else {
        let scale = BigUint::from(scale.unwrap_or(DEFAULT_SCALE as u64));
        pow.unscaled_diff(algorithm.edge_bits(), &proof, Some(&scale))?
    };

    println!(
        "{} {} {} difficulty: {:.2}",
        timestamp(),
        algorithm,
        if scaled { "scaled" } else { "unscaled" },
        difficulty
    );
    Ok(())
}

async fn run_batch(
    mut settings: Settings,
    file: &Path,
    workers: Option<usize>,
    target: Option<f64>,
    json: bool,
) -> Result<()> {
    if let Some(workers) = workers {
        settings.workers = workers;
    }
    settings.validate()?;

    let contents = std::fs::read_to_string(file)?;
    let jobs: Vec<ShareJob> = serde_json::from_str(&contents)?;
    let total = jobs.len();

    let start = Instant::now();
    let results = score_shares(Arc::new(CuckooPow::new()), jobs, &settings).await?;
    let elapsed = start.elapsed();

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    let mut scored = 0usize;
    let mut meeting_target = 0usize;
    for result in &results {
        match (result.outcome, result.difficulty) {
            (ShareOutcome::Scored, Some(difficulty)) => {
                scored += 1;
                if target.map_or(true, |t| result.meets(t)) {
                    meeting_target += 1;
                }
                println!("{} Share #{} difficulty: {:.2}", timestamp(), result.index, difficulty);
            }
            _ => println!(
                "{} Share #{} {:?}: {}",
                timestamp(),
                result.index,
                result.outcome,
                result.error.as_deref().unwrap_or("no difficulty")
            ),
        }
    }

    println!(
        "{} {} shares, {} valid, {} meeting target in {:.2}s",
        timestamp(),
        total,
        scored,
        meeting_target,
        elapsed.as_secs_f64()
    );
    Ok(())
}

fn show_config(settings: &Settings) -> Result<()> {
    println!("cuckoo-diff Configuration:");
    println!("{}", serde_json::to_string_pretty(settings)?);

    println!("\nSupported algorithms:");
    for algorithm in [Algorithm::Cuckaroo29, Algorithm::Cuckatoo31] {
        println!(
            "• {} ({} edge bits){}",
            algorithm.name(),
            algorithm.edge_bits(),
            if algorithm.is_large_graph() { ", scaled difficulty uses fixed scale 7936" } else { "" }
        );
    }
    Ok(())
}

fn parse_proof(proof: &str) -> Result<Vec<u32>> {
    proof
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            let parsed = match s.strip_prefix("0x") {
                Some(hex) => u32::from_str_radix(hex, 16),
                None => s.parse::<u32>(),
            };
            parsed.map_err(|_| CuckooDiffError::Config(format!("Invalid edge index: {}", s)))
        })
        .collect()
}
