// src/config/settings.rs - Scoring settings loaded from JSON
// Tree location: ./src/config/settings.rs

//! Scoring settings: alternative scale, worker count and default edge bits

use crate::algorithms::Algorithm;
use crate::{CuckooDiffError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Main configuration settings for verification and scoring
pub struct Settings {
    /// Scale applied by scaled difficulty for the smaller graph
    pub alt_scale: u64,
    /// Number of shares scored concurrently
    pub workers: usize,
    /// Edge bits assumed when the command line does not give any
    pub default_edge_bits: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            alt_scale: 1,
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            default_edge_bits: 31, // Grin mainnet primary
        }
    }
}

impl Settings {
    /// Load settings from a JSON file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&contents)?;
        settings.validate()?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, otherwise use the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Reject settings that cannot drive a scoring run
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(CuckooDiffError::Config("workers must be at least 1".to_string()));
        }
        Algorithm::from_edge_bits(self.default_edge_bits).map_err(|e| {
            CuckooDiffError::Config(format!("default_edge_bits: {}", e))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.alt_scale, 1);
        assert_eq!(settings.default_edge_bits, 31);
        assert!(settings.workers >= 1);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "alt_scale": 512 }}"#).expect("write");

        let settings = Settings::load(file.path()).expect("settings");
        assert_eq!(settings.alt_scale, 512);
        assert_eq!(settings.default_edge_bits, 31);
    }

    #[test]
    fn test_load_rejects_bad_edge_bits() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "default_edge_bits": 32 }}"#).expect("write");

        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(err, CuckooDiffError::Config(_)));
    }

    #[test]
    fn test_load_rejects_zero_workers() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "workers": 0 }}"#).expect("write");
        assert!(Settings::load(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/nonexistent/cuckoo-diff.json").unwrap_err();
        assert!(matches!(err, CuckooDiffError::Io(_)));
    }

    #[test]
    fn test_load_or_default() {
        assert_eq!(Settings::load_or_default(None).expect("settings"), Settings::default());
    }
}
