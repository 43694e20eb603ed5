//! Configuration for share scoring and the command line tool

/// JSON settings file and defaults
pub mod settings;

pub use settings::Settings;
