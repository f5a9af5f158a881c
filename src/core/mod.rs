//! Core application functionality
//!
//! This module contains the command line layer:
//! - Settings and their defaults
//! - The user settings file
//! - CLI parsing and subcommand dispatch

pub mod cli;
pub mod config_file;
pub mod platform;
pub mod runner;
pub mod settings;

pub use cli::CliArgs;
pub use config_file::ConfigFile;
pub use runner::run_app;
pub use settings::{CorpusSettings, GenerationSettings};
