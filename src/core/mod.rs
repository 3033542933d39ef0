//! Core application functionality
//!
//! This module contains the core application logic, including:
//! - Application initialization and the runner
//! - Settings, the config file and CLI handling
//! - Error types shared across the crate

pub mod app;
pub mod cli;
pub mod config_file;
pub mod errors;
pub mod platform;
pub mod runner;
pub mod settings;

// Re-export commonly used items
pub use app::create_app;
pub use cli::CliArgs;
pub use config_file::ConfigFile;
pub use errors::ReticleError;
pub use runner::run_app;
pub use settings::{AppSettings, GridSettings};
