//! Application runner logic
//!
//! Handles the special CLI flags before handing over to the Bevy app

use crate::core::cli::CliArgs;
use crate::core::config_file::ConfigFile;
use crate::logging;
use anyhow::Result;

/// Create and run the application with the given CLI arguments.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    if cli_args.new_config {
        match ConfigFile::initialize_config_directory() {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("Failed to initialize config directory: {}", e);
                std::process::exit(1);
            }
        }
    }

    if cli_args.log_to_file {
        if let Err(e) = logging::setup_log_redirection() {
            eprintln!("Failed to setup log redirection: {}", e);
        }
    }

    let mut app = crate::core::app::create_app(cli_args)?;
    match app.run() {
        bevy::app::AppExit::Success => Ok(()),
        bevy::app::AppExit::Error(code) => Err(anyhow::anyhow!(
            "Placement did not complete (exit code {})",
            code
        )),
    }
}
