//! Application logging functionality
//!
//! Handles log file management and output redirection. Log records themselves
//! go through Bevy's `LogPlugin`, configured in [`crate::systems::plugins`].

use crate::core::config_file::ConfigFile;
use std::fs;
use std::fs::OpenOptions;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::PathBuf;

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    ConfigFile::config_dir().join("logs")
}

/// Name of the log file for a given day
pub fn log_file_name(date: chrono::NaiveDate) -> String {
    format!("crosshairs-{}.log", date.format("%Y-%m-%d"))
}

/// Get the path to the current log file
pub fn current_log_file() -> PathBuf {
    logs_dir().join(log_file_name(chrono::Utc::now().date_naive()))
}

/// Initialize the logs directory
pub fn initialize_logs_directory() -> anyhow::Result<()> {
    fs::create_dir_all(logs_dir())?;
    Ok(())
}

/// Make `target` refer to the same open file as `source`
fn redirect_descriptor(source: RawFd, target: RawFd) -> anyhow::Result<()> {
    // SAFETY: dup2 does not touch memory; invalid descriptors are reported
    // through its return value.
    if unsafe { libc::dup2(source, target) } == -1 {
        return Err(anyhow::anyhow!(std::io::Error::last_os_error()));
    }
    Ok(())
}

/// Redirect stdout and stderr to ~/.config/crosshairs/logs/
pub fn setup_log_redirection() -> anyhow::Result<()> {
    initialize_logs_directory()?;

    let log_file_path = current_log_file();
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    redirect_descriptor(log_file.as_raw_fd(), libc::STDOUT_FILENO)?;
    redirect_descriptor(log_file.as_raw_fd(), libc::STDERR_FILENO)?;

    println!(
        "=== Crosshairs started at {} ===",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("Logs redirected to: {:?}", log_file_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_name() {
        let date = chrono::NaiveDate::from_ymd_opt(2026, 3, 7).expect("valid date");
        assert_eq!(log_file_name(date), "crosshairs-2026-03-07.log");
        assert!(current_log_file().starts_with(logs_dir()));
    }

    #[test]
    fn test_redirect_descriptor() {
        use std::io::{Read, Seek, Write};

        let mut log = tempfile::tempfile().expect("log file");
        let mut stream = tempfile::tempfile().expect("stream file");
        redirect_descriptor(log.as_raw_fd(), stream.as_raw_fd()).expect("dup2 succeeds");

        stream.write_all(b"redirected").expect("write through stream");
        log.rewind().expect("rewind log");
        let mut contents = String::new();
        log.read_to_string(&mut contents).expect("read log");
        assert_eq!(contents, "redirected");

        let error = redirect_descriptor(-1, stream.as_raw_fd()).expect_err("invalid source");
        assert!(error.to_string().contains("Bad file descriptor"));
    }
}
