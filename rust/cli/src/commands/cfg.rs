//! Configuration command handler.
//!
//! This module implements the `cfg` command, which displays the resolved
//! simulation settings together with their sources (default, file or
//! environment).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "iterations": {
//!     "value": 10000,
//!     "source": "default"
//!   },
//!   "opponents": {
//!     "value": 1,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

/// Loads the current configuration with source tracking and writes it as
/// pretty JSON to `out`.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;
    let display = serde_json::json!({
        "iterations": {
            "value": config.iterations,
            "source": sources.iterations,
        },
        "opponents": {
            "value": config.opponents,
            "source": sources.opponents,
        },
        "batches": {
            "value": config.batches,
            "source": sources.batches,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "parallel": {
            "value": config.parallel,
            "source": sources.parallel,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
