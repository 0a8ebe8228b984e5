//! Command handler modules for the oddsmaker CLI.
//!
//! Each subcommand lives in its own module and exposes a
//! `handle_COMMAND_command(...) -> Result<(), CliError>` function that writes
//! to injected output streams.

pub mod cfg;
pub mod eval;
pub mod odds;

pub use cfg::handle_cfg_command;
pub use eval::handle_eval_command;
pub use odds::{OddsArgs, handle_odds_command};
