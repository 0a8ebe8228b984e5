//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "oddsmaker",
    version,
    about = "Monte Carlo odds for Texas Hold'em hands"
)]
pub struct OddsmakerCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate win/draw/loss odds for a starting hand
    Odds {
        /// Player hole cards, e.g. "AsAh"
        #[arg(long)]
        hand: String,
        /// Known community cards, e.g. "Kd7c2h"
        #[arg(long)]
        board: Option<String>,
        #[arg(long)]
        opponents: Option<usize>,
        #[arg(long)]
        iterations: Option<usize>,
        #[arg(long)]
        batches: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Classify one to seven cards
    Eval {
        #[arg(long)]
        cards: String,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
