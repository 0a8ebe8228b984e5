//! Odds command handler.
//!
//! Builds the deck as the full 52 cards minus every known card, runs the
//! Monte Carlo simulation and reports win/draw/loss and the player's
//! hand-category distribution as text or JSON.

use std::collections::BTreeMap;
use std::io::Write;

use oddsmaker_engine::deck::Deck;
use oddsmaker_engine::hand::Hand;
use oddsmaker_engine::odds::PokerOdds;
use oddsmaker_engine::rank::Category;
use oddsmaker_engine::simulation::Simulator;
use tracing::debug;

use crate::config::{self, Config, Overrides};
use crate::error::CliError;
use crate::ui;

/// Arguments of the `odds` subcommand as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct OddsArgs {
    pub hand: String,
    pub board: Option<String>,
    pub opponents: Option<usize>,
    pub iterations: Option<usize>,
    pub batches: Option<usize>,
    pub seed: Option<u64>,
    pub json: bool,
}

pub fn handle_odds_command(
    args: OddsArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let overrides = Overrides {
        iterations: args.iterations,
        opponents: args.opponents,
        batches: args.batches,
        seed: args.seed,
    };
    let cfg = config::resolve(&overrides)?.config;

    let player: Hand = args.hand.parse()?;
    let board: Hand = match args.board.as_deref() {
        Some(s) if !s.trim().is_empty() => s.parse()?,
        _ => Hand::new(),
    };
    let known: Vec<_> = player.cards().iter().chain(board.cards()).copied().collect();
    let deck = Deck::without(&known);

    let dropped = cfg.iterations % cfg.batches;
    if dropped != 0 {
        ui::display_warning(
            err,
            &format!(
                "{} iterations do not split evenly into {} batches; {} will not run",
                cfg.iterations, cfg.batches, dropped
            ),
        )?;
    }

    debug!(hand = %player, board = %board, opponents = cfg.opponents, "running odds");
    let odds = Simulator::new(cfg.simulation_config()).run(
        &deck,
        &player,
        &board,
        cfg.opponents,
        cfg.iterations,
    )?;

    if args.json {
        write_json(out, &player, &board, &cfg, &odds)
    } else {
        write_text(out, &player, &board, &cfg, &odds)
    }
}

fn write_text(
    out: &mut dyn Write,
    player: &Hand,
    board: &Hand,
    cfg: &Config,
    odds: &PokerOdds,
) -> Result<(), CliError> {
    writeln!(
        out,
        "Hand: {}  Board: {}  Opponents: {}  Trials: {}",
        player,
        board,
        cfg.opponents,
        odds.total()
    )?;
    writeln!(out, "Win:  {:>8}", ui::format_percent(odds.win_percentage()))?;
    writeln!(out, "Draw: {:>8}", ui::format_percent(odds.draw_percentage()))?;
    writeln!(out, "Loss: {:>8}", ui::format_percent(odds.loss_percentage()))?;
    writeln!(out)?;
    for category in Category::ALL.iter().rev() {
        if odds.frequency(*category) == 0 {
            continue;
        }
        writeln!(
            out,
            "{:<16}{:>8}",
            category.name(),
            ui::format_percent(odds.percentage(*category))
        )?;
    }
    Ok(())
}

fn write_json(
    out: &mut dyn Write,
    player: &Hand,
    board: &Hand,
    cfg: &Config,
    odds: &PokerOdds,
) -> Result<(), CliError> {
    let categories: BTreeMap<&str, f64> = odds
        .percentages()
        .into_iter()
        .map(|(c, p)| (c.name(), p))
        .collect();
    let display = serde_json::json!({
        "hand": player.to_string(),
        "board": board.to_string(),
        "opponents": cfg.opponents,
        "iterations": cfg.iterations,
        "trials": odds.total(),
        "wins": odds.wins(),
        "draws": odds.draws(),
        "losses": odds.losses(),
        "win": odds.win_percentage(),
        "draw": odds.draw_percentage(),
        "loss": odds.loss_percentage(),
        "categories": categories,
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
