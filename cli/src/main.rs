use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;

use triad_ai as ai;
use triad_core as core;
use triad_core::{Board, Cell, Event, Player, Status};

/// Plays two move strategies against each other on a board and deck loaded
/// from files, printing the board after every move.
#[derive(Debug, Parser)]
#[command(name = "triad")]
struct Args {
    /// Board layout file: a '<rows> <cols>' header, then rows of C (playable)
    /// and X (hole)
    #[arg(long)]
    board: PathBuf,

    /// Card database file: one '<name> <north> <east> <south> <west>' per
    /// line, values 1-9 or A
    #[arg(long)]
    deck: PathBuf,

    /// Strategy playing red
    #[arg(long, default_value = "flip-most", value_parser = parse_strategy)]
    red: ai::Strategy,

    /// Strategy playing blue
    #[arg(long, default_value = "corner", value_parser = parse_strategy)]
    blue: ai::Strategy,

    /// Battle comparison: normal, reverse or fallen-ace
    #[arg(long, default_value = "normal", value_parser = parse_comparison)]
    compare: core::ComparisonRule,

    /// Post-placement flip rule: none, same or plus
    #[arg(long, default_value = "none", value_parser = parse_flip_rule)]
    rule: core::FlipRule,
}

fn parse_strategy(s: &str) -> Result<ai::Strategy, String> {
    s.parse()
}

fn parse_comparison(s: &str) -> Result<core::ComparisonRule, String> {
    match s {
        "normal" => Ok(core::ComparisonRule::Normal),
        "reverse" => Ok(core::ComparisonRule::Reverse),
        "fallen-ace" => Ok(core::ComparisonRule::FallenAce(Box::new(
            core::ComparisonRule::Normal,
        ))),
        _ => Err(format!(
            "unknown comparison '{s}' (expected 'normal', 'reverse' or 'fallen-ace')"
        )),
    }
}

fn parse_flip_rule(s: &str) -> Result<core::FlipRule, String> {
    match s {
        "none" => Ok(core::FlipRule::None),
        "same" => Ok(core::FlipRule::Same),
        "plus" => Ok(core::FlipRule::Plus),
        _ => Err(format!(
            "unknown flip rule '{s}' (expected 'none', 'same' or 'plus')"
        )),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let board = core::loader::load_board(&args.board)
        .with_context(|| format!("loading board {}", args.board.display()))?;
    let deck = core::loader::load_deck(&args.deck)
        .with_context(|| format!("loading deck {}", args.deck.display()))?;

    let mut engine = core::GameEngine::new(board, deck)
        .comparison(args.compare)
        .flip_rule(args.rule);
    engine.start_game().context("starting the game")?;

    println!("{}", render(&engine.board()));

    while let Status::InProgress { turn } = engine.status() {
        let strategy = match turn {
            Player::Red => args.red,
            Player::Blue => args.blue,
        };
        let placement = strategy
            .choose(&engine)
            .ok_or_else(|| anyhow!("{turn} has no move to make"))?;

        let events = engine.place_card(placement)?;
        for event in &events {
            narrate(event);
        }
        println!("{}", render(&engine.board()));
    }

    let red = engine.score(Player::Red);
    let blue = engine.score(Player::Blue);
    println!(
        "final score: {} {red} - {blue} {}",
        "red".red(),
        "blue".blue()
    );
    match engine.winner() {
        Ok(Player::Red) => println!("{} wins", "red".red()),
        Ok(Player::Blue) => println!("{} wins", "blue".blue()),
        Err(_) => println!("the game is drawn"),
    }

    Ok(())
}

fn narrate(event: &Event) {
    match event {
        Event::CardPlaced { player, pos } => log::info!("{player} plays at {pos}"),
        Event::CardFlipped { pos, to, cause } => {
            println!("  {pos} flips to {to} ({cause:?})");
        }
        Event::TurnChanged { .. } => {}
        Event::GameOver { .. } => println!("  board full"),
    }
}

fn render(board: &Board) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for row in 0..board.rows() {
        for col in 0..board.cols() {
            let pos = core::Pos::new(row, col);
            let text = match board.cell(pos) {
                Ok(Cell::Hole) => format!(" {} ", "####".dimmed()),
                Ok(Cell::Empty) => " .... ".to_string(),
                Ok(Cell::Occupied(owned)) => {
                    let tag: String = owned.card.name.chars().take(4).collect();
                    let tag = format!("{tag:<4}");
                    match owned.owner {
                        Player::Red => format!(" {} ", tag.red()),
                        Player::Blue => format!(" {} ", tag.blue()),
                    }
                }
                Err(_) => unreachable!("render iterates in-bounds cells"),
            };
            let _ = write!(out, "{text}");
        }
        let _ = writeln!(out);
    }
    out
}
