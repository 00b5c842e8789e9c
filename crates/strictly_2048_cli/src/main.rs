//! Strictly 2048 - terminal driver
//!
//! Scripted play, automatic play and preset checking on top of the engine.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command, GameArgs};
use strictly_2048::{Direction, GameConfig, GameRng, GameSession, PresetValues, ValuesConfig};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { moves, game } => run_play(&moves, &game),
        Command::Auto { max_turns, game } => run_auto(max_turns, &game),
        Command::CheckPreset { file } => run_check_preset(&file),
    }
}

/// Builds the game configuration: config file first, then flag overrides.
#[instrument(skip(args))]
fn load_config(args: &GameArgs) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => GameConfig::default(),
    };

    if let Some(seed) = args.seed {
        config = config.with_seed(Some(seed));
    }
    if let Some(width) = args.width {
        config = config.with_width(width);
    }
    if let Some(height) = args.height {
        config = config.with_height(height);
    }
    if let Some(winning_value) = args.winning_value {
        config = config.with_winning_value(winning_value);
    }
    if args.keep_going {
        config = config.with_continue_after_victory(true);
    }
    if let Some(path) = &args.preset {
        config = config.with_values(ValuesConfig::Preset { path: path.clone() });
    }

    debug!(?config, "Resolved configuration");
    Ok(config)
}

/// Parses a move script into directions.
fn parse_moves(script: &str) -> Result<Vec<Direction>> {
    script
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| {
            Direction::from_label(&c.to_string())
                .with_context(|| format!("Unknown move '{c}', expected one of u/d/l/r or k/j/h"))
        })
        .collect()
}

/// Plays a scripted sequence of moves, printing the board after each turn.
#[instrument(skip(args))]
fn run_play(script: &str, args: &GameArgs) -> Result<()> {
    let directions = parse_moves(script)?;
    if directions.is_empty() {
        bail!("No moves given");
    }

    let config = load_config(args)?;
    let mut session = GameSession::from_config(&config)?;
    info!(
        seed = session.seed(),
        moves = directions.len(),
        "Starting scripted game"
    );
    println!("{}\n", session);

    for direction in directions {
        if session.is_over() {
            info!(
                status = %session.status(),
                "Game over, ignoring remaining moves"
            );
            break;
        }
        let turn = session.play(direction)?;
        let verdict = if turn.result.is_valid() {
            ""
        } else {
            " (no effect)"
        };
        println!("> {direction}{verdict}");
        println!("{}\n", session);
    }

    print_summary(&session);
    Ok(())
}

/// Plays random valid moves until the game ends or the turn limit is reached.
#[instrument(skip(args))]
fn run_auto(max_turns: u32, args: &GameArgs) -> Result<()> {
    let config = load_config(args)?;
    let mut session = GameSession::from_config(&config)?;
    let mut picker = GameRng::new(Some(session.seed().wrapping_add(1)));
    info!(seed = session.seed(), max_turns, "Starting automatic game");

    let mut turns = 0;
    while turns < max_turns && !session.is_over() {
        let valid: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&d| session.is_valid_move(d))
            .collect();
        if valid.is_empty() {
            break;
        }
        let direction = valid[picker.index(valid.len())];
        debug!(turn = turns, %direction, "Auto move");
        session.play(direction)?;
        turns += 1;
    }

    println!("{}\n", session);
    print_summary(&session);
    Ok(())
}

/// Parses a preset table and prints its rows.
#[instrument]
fn run_check_preset(file: &std::path::Path) -> Result<()> {
    let preset = PresetValues::from_file(file)?;
    for row in preset.rows() {
        let choices = row
            .values
            .iter()
            .map(|c| format!("{}({})", c.value, c.chance))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{:>6} | {}", row.max, choices);
    }
    info!(rows = preset.rows().len(), "Preset is valid");
    Ok(())
}

fn print_summary<V>(session: &GameSession<V>)
where
    V: strictly_2048::ValueSource,
{
    println!(
        "status: {}  score: {}  max: {}  moves: {}  seed: {}",
        session.status(),
        session.score(),
        session.max_value(),
        session.moves_count(),
        session.seed()
    );
}
