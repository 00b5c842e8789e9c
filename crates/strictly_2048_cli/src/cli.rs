//! Command-line interface for strictly_2048.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Strictly 2048 - play the sliding-tile game from the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_2048")]
#[command(about = "Checked 2048 engine with scripted and automatic play", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a scripted sequence of moves
    Play {
        /// Moves as letters: u/k, d/j, l/h, r (e.g. "llur")
        #[arg(short, long)]
        moves: String,

        /// Game settings
        #[command(flatten)]
        game: GameArgs,
    },

    /// Play random valid moves until the game ends
    Auto {
        /// Stop after this many turns
        #[arg(long, default_value = "10000")]
        max_turns: u32,

        /// Game settings
        #[command(flatten)]
        game: GameArgs,
    },

    /// Parse a preset value table and print its rows
    CheckPreset {
        /// Path to the preset file (.toml or line format)
        file: PathBuf,
    },
}

/// Settings shared by the playing commands. Flags override the config file.
#[derive(Args, Debug, Clone)]
pub struct GameArgs {
    /// Path to a TOML game configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Board width
    #[arg(long)]
    pub width: Option<usize>,

    /// Board height
    #[arg(long)]
    pub height: Option<usize>,

    /// Value that wins the game
    #[arg(long)]
    pub winning_value: Option<u32>,

    /// Keep playing after reaching the winning value
    #[arg(long)]
    pub keep_going: bool,

    /// Preset value table replacing the configured value source
    #[arg(long)]
    pub preset: Option<PathBuf>,
}
