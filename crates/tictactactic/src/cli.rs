//! Command-line interface for tictactactic.

use crate::config::Mode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// TicTacTactic - Ultimate tic-tac-toe and the Hardcore Duel in a terminal
#[derive(Parser, Debug)]
#[command(name = "tictactactic")]
#[command(about = "Ultimate tic-tac-toe and the Hardcore Duel", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "tictactactic.toml")]
    pub config: PathBuf,

    /// Override the directory saved games are written to
    #[arg(long, global = true)]
    pub save_dir: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game on stdin/stdout
    Play {
        /// Game variant (defaults to the configured mode)
        #[arg(short, long, value_enum)]
        mode: Option<Mode>,
    },

    /// Print the saved game of a variant
    Show {
        /// Game variant
        #[arg(short, long, value_enum)]
        mode: Mode,
    },

    /// Delete the saved game of a variant
    Clear {
        /// Game variant
        #[arg(short, long, value_enum)]
        mode: Mode,
    },
}
