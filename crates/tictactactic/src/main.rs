//! TicTacTactic - Terminal front end
//!
//! Plays Ultimate tic-tac-toe or the Hardcore Duel on stdin/stdout and keeps
//! saved games in a directory of JSON files.

#![warn(missing_docs)]

mod cli;
mod config;
mod display;
mod file_store;
mod session;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use config::{Config, Mode};
use file_store::FileStore;
use session::{Flow, Session};
use std::io::{BufRead, Write};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::load_or_default(&cli.config)?;
    let config = match cli.save_dir {
        Some(dir) => config.with_save_dir(dir),
        None => config,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let store = FileStore::new(config.save_dir().clone());
    match cli.command {
        Command::Play { mode } => run_play(mode.unwrap_or(*config.default_mode()), store),
        Command::Show { mode } => run_show(mode, &store),
        Command::Clear { mode } => run_clear(mode, store),
    }
}

/// Run an interactive session until `quit` or end of input
#[instrument(skip(store), fields(dir = %store.dir().display()))]
fn run_play(mode: Mode, store: FileStore) -> Result<()> {
    info!("Starting session");
    let mut session = Session::new(mode, store);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    writeln!(stdout, "{}\nType 'help' for commands.", session.game().render())?;
    loop {
        write!(stdout, "{}", session.prompt())?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        match session.handle(&line) {
            Flow::Continue(text) => writeln!(stdout, "{}", text)?,
            Flow::Quit => break,
        }
    }

    info!("Session ended");
    Ok(())
}

/// Print the saved game of a variant
fn run_show(mode: Mode, store: &FileStore) -> Result<()> {
    match session::saved_game(mode, store) {
        Ok(Some(game)) => println!("{}", game.render()),
        Ok(None) => println!("No saved {} game.", mode),
        Err(tictactactic_core::PersistError::Deserialization(err)) => {
            tracing::warn!(error = %err, "Saved game rejected");
            println!("No valid saved game.");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

/// Delete the saved game of a variant
fn run_clear(mode: Mode, mut store: FileStore) -> Result<()> {
    session::clear_saved(mode, &mut store)?;
    println!("Cleared saved {} game.", mode);
    Ok(())
}
