//! Interactive play session.
//!
//! A session owns one game and one store and applies one command line at a
//! time. Every outcome, including a rejected move, is reported as text; the
//! session itself never fails.

use crate::config::Mode;
use crate::display::{render_game, render_match};
use derive_more::Display;
use tictactactic_core::{
    KeyValueStore, MetaMatch, MoveError, PersistError, Persistable, Position, StoreError,
    UltimateGame, load, save,
};
use tracing::{debug, info, instrument, warn};

const HELP: &str = "\
Commands:
  move <board> <cell>          play in an ultimate game
  move <game> <board> <cell>   play in the hardcore duel
  select <game>                commit to a game (hardcore, free choice only)
  start                        start the ultimate game without moving
  moves                        list the legal moves
  show [game]                  print the board (or one game of the duel)
  save | load                  save or restore the current variant
  reset                        start over
  help | quit
Indices are 0-8 or labels such as 'center' or 'bottom-right'.";

/// The game being played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Game {
    /// A single ultimate game.
    Ultimate(UltimateGame),
    /// A Hardcore Duel.
    Hardcore(MetaMatch),
}

impl Game {
    /// Creates a fresh game of `mode`.
    pub fn new(mode: Mode) -> Self {
        match mode {
            Mode::Ultimate => Game::Ultimate(UltimateGame::new()),
            Mode::Hardcore => Game::Hardcore(MetaMatch::new()),
        }
    }

    /// Returns the variant.
    pub fn mode(&self) -> Mode {
        match self {
            Game::Ultimate(_) => Mode::Ultimate,
            Game::Hardcore(_) => Mode::Hardcore,
        }
    }

    /// Renders the game as text.
    pub fn render(&self) -> String {
        match self {
            Game::Ultimate(game) => render_game(game),
            Game::Hardcore(duel) => match duel.active_game().and_then(|index| duel.game(index)) {
                Some(game) => format!("{}\n\n{}", render_match(duel), render_game(game)),
                None => render_match(duel),
            },
        }
    }
}

/// Store key of a variant's saved game.
pub fn store_key(mode: Mode) -> &'static str {
    match mode {
        Mode::Ultimate => UltimateGame::STORE_KEY,
        Mode::Hardcore => MetaMatch::STORE_KEY,
    }
}

/// Loads the saved game of `mode`, `Ok(None)` when nothing is saved.
pub fn saved_game<S: KeyValueStore>(mode: Mode, store: &S) -> Result<Option<Game>, PersistError> {
    Ok(match mode {
        Mode::Ultimate => load::<UltimateGame, _>(store)?.map(Game::Ultimate),
        Mode::Hardcore => load::<MetaMatch, _>(store)?.map(Game::Hardcore),
    })
}

/// Deletes the saved game of `mode`.
pub fn clear_saved<S: KeyValueStore>(mode: Mode, store: &mut S) -> Result<(), StoreError> {
    store.remove(store_key(mode))
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play at the given indices.
    Move(Vec<usize>),
    /// Commit to a game of the duel.
    Select(usize),
    /// Start the ultimate game.
    Start,
    /// List legal moves.
    Moves,
    /// Print the game, or one game of the duel.
    Show(Option<usize>),
    /// Save the game.
    Save,
    /// Replace the game with the saved one.
    Load,
    /// Start over.
    Reset,
    /// Print the command list.
    Help,
    /// Leave the session.
    Quit,
}

/// A command line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum CommandError {
    /// Nothing was typed.
    #[display("Empty command")]
    Empty,
    /// The command word is not known.
    #[display("Unknown command '{}' (try 'help')", _0)]
    Unknown(String),
    /// An argument is not a position.
    #[display("'{}' is not a position (use 0-8 or a label such as 'center')", _0)]
    BadPosition(String),
    /// Wrong number of arguments.
    #[display("Usage: {}", _0)]
    Usage(&'static str),
}

impl std::error::Error for CommandError {}

fn parse_position(arg: &str) -> Result<usize, CommandError> {
    Position::from_label_or_number(arg)
        .map(Position::to_index)
        .ok_or_else(|| CommandError::BadPosition(arg.to_string()))
}

impl Command {
    /// Parses one command line.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let word = words.next().ok_or(CommandError::Empty)?.to_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match (word.as_str(), args.as_slice()) {
            ("move" | "m", []) => return Err(CommandError::Usage("move <board> <cell>")),
            ("move" | "m", args) => Command::Move(
                args.iter()
                    .map(|arg| parse_position(arg))
                    .collect::<Result<_, _>>()?,
            ),
            ("select", [game]) => Command::Select(parse_position(game)?),
            ("select", _) => return Err(CommandError::Usage("select <game>")),
            ("show", []) => Command::Show(None),
            ("show", [game]) => Command::Show(Some(parse_position(game)?)),
            ("show", _) => return Err(CommandError::Usage("show [game]")),
            ("start", []) => Command::Start,
            ("moves", []) => Command::Moves,
            ("save", []) => Command::Save,
            ("load", []) => Command::Load,
            ("reset", []) => Command::Reset,
            ("help" | "?", _) => Command::Help,
            ("quit" | "exit" | "q", []) => Command::Quit,
            (other, _) => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

/// What the caller does after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Print the text and read the next command.
    Continue(String),
    /// End the session.
    Quit,
}

/// An interactive session over a key-value store.
#[derive(Debug)]
pub struct Session<S> {
    game: Game,
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    /// Starts a fresh game of `mode`.
    pub fn new(mode: Mode, store: S) -> Self {
        Self {
            game: Game::new(mode),
            store,
        }
    }

    /// Returns the current game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Prompt naming the player to move.
    pub fn prompt(&self) -> String {
        let turn = match &self.game {
            Game::Ultimate(game) => game.turn(),
            Game::Hardcore(duel) => duel.turn(),
        };
        format!("{} ({})> ", self.game.mode(), turn)
    }

    /// Parses and applies one command line.
    #[instrument(skip(self), fields(mode = %self.game.mode()))]
    pub fn handle(&mut self, line: &str) -> Flow {
        match Command::parse(line) {
            Ok(command) => self.execute(command),
            Err(err) => {
                debug!(error = %err, "Unparsed command");
                Flow::Continue(err.to_string())
            }
        }
    }

    /// Applies a parsed command.
    pub fn execute(&mut self, command: Command) -> Flow {
        let text = match command {
            Command::Move(indices) => self.play(&indices),
            Command::Select(index) => self.select(index),
            Command::Start => self.start(),
            Command::Moves => self.list_moves(),
            Command::Show(None) => self.game.render(),
            Command::Show(Some(index)) => self.show_game(index),
            Command::Save => self.save(),
            Command::Load => self.load(),
            Command::Reset => {
                self.game = Game::new(self.game.mode());
                info!("Game reset");
                format!("New game.\n{}", self.game.render())
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Flow::Quit,
        };
        Flow::Continue(text)
    }

    fn play(&mut self, indices: &[usize]) -> String {
        let result = match (&mut self.game, indices) {
            (Game::Ultimate(game), &[board, cell]) => {
                let player = game.turn();
                game.apply_move(board, cell, player).map(|report| {
                    let mut text = format!("{} plays board {} cell {}.", player, board, cell);
                    if let Some(outcome) = report.board_outcome {
                        text.push_str(&format!("\nBoard {}: {}.", board, outcome));
                    }
                    text
                })
            }
            (Game::Hardcore(duel), &[game, board, cell]) => {
                let player = duel.turn();
                duel.apply_move(game, board, cell, player).map(|report| {
                    let mut text = format!(
                        "{} plays game {} board {} cell {}.",
                        player, game, board, cell
                    );
                    if let Some(outcome) = report.game.board_outcome {
                        text.push_str(&format!("\nBoard {}: {}.", board, outcome));
                    }
                    if let Some(outcome) = report.game.game_outcome {
                        text.push_str(&format!("\nGame {}: {}.", game, outcome));
                    }
                    text
                })
            }
            (Game::Ultimate(_), _) => return CommandError::Usage("move <board> <cell>").to_string(),
            (Game::Hardcore(_), _) => {
                return CommandError::Usage("move <game> <board> <cell>").to_string();
            }
        };
        match result {
            Ok(text) => format!("{}\n{}", text, self.game.render()),
            Err(err) => rejected(err),
        }
    }

    fn select(&mut self, index: usize) -> String {
        let result = match &mut self.game {
            Game::Hardcore(duel) => duel.select_game(index),
            Game::Ultimate(_) => return "select only applies to the hardcore duel".to_string(),
        };
        match result {
            Ok(()) => format!("Playing in game {}.\n{}", index, self.game.render()),
            Err(err) => rejected(err),
        }
    }

    fn start(&mut self) -> String {
        match &mut self.game {
            Game::Ultimate(game) => game.start(),
            Game::Hardcore(_) => return "Pick a game with 'select <game>' or just move".to_string(),
        }
        format!("Game started.\n{}", self.game.render())
    }

    fn list_moves(&self) -> String {
        let groups: Vec<(String, usize)> = match &self.game {
            Game::Ultimate(game) => game
                .legal_moves()
                .into_iter()
                .map(|mov| (format!("board {}", mov.board), mov.cell))
                .collect(),
            Game::Hardcore(duel) => duel
                .legal_moves()
                .into_iter()
                .map(|mov| (format!("game {} board {}", mov.game, mov.board), mov.cell))
                .collect(),
        };
        if groups.is_empty() {
            return "No legal moves: the game is over.".to_string();
        }

        let mut lines: Vec<String> = Vec::new();
        let mut current: Option<&str> = None;
        for (label, cell) in &groups {
            if current == Some(label.as_str())
                && let Some(line) = lines.last_mut()
            {
                line.push_str(&format!(" {}", cell));
            } else {
                lines.push(format!("{}: {}", label, cell));
                current = Some(label.as_str());
            }
        }
        format!("{} legal moves\n{}", groups.len(), lines.join("\n"))
    }

    fn show_game(&self, index: usize) -> String {
        match &self.game {
            Game::Hardcore(duel) => match duel.game(index) {
                Some(game) => format!("Game {}\n{}", index, render_game(game)),
                None => MoveError::IndexOutOfRange(index).to_string(),
            },
            Game::Ultimate(_) => "show <game> only applies to the hardcore duel".to_string(),
        }
    }

    fn save(&mut self) -> String {
        let result = match &self.game {
            Game::Ultimate(game) => save(&mut self.store, game),
            Game::Hardcore(duel) => save(&mut self.store, duel),
        };
        match result {
            Ok(()) => "Game saved successfully!".to_string(),
            Err(err) => {
                warn!(error = %err, "Save failed");
                format!("Save failed: {}", err)
            }
        }
    }

    fn load(&mut self) -> String {
        match saved_game(self.game.mode(), &self.store) {
            Ok(Some(game)) => {
                self.game = game;
                format!("Game loaded successfully!\n{}", self.game.render())
            }
            Ok(None) => "No saved game found!".to_string(),
            Err(PersistError::Deserialization(err)) => {
                warn!(error = %err, "Saved game rejected");
                "No valid saved game.".to_string()
            }
            Err(err) => {
                warn!(error = %err, "Load failed");
                format!("Load failed: {}", err)
            }
        }
    }
}

fn rejected(err: MoveError) -> String {
    debug!(error = %err, "Move rejected");
    format!("Illegal move: {}", err)
}
