//! Line-oriented text protocol for driving a game.
//!
//! Modeled on GTP: each request line is an optional numeric id followed by a
//! command and its arguments. Replies are `=id message` on success and
//! `?id message` on failure, each followed by a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version` - Engine identification
//! - `list_commands`, `known_command <cmd>` - Command discovery
//! - `quit` - Exit the loop
//! - `new_game` - Reset to the starting position
//! - `show` - Print the board
//! - `turn` - Side to move
//! - `winner` - `none`, `brown`, `white` or `draw`
//! - `select <row> <col>` - Click a square (select a piece or move the selected one)
//! - `play <row> <col> <row> <col>` - Move a piece in one step
//! - `genmove` - Let the AI move for the side to move
//! - `algorithm <minimax|mcts>`, `depth <n>`, `simulations <n>` - AI settings
//!
//! ## Example
//!
//! ```ignore
//! use checkers_ai::protocol::ProtocolEngine;
//! let mut engine = ProtocolEngine::new(Default::default());
//! engine.run();
//! ```

use std::io::{self, BufRead, Write};

use tracing::{info, warn};

use crate::ai::{AiConfig, Algorithm, choose_move};
use crate::board::Outcome;
use crate::game::{Game, Selection};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "algorithm",
    "depth",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "new_game",
    "play",
    "protocol_version",
    "quit",
    "select",
    "show",
    "simulations",
    "turn",
    "version",
    "winner",
];

/// Protocol engine state.
pub struct ProtocolEngine {
    /// Current game
    game: Game,
    /// AI settings used by `genmove`
    config: AiConfig,
    /// Random source for MCTS playouts
    rng: fastrand::Rng,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new(AiConfig::default())
    }
}

fn parse_square(row: &str, col: &str) -> Result<(usize, usize), String> {
    let row = row.parse::<usize>().map_err(|_| format!("invalid row: {row}"))?;
    let col = col.parse::<usize>().map_err(|_| format!("invalid column: {col}"))?;
    Ok((row, col))
}

fn describe_winner(outcome: Option<Outcome>) -> String {
    outcome.map_or_else(|| "none".to_string(), |o| o.to_string())
}

impl ProtocolEngine {
    pub fn new(config: AiConfig) -> Self {
        let rng = config.rng();
        Self {
            game: Game::new(),
            config,
            rng,
        }
    }

    /// Run the command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            if !success {
                warn!(%command, %message, "command failed");
            }

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(stdout, "{prefix}{id_str} {message}\n")?;
            stdout.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "1".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "new_game" => {
                self.game.reset();
                (true, String::new())
            }

            "show" => (true, format!("\n{}", self.game.board())),

            "turn" => (true, self.game.turn().to_string()),

            "winner" => (true, describe_winner(self.game.winner())),

            "select" => {
                let [row, col] = args else {
                    return (false, "expected: select <row> <col>".to_string());
                };
                let (row, col) = match parse_square(row, col) {
                    Ok(square) => square,
                    Err(e) => return (false, e),
                };
                match self.game.select(row, col) {
                    Ok(Selection::Selected(dests)) => {
                        let list: Vec<String> =
                            dests.iter().map(|(r, c)| format!("{r},{c}")).collect();
                        (true, format!("selected {}", list.join(" ")))
                    }
                    Ok(Selection::Moved {
                        captured,
                        turn_over,
                    }) => (
                        true,
                        format!(
                            "moved captured={captured} {}",
                            if turn_over { "done" } else { "continue" }
                        ),
                    ),
                    Ok(Selection::Cleared) => (true, "cleared".to_string()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "play" => {
                let [r1, c1, r2, c2] = args else {
                    return (false, "expected: play <row> <col> <row> <col>".to_string());
                };
                let (from, to) = match (parse_square(r1, c1), parse_square(r2, c2)) {
                    (Ok(from), Ok(to)) => (from, to),
                    (Err(e), _) | (_, Err(e)) => return (false, e),
                };
                match self.game.play(from, to) {
                    Ok(Selection::Moved { captured, .. }) => {
                        (true, format!("captured={captured}"))
                    }
                    Ok(_) => (false, "illegal move".to_string()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                if let Some(outcome) = self.game.winner() {
                    return (false, format!("game over: {outcome}"));
                }
                let side = self.game.turn();
                match choose_move(self.game.board(), side, &self.config, &mut self.rng) {
                    Some(board) => {
                        self.game.apply_board(board);
                        info!(%side, winner = %describe_winner(self.game.winner()), "genmove played");
                        (true, format!("\n{}", self.game.board()))
                    }
                    None => (false, "no move available".to_string()),
                }
            }

            "algorithm" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match name.parse::<Algorithm>() {
                    Ok(algorithm) => {
                        self.config.algorithm = algorithm;
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "depth" => match args.first().map(|a| a.parse::<u32>()) {
                Some(Ok(depth)) if depth > 0 => {
                    self.config.depth = depth;
                    (true, String::new())
                }
                Some(_) => (false, "invalid depth".to_string()),
                None => (false, "missing argument".to_string()),
            },

            "simulations" => match args.first().map(|a| a.parse::<usize>()) {
                Some(Ok(n)) if n > 0 => {
                    self.config.simulations = n;
                    (true, String::new())
                }
                Some(_) => (false, "invalid simulations".to_string()),
                None => (false, "missing argument".to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
