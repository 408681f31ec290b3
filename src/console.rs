//! Line-oriented text protocol for playing a game from a terminal or script.
//!
//! Each request is one line: an optional numeric id, a command and its
//! arguments. Blank lines and lines starting with `#` are ignored. Responses
//! start with `=` on success or `?` on failure, followed by the id (if any),
//! the message, and a blank line.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the loop
//! - `piece <rule>` - Set the piece for the next game (rook, bishop, queen, knight)
//! - `length <n>` - Set the mushroom count for the next game
//! - `new [rule]` - Start a new game, optionally switching piece
//! - `click <coord>` - Click a square, e.g. `click c5`
//! - `show` - Render the board
//! - `status` - Show progress
//!
//! ## Example
//!
//! ```ignore
//! use mushroom_path::console::ConsoleEngine;
//! let mut engine = ConsoleEngine::new(game);
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use crate::game::{ClickOutcome, Game};
use crate::moves::PieceRule;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "click",
    "known_command",
    "length",
    "list_commands",
    "name",
    "new",
    "piece",
    "quit",
    "show",
    "status",
    "version",
];

/// Console engine state.
#[derive(Debug)]
pub struct ConsoleEngine {
    game: Game,
}

impl ConsoleEngine {
    pub fn new(game: Game) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop on stdin/stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run_with(&mut self, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

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

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&arg.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "piece" => {
                let Some(arg) = args.first() else {
                    return (true, self.game.rule().to_string());
                };
                match arg.parse::<PieceRule>() {
                    Ok(rule) => {
                        self.game.set_rule(rule);
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "length" => {
                let Some(arg) = args.first() else {
                    return (true, self.game.mushrooms().to_string());
                };
                let max = self.game.max_mushrooms();
                match arg.parse::<usize>() {
                    Ok(n) if (1..=max).contains(&n) => {
                        self.game.set_mushrooms(n);
                        (true, String::new())
                    }
                    Ok(n) if n > max => (false, format!("length {n} does not fit, maximum is {max}")),
                    _ => (false, format!("invalid length: {arg}")),
                }
            }

            "new" => {
                if let Some(arg) = args.first() {
                    match arg.parse::<PieceRule>() {
                        Ok(rule) => self.game.set_rule(rule),
                        Err(e) => return (false, e.to_string()),
                    }
                }
                match self.game.new_game() {
                    Ok(()) => (true, format!("start: click mushroom 1 ({})", self.game.rule())),
                    Err(e) => (false, format!("could not place mushrooms, try again: {e}")),
                }
            }

            "click" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let sq = match self.game.board().parse_coord(arg) {
                    Ok(sq) => sq,
                    Err(e) => return (false, e.to_string()),
                };
                match self.game.click(sq) {
                    ClickOutcome::Collected { next } => (
                        true,
                        format!("correct, next: {} / {}", next + 1, self.game.sequence().len()),
                    ),
                    ClickOutcome::Won => (true, "correct, all mushrooms collected".to_string()),
                    ClickOutcome::NotMushroom => (false, "wrong: no mushroom there".to_string()),
                    ClickOutcome::OutOfOrder { .. } => {
                        (false, "wrong: not the next mushroom".to_string())
                    }
                    ClickOutcome::NoGame => (false, "wrong: no game in progress".to_string()),
                }
            }

            "show" => (true, format!("\n{}", self.game)),

            "status" => (true, self.game.status()),

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
