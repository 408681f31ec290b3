//! Game session: mushrooms placed along a generated path, collected in order.
//!
//! The session owns the progress index into the path. A click is correct
//! exactly when it hits `sequence[current]`; a correct click collects that
//! mushroom and advances the index, anything else leaves the state untouched.

use std::collections::HashMap;
use std::fmt;

use crate::board::{Board, Square};
use crate::constants::MUSHROOMS_COUNT;
use crate::generator::{GenerateError, PathGenerator};
use crate::moves::PieceRule;

/// Result of clicking a square.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Correct mushroom; `next` is the new progress index
    Collected { next: usize },
    /// Correct mushroom, and it was the last one
    Won,
    /// Square holds no uncollected mushroom
    NotMushroom,
    /// A mushroom, but not the next one in the sequence
    OutOfOrder { index: usize },
    /// No game is in progress
    NoGame,
}

impl ClickOutcome {
    pub fn is_correct(self) -> bool {
        matches!(self, ClickOutcome::Collected { .. } | ClickOutcome::Won)
    }
}

/// A single-player session.
#[derive(Debug)]
pub struct Game {
    generator: PathGenerator,
    rule: PieceRule,
    mushrooms: usize,
    with_mover: bool,
    sequence: Vec<Square>,
    pos_to_index: HashMap<Square, usize>,
    start: Option<Square>,
    current: usize,
}

impl Game {
    /// Create a session with no game in progress.
    pub fn new(generator: PathGenerator) -> Self {
        Self {
            generator,
            rule: PieceRule::Rook,
            mushrooms: MUSHROOMS_COUNT,
            with_mover: false,
            sequence: Vec::new(),
            pos_to_index: HashMap::new(),
            start: None,
            current: 0,
        }
    }

    /// Place a visible piece on the square before the first mushroom.
    pub fn with_mover(mut self, enabled: bool) -> Self {
        self.with_mover = enabled;
        self
    }

    pub fn board(&self) -> Board {
        self.generator.board()
    }

    pub fn rule(&self) -> PieceRule {
        self.rule
    }

    /// Choose the piece for the next game.
    pub fn set_rule(&mut self, rule: PieceRule) {
        self.rule = rule;
    }

    pub fn mushrooms(&self) -> usize {
        self.mushrooms
    }

    /// Choose the mushroom count for the next game.
    pub fn set_mushrooms(&mut self, n: usize) {
        self.mushrooms = n;
    }

    /// Largest mushroom count that fits on the board. A path must leave at
    /// least one square free, and the mover takes one more.
    pub fn max_mushrooms(&self) -> usize {
        let free = self.board().area() - 1;
        if self.with_mover {
            free.saturating_sub(1)
        } else {
            free
        }
    }

    /// Mushroom squares in collection order.
    pub fn sequence(&self) -> &[Square] {
        &self.sequence
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_active(&self) -> bool {
        !self.sequence.is_empty()
    }

    pub fn is_won(&self) -> bool {
        self.is_active() && self.current >= self.sequence.len()
    }

    /// Where the mover stands: its start square, or the last mushroom
    /// collected. `None` unless the mover is enabled and a game is active.
    pub fn mover(&self) -> Option<Square> {
        if !self.with_mover || !self.is_active() {
            return None;
        }
        match self.current {
            0 => self.start,
            n => Some(self.sequence[n - 1]),
        }
    }

    /// Start a new game with the current piece and mushroom count.
    ///
    /// On failure the session is left with no game in progress.
    pub fn new_game(&mut self) -> Result<(), GenerateError> {
        self.sequence.clear();
        self.pos_to_index.clear();
        self.start = None;
        self.current = 0;

        if self.with_mover {
            let split = self.generator.generate_split(self.rule, self.mushrooms)?;
            self.start = Some(split.mover);
            self.sequence = split.collectibles;
        } else {
            self.sequence = self.generator.generate(self.rule, self.mushrooms)?.into_vec();
        }
        self.pos_to_index = self
            .sequence
            .iter()
            .enumerate()
            .map(|(i, &sq)| (sq, i))
            .collect();
        Ok(())
    }

    /// Handle a click on `sq`.
    pub fn click(&mut self, sq: Square) -> ClickOutcome {
        if !self.is_active() {
            return ClickOutcome::NoGame;
        }
        let Some(&index) = self.pos_to_index.get(&sq) else {
            return ClickOutcome::NotMushroom;
        };
        if index != self.current {
            return ClickOutcome::OutOfOrder { index };
        }

        self.pos_to_index.remove(&sq);
        self.current += 1;
        if self.current >= self.sequence.len() {
            ClickOutcome::Won
        } else {
            ClickOutcome::Collected { next: self.current }
        }
    }

    /// One-line status for display.
    pub fn status(&self) -> String {
        if !self.is_active() {
            return "no game in progress".to_string();
        }
        if self.is_won() {
            return "all mushrooms collected".to_string();
        }
        format!(
            "{}: next {} / {}",
            self.rule,
            self.current + 1,
            self.sequence.len()
        )
    }

    fn glyph(&self, sq: Square) -> char {
        if self.mover() == Some(sq) {
            return match self.rule {
                PieceRule::Rook => 'R',
                PieceRule::Bishop => 'B',
                PieceRule::Queen => 'Q',
                PieceRule::Knight => 'N',
            };
        }
        match self.pos_to_index.get(&sq) {
            Some(_) => 'M',
            None if self.sequence[..self.current].contains(&sq) => 'o',
            None => '.',
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.board().render(|sq| self.glyph(sq)))
    }
}
