//! Board geometry: square encoding, bounds checks, and coordinate notation.
//!
//! A square is a single index `row * size + column`, with row 0 at the top.
//! Coordinates are written algebraically: a column letter and a rank counted
//! from the bottom row, so on the standard board index 0 is `a8` and index 63
//! is `h1`.

use std::fmt;

use crate::constants::{BOARD_SIZE, MAX_BOARD_SIZE};

/// A square on the board, as an index into the row-major cell array.
pub type Square = usize;

/// Error produced when text input cannot be turned into a board value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Coordinate is malformed or off the board
    BadCoordinate(String),
    /// Name does not match any known piece rule
    UnknownPieceRule(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::BadCoordinate(s) => write!(f, "invalid coordinate: {s:?}"),
            ParseError::UnknownPieceRule(s) => write!(f, "unknown piece rule: {s:?}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Square board geometry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self { size: BOARD_SIZE }
    }
}

impl Board {
    /// Create a board of `size`x`size` squares, or `None` if the size is
    /// zero or larger than [`MAX_BOARD_SIZE`].
    pub fn new(size: usize) -> Option<Self> {
        (1..=MAX_BOARD_SIZE).contains(&size).then_some(Self { size })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of squares.
    #[inline]
    pub fn area(&self) -> usize {
        self.size * self.size
    }

    #[inline]
    pub fn contains(&self, sq: Square) -> bool {
        sq < self.area()
    }

    #[inline]
    pub fn idx(&self, row: usize, col: usize) -> Square {
        row * self.size + col
    }

    #[inline]
    pub fn row_col(&self, sq: Square) -> (usize, usize) {
        (sq / self.size, sq % self.size)
    }

    /// Step from `sq` by a (row, column) delta, staying on the board.
    pub fn offset(&self, sq: Square, dr: isize, dc: isize) -> Option<Square> {
        let (row, col) = self.row_col(sq);
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        (r < self.size && c < self.size).then(|| self.idx(r, c))
    }

    /// Iterate over every square in index order.
    pub fn squares(&self) -> impl Iterator<Item = Square> {
        0..self.area()
    }

    /// Parse a coordinate such as `"c5"` (case-insensitive).
    pub fn parse_coord(&self, s: &str) -> Result<Square, ParseError> {
        let bad = || ParseError::BadCoordinate(s.to_string());
        let lower = s.trim().to_ascii_lowercase();
        let mut chars = lower.chars();
        let file = chars.next().ok_or_else(bad)?;
        if !file.is_ascii_lowercase() {
            return Err(bad());
        }
        let col = (file as u8 - b'a') as usize;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        let rank: usize = digits.parse().map_err(|_| bad())?;
        if col >= self.size || rank == 0 || rank > self.size {
            return Err(bad());
        }
        Ok(self.idx(self.size - rank, col))
    }

    /// Convert a square to its coordinate string.
    pub fn str_coord(&self, sq: Square) -> String {
        let (row, col) = self.row_col(sq);
        let file = (b'a' + col as u8) as char;
        format!("{file}{}", self.size - row)
    }

    /// Render the board as text, asking `cell` for the glyph of each square.
    pub fn render(&self, cell: impl Fn(Square) -> char) -> String {
        let mut out = String::new();
        for row in 0..self.size {
            out.push_str(&format!("{:>2} ", self.size - row));
            for col in 0..self.size {
                out.push(cell(self.idx(row, col)));
                out.push(' ');
            }
            out.push('\n');
        }
        out.push_str("   ");
        for col in 0..self.size {
            out.push((b'a' + col as u8) as char);
            out.push(' ');
        }
        out.push('\n');
        out
    }
}
