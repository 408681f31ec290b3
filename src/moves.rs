//! Move rules for the supported chess pieces.
//!
//! Moves are computed on an empty board: sliding pieces are never blocked,
//! since mushrooms do not obstruct the mover.

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, ParseError, Square};
use crate::constants::{DIAGONALS, KNIGHT_OFFSETS};

/// The move pattern that connects consecutive squares of a path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceRule {
    Rook,
    Bishop,
    Queen,
    Knight,
}

impl PieceRule {
    /// All rules, in menu order.
    pub const ALL: [PieceRule; 4] = [
        PieceRule::Rook,
        PieceRule::Bishop,
        PieceRule::Queen,
        PieceRule::Knight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PieceRule::Rook => "Rook",
            PieceRule::Bishop => "Bishop",
            PieceRule::Queen => "Queen",
            PieceRule::Knight => "Knight",
        }
    }
}

impl fmt::Display for PieceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PieceRule {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PieceRule::ALL
            .into_iter()
            .find(|rule| rule.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::UnknownPieceRule(s.to_string()))
    }
}

/// Squares reachable from `sq` in one move of `rule`.
///
/// Never contains `sq` itself. The order is deterministic: rank then file
/// for rooks, ray by ray for bishops, rook moves before bishop moves for
/// queens, and [`KNIGHT_OFFSETS`] order for knights.
pub fn legal_moves(board: &Board, sq: Square, rule: PieceRule) -> Vec<Square> {
    if !board.contains(sq) {
        return Vec::new();
    }
    match rule {
        PieceRule::Rook => rook_moves(board, sq),
        PieceRule::Bishop => bishop_moves(board, sq),
        PieceRule::Queen => {
            let mut moves = rook_moves(board, sq);
            moves.extend(bishop_moves(board, sq));
            moves
        }
        PieceRule::Knight => KNIGHT_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| board.offset(sq, dr, dc))
            .collect(),
    }
}

fn rook_moves(board: &Board, sq: Square) -> Vec<Square> {
    let (row, col) = board.row_col(sq);
    let n = board.size();
    let mut moves = Vec::with_capacity(2 * (n - 1));
    moves.extend((0..n).filter(|&c| c != col).map(|c| board.idx(row, c)));
    moves.extend((0..n).filter(|&r| r != row).map(|r| board.idx(r, col)));
    moves
}

fn bishop_moves(board: &Board, sq: Square) -> Vec<Square> {
    let mut moves = Vec::new();
    for &(dr, dc) in &DIAGONALS {
        let mut cur = sq;
        while let Some(next) = board.offset(cur, dr, dc) {
            moves.push(next);
            cur = next;
        }
    }
    moves
}

/// Whether `to` is one move of `rule` away from `from`.
pub fn is_legal_move(board: &Board, from: Square, to: Square, rule: PieceRule) -> bool {
    if !board.contains(from) || !board.contains(to) || from == to {
        return false;
    }
    let (r1, c1) = board.row_col(from);
    let (r2, c2) = board.row_col(to);
    let dr = r1.abs_diff(r2);
    let dc = c1.abs_diff(c2);
    let straight = dr == 0 || dc == 0;
    let diagonal = dr == dc;
    match rule {
        PieceRule::Rook => straight,
        PieceRule::Bishop => diagonal,
        PieceRule::Queen => straight || diagonal,
        PieceRule::Knight => (dr == 1 && dc == 2) || (dr == 2 && dc == 1),
    }
}

/// Reasons a square sequence is not a valid path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Square index is off the board
    OffBoard { index: usize, square: Square },
    /// Square already appeared earlier in the path
    Repeated { index: usize, square: Square },
    /// Square is not one move away from its predecessor
    Unreachable { index: usize, from: Square, to: Square },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::OffBoard { index, square } => {
                write!(f, "step {index}: square {square} is off the board")
            }
            PathError::Repeated { index, square } => {
                write!(f, "step {index}: square {square} is visited twice")
            }
            PathError::Unreachable { index, from, to } => {
                write!(f, "step {index}: {to} is not reachable from {from}")
            }
        }
    }
}

impl std::error::Error for PathError {}

/// Check that `path` is duplicate-free and that every step is a legal move.
pub fn validate_path(board: &Board, rule: PieceRule, path: &[Square]) -> Result<(), PathError> {
    let mut seen = vec![false; board.area()];
    for (index, &square) in path.iter().enumerate() {
        if !board.contains(square) {
            return Err(PathError::OffBoard { index, square });
        }
        if seen[square] {
            return Err(PathError::Repeated { index, square });
        }
        seen[square] = true;
        if index > 0 {
            let from = path[index - 1];
            if !is_legal_move(board, from, square, rule) {
                return Err(PathError::Unreachable { index, from, to: square });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut v: Vec<Square>) -> Vec<Square> {
        v.sort_unstable();
        v
    }

    #[test]
    fn test_rook_counts() {
        let board = Board::default();
        for sq in board.squares() {
            assert_eq!(legal_moves(&board, sq, PieceRule::Rook).len(), 14);
        }
    }

    #[test]
    fn test_bishop_corner_and_center() {
        let board = Board::default();
        let corner = legal_moves(&board, board.idx(0, 0), PieceRule::Bishop);
        assert_eq!(sorted(corner), vec![9, 18, 27, 36, 45, 54, 63]);
        assert_eq!(legal_moves(&board, board.idx(3, 3), PieceRule::Bishop).len(), 13);
    }

    #[test]
    fn test_knight_corner_and_center() {
        let board = Board::default();
        let corner = legal_moves(&board, board.idx(0, 0), PieceRule::Knight);
        assert_eq!(sorted(corner), vec![board.idx(1, 2), board.idx(2, 1)]);
        assert_eq!(legal_moves(&board, board.idx(4, 4), PieceRule::Knight).len(), 8);
    }

    #[test]
    fn test_queen_is_rook_plus_bishop() {
        let board = Board::default();
        let sq = board.idx(2, 5);
        let mut expected = legal_moves(&board, sq, PieceRule::Rook);
        expected.extend(legal_moves(&board, sq, PieceRule::Bishop));
        assert_eq!(legal_moves(&board, sq, PieceRule::Queen), expected);
    }

    #[test]
    fn test_off_board_square_has_no_moves() {
        let board = Board::default();
        for rule in PieceRule::ALL {
            assert!(legal_moves(&board, 64, rule).is_empty());
        }
    }

    #[test]
    fn test_single_square_board() {
        let board = Board::new(1).unwrap();
        for rule in PieceRule::ALL {
            assert!(legal_moves(&board, 0, rule).is_empty());
        }
    }

    #[test]
    fn test_parse_piece_rule() {
        assert_eq!("rook".parse::<PieceRule>(), Ok(PieceRule::Rook));
        assert_eq!(" KNIGHT ".parse::<PieceRule>(), Ok(PieceRule::Knight));
        assert_eq!(
            "Pawn".parse::<PieceRule>(),
            Err(ParseError::UnknownPieceRule("Pawn".to_string()))
        );
    }

    #[test]
    fn test_validate_path_errors() {
        let board = Board::default();
        assert_eq!(validate_path(&board, PieceRule::Rook, &[0, 7, 63]), Ok(()));
        assert_eq!(
            validate_path(&board, PieceRule::Rook, &[0, 7, 0]),
            Err(PathError::Repeated { index: 2, square: 0 })
        );
        assert_eq!(
            validate_path(&board, PieceRule::Rook, &[0, 9]),
            Err(PathError::Unreachable { index: 1, from: 0, to: 9 })
        );
        assert_eq!(
            validate_path(&board, PieceRule::Knight, &[0, 70]),
            Err(PathError::OffBoard { index: 1, square: 70 })
        );
        assert_eq!(validate_path(&board, PieceRule::Queen, &[]), Ok(()));
    }
}
