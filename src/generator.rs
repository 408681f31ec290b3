//! Randomized path generation.
//!
//! A path is grown from a random starting square by depth-first search over
//! the move graph of a [`PieceRule`], trying successors in shuffled order and
//! backing out of dead ends. Each attempt gets a fixed budget of steps shared
//! by its whole search tree; when the budget runs out the attempt is abandoned
//! and a fresh start square is drawn. After [`MAX_ATTEMPTS`] failed attempts
//! (by default) generation reports failure.
//!
//! The search is not exhaustive: a path of the requested length can exist and
//! still not be found within budget.
//!
//! ## Reproducibility
//!
//! All randomness comes from the generator's own [`fastrand::Rng`]. Seeding it
//! with [`PathGenerator::with_seed`] fixes the output: start squares are drawn
//! with `Rng::usize` and successors are ordered with `Rng::shuffle`
//! (Fisher-Yates). Paths are stable for a given seed and `fastrand` version,
//! but are not expected to match any other shuffling scheme.

use std::fmt;
use std::ops::Deref;
use std::time::{Duration, Instant};

use crate::board::{Board, Square};
use crate::constants::{BOARD_SIZE, MAX_ATTEMPTS, MAX_STEPS};
use crate::moves::{PieceRule, legal_moves};

/// Why a path could not be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// Board size is zero or too large
    InvalidBoardSize(usize),
    /// Requested length is zero or cannot fit on the board
    InvalidTargetLength { requested: usize, squares: usize },
    /// Every attempt ran out of moves or steps
    Exhausted { attempts: usize, steps: usize },
    /// The configured deadline passed during the search
    DeadlineExceeded,
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::InvalidBoardSize(n) => write!(f, "unsupported board size {n}"),
            GenerateError::InvalidTargetLength { requested, squares } => write!(
                f,
                "cannot place a path of {requested} squares on a board of {squares}"
            ),
            GenerateError::Exhausted { attempts, steps } => write!(
                f,
                "no path found after {attempts} attempts ({steps} steps)"
            ),
            GenerateError::DeadlineExceeded => write!(f, "path generation timed out"),
        }
    }
}

impl std::error::Error for GenerateError {}

/// Search limits for a [`PathGenerator`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Board size (NxN)
    pub board_size: usize,
    /// Start squares tried before giving up
    pub max_attempts: usize,
    /// Backtracking steps allowed per attempt
    pub max_steps: usize,
    /// Abort a generation call that runs longer than this
    pub timeout: Option<Duration>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            max_attempts: MAX_ATTEMPTS,
            max_steps: MAX_STEPS,
            timeout: None,
        }
    }
}

impl GeneratorConfig {
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    pub fn with_max_attempts(mut self, n: usize) -> Self {
        self.max_attempts = n;
        self
    }

    pub fn with_max_steps(mut self, n: usize) -> Self {
        self.max_steps = n;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A finished path: distinct squares, each one move from the previous.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path(Vec<Square>);

impl Path {
    pub fn squares(&self) -> &[Square] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Square> {
        self.0
    }

    /// Split off the first square as the mover's start; the rest are the
    /// collectibles. `None` for an empty path.
    pub fn split_mover(self) -> Option<SplitPath> {
        let mut squares = self.0.into_iter();
        let mover = squares.next()?;
        Some(SplitPath {
            mover,
            collectibles: squares.collect(),
        })
    }
}

impl Deref for Path {
    type Target = [Square];

    fn deref(&self) -> &[Square] {
        &self.0
    }
}

/// A path divided into the mover's starting square and the squares to collect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitPath {
    pub mover: Square,
    pub collectibles: Vec<Square>,
}

/// Work done by a successful generation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Attempts started, including the successful one
    pub attempts: usize,
    /// Backtracking steps summed over all attempts. An attempt that runs out
    /// of budget counts the step that overran it, so it reports `max_steps + 1`.
    pub steps: usize,
}

/// Outcome of one level of the backtracking search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Outcome {
    /// Path reached the target length
    Found,
    /// No successor leads to a full path
    DeadEnd,
    /// Step budget for this attempt is spent
    OutOfSteps,
    /// Deadline passed
    Cancelled,
}

/// State of a single attempt.
struct Search<'a> {
    rng: &'a mut fastrand::Rng,
    board: Board,
    rule: PieceRule,
    target: usize,
    max_steps: usize,
    deadline: Option<Instant>,
    steps: usize,
    path: Vec<Square>,
    on_path: Vec<bool>,
}

impl Search<'_> {
    fn push(&mut self, sq: Square) {
        self.path.push(sq);
        self.on_path[sq] = true;
    }

    fn pop(&mut self) {
        if let Some(sq) = self.path.pop() {
            self.on_path[sq] = false;
        }
    }

    fn backtrack(&mut self) -> Outcome {
        if self.path.len() >= self.target {
            return Outcome::Found;
        }

        self.steps += 1;
        if self.steps > self.max_steps {
            return Outcome::OutOfSteps;
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Outcome::Cancelled;
            }
        }

        let Some(&last) = self.path.last() else {
            return Outcome::DeadEnd;
        };
        let mut candidates = legal_moves(&self.board, last, self.rule);
        candidates.retain(|&sq| !self.on_path[sq]);
        self.rng.shuffle(&mut candidates);

        for next in candidates {
            self.push(next);
            match self.backtrack() {
                Outcome::DeadEnd => self.pop(),
                // Found keeps the square; budget outcomes abort the attempt
                outcome => return outcome,
            }
        }
        Outcome::DeadEnd
    }
}

/// Generates random paths with a seedable random source.
#[derive(Debug)]
pub struct PathGenerator {
    rng: fastrand::Rng,
    board: Board,
    config: GeneratorConfig,
}

impl PathGenerator {
    /// Create a generator seeded from system entropy.
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerateError> {
        Self::from_rng(fastrand::Rng::new(), config)
    }

    /// Create a generator with a fixed seed for reproducible paths.
    pub fn with_seed(seed: u64, config: GeneratorConfig) -> Result<Self, GenerateError> {
        Self::from_rng(fastrand::Rng::with_seed(seed), config)
    }

    /// Create a generator drawing from an existing random source.
    pub fn from_rng(rng: fastrand::Rng, config: GeneratorConfig) -> Result<Self, GenerateError> {
        let board =
            Board::new(config.board_size).ok_or(GenerateError::InvalidBoardSize(config.board_size))?;
        Ok(Self { rng, board, config })
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Reseed the random source.
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = fastrand::Rng::with_seed(seed);
    }

    /// Generate a path of exactly `target_length` squares.
    pub fn generate(&mut self, rule: PieceRule, target_length: usize) -> Result<Path, GenerateError> {
        self.generate_with_stats(rule, target_length)
            .map(|(path, _)| path)
    }

    /// Generate a path of `collectibles + 1` squares and split off the first
    /// as the mover's starting square.
    pub fn generate_split(
        &mut self,
        rule: PieceRule,
        collectibles: usize,
    ) -> Result<SplitPath, GenerateError> {
        let squares = self.board.area();
        let invalid = GenerateError::InvalidTargetLength {
            requested: collectibles,
            squares,
        };
        // The mover needs a square of its own
        if collectibles == 0 || collectibles >= squares - 1 {
            return Err(invalid);
        }
        let path = self.generate(rule, collectibles + 1)?;
        path.split_mover().ok_or(invalid)
    }

    /// Like [`generate`](Self::generate), also reporting how much work it took.
    pub fn generate_with_stats(
        &mut self,
        rule: PieceRule,
        target_length: usize,
    ) -> Result<(Path, GenerationStats), GenerateError> {
        let squares = self.board.area();
        if target_length == 0 || target_length >= squares {
            return Err(GenerateError::InvalidTargetLength {
                requested: target_length,
                squares,
            });
        }

        let deadline = self.config.timeout.map(|t| Instant::now() + t);
        let mut stats = GenerationStats::default();
        for _ in 0..self.config.max_attempts {
            stats.attempts += 1;
            let start = self.rng.usize(..squares);

            let mut search = Search {
                rng: &mut self.rng,
                board: self.board,
                rule,
                target: target_length,
                max_steps: self.config.max_steps,
                deadline,
                steps: 0,
                path: Vec::with_capacity(target_length),
                on_path: vec![false; squares],
            };
            search.push(start);
            let outcome = search.backtrack();
            stats.steps += search.steps;

            match outcome {
                Outcome::Found => return Ok((Path(search.path), stats)),
                Outcome::Cancelled => return Err(GenerateError::DeadlineExceeded),
                Outcome::DeadEnd | Outcome::OutOfSteps => {}
            }
        }

        Err(GenerateError::Exhausted {
            attempts: stats.attempts,
            steps: stats.steps,
        })
    }
}

/// Print generation statistics to stderr.
pub fn dump_stats(rule: PieceRule, stats: &GenerationStats) {
    eprintln!(
        "{rule}: attempts={} steps={} avg={:.1}",
        stats.attempts,
        stats.steps,
        stats.steps as f64 / stats.attempts.max(1) as f64
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::validate_path;

    fn seeded(seed: u64) -> PathGenerator {
        PathGenerator::with_seed(seed, GeneratorConfig::default()).unwrap()
    }

    #[test]
    fn test_generate_rook_path_is_valid() {
        let mut generator = seeded(42);
        let path = generator.generate(PieceRule::Rook, 5).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(validate_path(&generator.board(), PieceRule::Rook, &path), Ok(()));
    }

    #[test]
    fn test_target_length_preconditions() {
        let mut generator = seeded(1);
        for bad in [0, 64, 65, 1000] {
            assert_eq!(
                generator.generate_with_stats(PieceRule::Queen, bad),
                Err(GenerateError::InvalidTargetLength {
                    requested: bad,
                    squares: 64
                })
            );
        }
    }

    #[test]
    fn test_single_square_path_needs_no_search() {
        let mut generator = seeded(3);
        let (path, stats) = generator.generate_with_stats(PieceRule::Knight, 1).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(stats, GenerationStats { attempts: 1, steps: 0 });
    }

    #[test]
    fn test_invalid_board_size() {
        let config = GeneratorConfig::default().with_board_size(0);
        assert_eq!(
            PathGenerator::with_seed(0, config).unwrap_err(),
            GenerateError::InvalidBoardSize(0)
        );
    }

    #[test]
    fn test_step_budget_aborts_attempt() {
        // One step only expands the start square; the path can never grow past 2.
        let config = GeneratorConfig::default()
            .with_max_attempts(4)
            .with_max_steps(1);
        let mut generator = PathGenerator::with_seed(9, config).unwrap();
        assert_eq!(
            generator.generate(PieceRule::Queen, 3),
            Err(GenerateError::Exhausted { attempts: 4, steps: 8 })
        );
    }

    #[test]
    fn test_overrun_stops_sibling_branches() {
        // The second expansion overruns the budget. Unwinding the attempt stops
        // there; failing only that branch would expand every other queen move
        // from the start square and count a step for each.
        let config = GeneratorConfig::default()
            .with_max_attempts(1)
            .with_max_steps(1);
        for seed in 0..20 {
            let mut generator = PathGenerator::with_seed(seed, config.clone()).unwrap();
            assert_eq!(
                generator.generate(PieceRule::Queen, 3),
                Err(GenerateError::Exhausted { attempts: 1, steps: 2 }),
                "seed {seed}"
            );
        }
    }

    #[test]
    fn test_overrun_leaves_rng_where_it_stopped() {
        // An aborted attempt shuffles exactly once (the start square's moves),
        // so afterwards the generator's stream matches a fresh Rng that drew
        // one start square and shuffled one candidate list.
        let config = GeneratorConfig::default()
            .with_max_attempts(1)
            .with_max_steps(1);
        let mut generator = PathGenerator::with_seed(21, config).unwrap();
        assert!(generator.generate(PieceRule::Queen, 3).is_err());

        let board = Board::default();
        let mut rng = fastrand::Rng::with_seed(21);
        let start = rng.usize(..board.area());
        let mut candidates = legal_moves(&board, start, PieceRule::Queen);
        rng.shuffle(&mut candidates);

        assert_eq!(generator.rng.u64(..), rng.u64(..));
    }

    #[test]
    fn test_zero_attempts_fails() {
        let config = GeneratorConfig::default().with_max_attempts(0);
        let mut generator = PathGenerator::with_seed(9, config).unwrap();
        assert_eq!(
            generator.generate(PieceRule::Rook, 2),
            Err(GenerateError::Exhausted { attempts: 0, steps: 0 })
        );
    }

    #[test]
    fn test_knight_on_small_board_dead_ends() {
        // On 3x3 the centre square has no knight moves at all, and the
        // outer ring is a single 8-cycle.
        let config = GeneratorConfig::default().with_board_size(3);
        let mut generator = PathGenerator::with_seed(5, config).unwrap();
        let path = generator.generate(PieceRule::Knight, 8).unwrap();
        assert!(!path.contains(&4));
        assert_eq!(validate_path(&generator.board(), PieceRule::Knight, &path), Ok(()));
    }

    #[test]
    fn test_zero_timeout_cancels() {
        let config = GeneratorConfig::default().with_timeout(Duration::ZERO);
        let mut generator = PathGenerator::with_seed(7, config).unwrap();
        assert_eq!(
            generator.generate(PieceRule::Rook, 5),
            Err(GenerateError::DeadlineExceeded)
        );
    }

    #[test]
    fn test_split_mover() {
        let mut generator = seeded(11);
        let split = generator.generate_split(PieceRule::Rook, 5).unwrap();
        assert_eq!(split.collectibles.len(), 5);
        assert!(!split.collectibles.contains(&split.mover));

        let mut full = vec![split.mover];
        full.extend(&split.collectibles);
        assert_eq!(validate_path(&generator.board(), PieceRule::Rook, &full), Ok(()));
    }

    #[test]
    fn test_split_rejects_lengths_without_room_for_mover() {
        let mut generator = seeded(12);
        for bad in [0, 63, 64, usize::MAX] {
            assert_eq!(
                generator.generate_split(PieceRule::Rook, bad),
                Err(GenerateError::InvalidTargetLength {
                    requested: bad,
                    squares: 64
                })
            );
        }
    }

    #[test]
    fn test_split_mover_empty_path() {
        assert_eq!(Path(Vec::new()).split_mover(), None);
        assert_eq!(
            Path(vec![3]).split_mover(),
            Some(SplitPath {
                mover: 3,
                collectibles: vec![]
            })
        );
    }
}
