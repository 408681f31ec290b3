//! Mushroom-Path: a mushroom-picking board puzzle driven by chess moves.
//!
//! A run of mushrooms is scattered over the board so that each one is a
//! single chess move (rook, bishop, queen or knight) away from the previous
//! one. The player has to collect them in that order.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and generator budgets
//! - [`board`] - Square encoding and coordinate notation
//! - [`moves`] - Legal moves per piece rule
//! - [`generator`] - Randomized backtracking path generator
//! - [`game`] - Game session and click validation
//! - [`console`] - Text protocol for playing from a terminal
//!
//! ## Example
//!
//! ```
//! use mushroom_path::generator::{GeneratorConfig, PathGenerator};
//! use mushroom_path::moves::{PieceRule, validate_path};
//!
//! let mut generator = PathGenerator::with_seed(42, GeneratorConfig::default()).unwrap();
//! let path = generator.generate(PieceRule::Knight, 5).unwrap();
//!
//! assert_eq!(path.len(), 5);
//! assert!(validate_path(&generator.board(), PieceRule::Knight, &path).is_ok());
//! ```

pub mod board;
pub mod console;
pub mod constants;
pub mod game;
pub mod generator;
pub mod moves;
