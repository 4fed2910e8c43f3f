//! # Connect Four TD
//!
//! A Connect Four engine with a tabular TD(0) learner that trains against
//! minimax opponents of adjustable strength.
//!
//! ## Modules
//!
//! - [`game`]: board, gravity and four-in-a-row detection, game state
//! - [`ai`]: agent trait, heuristic evaluator, minimax search, TD learner
//! - [`storage`]: JSON persistence of the value table and game statistics
//! - [`training`]: game orchestration, trainer loop, rolling metrics
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod storage;
pub mod training;
