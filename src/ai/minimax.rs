//! Depth-limited minimax with alpha-beta pruning, and the scripted opponent
//! built on it.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::AgentError;
use crate::game::{Board, Mark};

use super::agent::Agent;
use super::heuristic::{Heuristic, WindowHeuristic};

/// Value of a position won by the root mark. Dominates every heuristic score.
pub const WIN_SCORE: i32 = 1_000_000;

/// Scripted opponent settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched per move
    pub depth: usize,
    /// Mistake probability of the semi-perfect opponent
    pub semi_error_prob: f64,
    /// Mistake probability of the weak opponent
    pub weak_error_prob: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: 4,
            semi_error_prob: 0.25,
            weak_error_prob: 0.60,
        }
    }
}

/// Outcome of a search: the chosen column (absent at a leaf root) and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub column: Option<usize>,
    pub value: i32,
}

/// Minimax search over alternating max/min levels for one root mark.
///
/// Each internal node starts from a uniformly random valid column and only
/// replaces it on a strictly better child value, scanning columns in
/// ascending order.
pub struct SearchEngine {
    heuristic: Box<dyn Heuristic + Send>,
    rng: StdRng,
    nodes: u64,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        SearchEngine {
            heuristic: Box::new(WindowHeuristic),
            rng,
            nodes: 0,
        }
    }

    pub fn with_heuristic(mut self, heuristic: Box<dyn Heuristic + Send>) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Nodes visited by the most recent `best_move` call
    pub fn nodes_searched(&self) -> u64 {
        self.nodes
    }

    /// Search `depth` plies from `board` with `mark` to move and maximizing.
    pub fn best_move(
        &mut self,
        board: &Board,
        depth: usize,
        mark: Mark,
    ) -> Result<SearchResult, AgentError> {
        if board.valid_columns().is_empty() {
            return Err(AgentError::NoLegalMove);
        }
        self.nodes = 0;
        let result = self.minimax(board, depth, i32::MIN, i32::MAX, true, mark);
        debug!(
            "minimax {} depth {}: column {:?} value {} ({} nodes)",
            mark.name(),
            depth,
            result.column,
            result.value,
            self.nodes
        );
        Ok(result)
    }

    fn leaf(value: i32) -> SearchResult {
        SearchResult {
            column: None,
            value,
        }
    }

    fn minimax(
        &mut self,
        board: &Board,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        root: Mark,
    ) -> SearchResult {
        self.nodes += 1;

        if board.find_win(root).is_some() {
            return Self::leaf(WIN_SCORE);
        }
        if board.find_win(root.other()).is_some() {
            return Self::leaf(-WIN_SCORE);
        }
        if board.is_full() {
            return Self::leaf(0);
        }
        if depth == 0 {
            return Self::leaf(self.heuristic.evaluate(board, root));
        }

        let valid = board.valid_columns();
        let mut best_col = valid[self.rng.random_range(0..valid.len())];
        let mover = if maximizing { root } else { root.other() };
        let mut value = if maximizing { i32::MIN } else { i32::MAX };

        for &col in &valid {
            let Ok(child) = board.with_move(col, mover) else {
                continue;
            };
            let score = self
                .minimax(&child, depth - 1, alpha, beta, !maximizing, root)
                .value;

            if maximizing {
                if score > value {
                    value = score;
                    best_col = col;
                }
                alpha = alpha.max(value);
            } else {
                if score < value {
                    value = score;
                    best_col = col;
                }
                beta = beta.min(value);
            }

            if alpha >= beta {
                break;
            }
        }

        SearchResult {
            column: Some(best_col),
            value,
        }
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Scripted opponent: minimax at a fixed depth that, with probability
/// `error_prob`, skips the search and plays a uniformly random column.
/// The draw is made independently on every move.
pub struct MinimaxAgent {
    engine: SearchEngine,
    depth: usize,
    error_prob: f64,
    rng: StdRng,
    name: String,
}

impl MinimaxAgent {
    pub fn new(depth: usize, error_prob: f64) -> Self {
        Self::build(SearchEngine::new(), depth, error_prob, StdRng::from_os_rng())
    }

    /// Opponent that never blunders on purpose
    pub fn perfect(depth: usize) -> Self {
        Self::new(depth, 0.0)
    }

    pub fn with_seed(depth: usize, error_prob: f64, seed: u64) -> Self {
        Self::build(
            SearchEngine::with_seed(seed),
            depth,
            error_prob,
            StdRng::seed_from_u64(seed.wrapping_add(1)),
        )
    }

    fn build(engine: SearchEngine, depth: usize, error_prob: f64, rng: StdRng) -> Self {
        let name = if error_prob > 0.0 {
            format!("Minimax ({:.0}% error)", error_prob * 100.0)
        } else {
            "Minimax".to_string()
        };
        MinimaxAgent {
            engine,
            depth,
            error_prob,
            rng,
            name,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn error_prob(&self) -> f64 {
        self.error_prob
    }
}

impl Agent for MinimaxAgent {
    fn select_move(&mut self, board: &Board, mark: Mark) -> Result<usize, AgentError> {
        let valid = board.valid_columns();
        if valid.is_empty() {
            return Err(AgentError::NoLegalMove);
        }

        if self.rng.random::<f64>() < self.error_prob {
            let col = valid[self.rng.random_range(0..valid.len())];
            debug!("{} plays random column {} (injected mistake)", self.name, col);
            return Ok(col);
        }

        let result = self.engine.best_move(board, self.depth, mark)?;
        // A leaf root (depth 0 or finished board) yields no column
        Ok(result
            .column
            .unwrap_or_else(|| valid[self.rng.random_range(0..valid.len())]))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
