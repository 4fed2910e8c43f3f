use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::error::AgentError;
use crate::game::{Board, Mark};

use super::agent::Agent;

/// An agent that selects uniformly at random from legal columns.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, board: &Board, _mark: Mark) -> Result<usize, AgentError> {
        let columns = board.valid_columns();
        if columns.is_empty() {
            return Err(AgentError::NoLegalMove);
        }
        Ok(columns[self.rng.random_range(0..columns.len())])
    }

    fn name(&self) -> &str {
        "Random"
    }
}
