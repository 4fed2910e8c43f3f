use crate::error::AgentError;
use crate::game::{Board, Mark};

/// Universal interface for everything that can choose a column: scripted
/// search opponents, the value-table learner, random play, or an external
/// human input adapter.
pub trait Agent {
    /// Choose a column for `mark` to play on `board`.
    ///
    /// Returns [`AgentError::NoLegalMove`] when every column is full.
    fn select_move(&mut self, board: &Board, mark: Mark) -> Result<usize, AgentError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
