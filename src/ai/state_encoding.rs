use std::fmt;

use crate::game::{Board, Mark};

/// Value-table key: every cell of the board plus the perspective mark.
///
/// Cells are written row-major from the bottom row as `0` (empty), `1`
/// (Red) or `2` (Yellow), followed by `_` and the perspective digit, e.g.
/// `"1000000…000_2"`. The layout is only unambiguous for one board size, so
/// a value table must not mix dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct StateKey(String);

impl StateKey {
    pub fn new(key: impl Into<String>) -> Self {
        StateKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encode a board as seen by `perspective`.
pub fn encode_state(board: &Board, perspective: Mark) -> StateKey {
    let mut key = String::with_capacity(board.cells().len() + 2);
    key.extend(board.cells().iter().map(|cell| cell.digit()));
    key.push('_');
    key.push(perspective.digit());
    StateKey(key)
}
