use super::board::Cell;

/// Piece identity of one of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Mark {
    Red,
    Yellow,
}

impl Mark {
    /// Get the other mark
    pub fn other(self) -> Mark {
        match self {
            Mark::Red => Mark::Yellow,
            Mark::Yellow => Mark::Red,
        }
    }

    /// Convert mark to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Mark::Red => Cell::Red,
            Mark::Yellow => Cell::Yellow,
        }
    }

    /// Digit used for this mark in state keys
    pub fn digit(self) -> char {
        match self {
            Mark::Red => '1',
            Mark::Yellow => '2',
        }
    }

    /// Get mark name for display
    pub fn name(self) -> &'static str {
        match self {
            Mark::Red => "Red",
            Mark::Yellow => "Yellow",
        }
    }
}
