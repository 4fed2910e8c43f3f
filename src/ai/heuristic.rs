use crate::game::{Board, Cell, Mark, CONNECT};

/// Trait for evaluating a non-terminal board position from a mark's perspective.
pub trait Heuristic {
    fn evaluate(&self, board: &Board, mark: Mark) -> i32;
}

/// Bonus per own piece in the middle column.
pub const CENTER_WEIGHT: i32 = 6;

/// Default heuristic: center occupancy plus a score for every 4-cell window.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowHeuristic;

impl Heuristic for WindowHeuristic {
    fn evaluate(&self, board: &Board, mark: Mark) -> i32 {
        score_position(board, mark)
    }
}

/// Score one window of four cells.
///
/// Own four: +100, own three and an empty: +10, own two and two empties:
/// +4. Independently, three opposing pieces and an empty: -8.
pub fn score_window(window: &[Cell; CONNECT], mark: Mark) -> i32 {
    let own_cell = mark.to_cell();
    let opp_cell = mark.other().to_cell();
    let own = window.iter().filter(|&&c| c == own_cell).count();
    let opp = window.iter().filter(|&&c| c == opp_cell).count();
    let empty = window.iter().filter(|&&c| c == Cell::Empty).count();

    let mut score = 0;
    if own == 4 {
        score += 100;
    } else if own == 3 && empty == 1 {
        score += 10;
    } else if own == 2 && empty == 2 {
        score += 4;
    }

    if opp == 3 && empty == 1 {
        score -= 8;
    }
    score
}

/// Static evaluation of a whole board for `mark`, no look-ahead.
pub fn score_position(board: &Board, mark: Mark) -> i32 {
    let rows = board.rows();
    let cols = board.cols();
    let span = CONNECT - 1;
    let own_cell = mark.to_cell();
    let mut score = 0;

    // Center column bonus
    let center = board.center_column();
    for row in 0..rows {
        if board.get(row, center) == own_cell {
            score += CENTER_WEIGHT;
        }
    }

    // Horizontal
    if cols >= CONNECT {
        for row in 0..rows {
            for col in 0..cols - span {
                let window = std::array::from_fn(|i| board.get(row, col + i));
                score += score_window(&window, mark);
            }
        }
    }

    // Vertical
    if rows >= CONNECT {
        for col in 0..cols {
            for row in 0..rows - span {
                let window = std::array::from_fn(|i| board.get(row + i, col));
                score += score_window(&window, mark);
            }
        }
    }

    if rows >= CONNECT && cols >= CONNECT {
        // Diagonal (bottom-left to top-right)
        for row in 0..rows - span {
            for col in 0..cols - span {
                let window = std::array::from_fn(|i| board.get(row + i, col + i));
                score += score_window(&window, mark);
            }
        }

        // Diagonal (top-left to bottom-right)
        for row in span..rows {
            for col in 0..cols - span {
                let window = std::array::from_fn(|i| board.get(row - i, col + i));
                score += score_window(&window, mark);
            }
        }
    }

    score
}
