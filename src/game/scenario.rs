//! Random mid-game openings so training games do not always start from the
//! empty board.

use rand::Rng;

use super::{Board, Mark};

/// Play a random prefix of alternating moves and return the position plus
/// the mark to move next.
///
/// Between 0 and `rows * cols - reserve` pieces are dropped into uniformly
/// random columns, starting from a random mark. Any prefix that produces a
/// four-in-a-row is thrown away and regenerated, so the result is never
/// terminal as long as `reserve > 0`.
pub fn random_opening<R: Rng + ?Sized>(
    rng: &mut R,
    rows: usize,
    cols: usize,
    reserve: usize,
) -> (Board, Mark) {
    let max_moves = (rows * cols).saturating_sub(reserve.max(1));

    loop {
        let mut board = Board::with_size(rows, cols);
        let mut mark = if rng.random_bool(0.5) {
            Mark::Red
        } else {
            Mark::Yellow
        };
        let moves = rng.random_range(0..=max_moves);
        let mut won = false;

        for _ in 0..moves {
            let valid = board.valid_columns();
            if valid.is_empty() {
                break;
            }
            let col = valid[rng.random_range(0..valid.len())];
            if board.place(col, mark).is_err() {
                break;
            }
            if board.find_win(mark).is_some() {
                won = true;
                break;
            }
            mark = mark.other();
        }

        if !won {
            return (board, mark);
        }
    }
}
