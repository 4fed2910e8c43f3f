use crate::error::MoveError;

use super::Mark;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Number of aligned pieces needed to win.
pub const CONNECT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

impl Cell {
    /// Digit used for this cell in state keys
    pub fn digit(self) -> char {
        match self {
            Cell::Empty => '0',
            Cell::Red => '1',
            Cell::Yellow => '2',
        }
    }
}

/// Direction of a four-in-a-row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
    /// Bottom-left to top-right (/)
    DiagonalUp,
    /// Top-left to bottom-right (\)
    DiagonalDown,
}

/// Four same-mark cells in a line, as `(row, col)` pairs in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinLine {
    pub axis: Axis,
    pub cells: [(usize, usize); CONNECT],
}

/// Gravity-constrained grid. Row 0 is the bottom row: pieces stack upward
/// from it, so every column is a contiguous run of marks starting at row 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty standard 6x7 board
    pub fn new() -> Self {
        Self::with_size(ROWS, COLS)
    }

    /// Create a new empty board with the given dimensions
    pub fn with_size(rows: usize, cols: usize) -> Self {
        Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Index of the middle column
    pub fn center_column(&self) -> usize {
        self.cols / 2
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    /// All cells in row-major order, bottom row first
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Lowest empty row of a column, or `None` if the column is full or
    /// out of range
    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        (0..self.rows).find(|&row| self.get(row, col) == Cell::Empty)
    }

    /// Check if a piece can be dropped in a column
    pub fn is_valid_move(&self, col: usize) -> bool {
        self.lowest_empty_row(col).is_some()
    }

    /// Columns that still accept a piece, ascending
    pub fn valid_columns(&self) -> Vec<usize> {
        (0..self.cols).filter(|&col| self.is_valid_move(col)).collect()
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn place(&mut self, col: usize, mark: Mark) -> Result<usize, MoveError> {
        if col >= self.cols {
            return Err(MoveError::InvalidColumn {
                col,
                cols: self.cols,
            });
        }
        let row = self.lowest_empty_row(col).ok_or(MoveError::ColumnFull(col))?;
        self.cells[row * self.cols + col] = mark.to_cell();
        Ok(row)
    }

    /// Copy of this board with `mark` dropped in `col`
    pub fn with_move(&self, col: usize, mark: Mark) -> Result<Board, MoveError> {
        let mut next = self.clone();
        next.place(col, mark)?;
        Ok(next)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..self.cols).all(|col| !self.is_valid_move(col))
    }

    /// Find the first four-in-a-row of `mark`.
    ///
    /// Axes are scanned horizontal, vertical, diagonal up, diagonal down.
    /// Horizontal windows are visited rows outer, vertical windows columns
    /// outer, and both diagonals rows outer. The first match is returned.
    pub fn find_win(&self, mark: Mark) -> Option<WinLine> {
        let cell = mark.to_cell();
        let span = CONNECT - 1;

        let line = |axis: Axis, cells: [(usize, usize); CONNECT]| {
            cells
                .iter()
                .all(|&(r, c)| self.get(r, c) == cell)
                .then_some(WinLine { axis, cells })
        };

        if self.cols >= CONNECT {
            for row in 0..self.rows {
                for col in 0..self.cols - span {
                    let found = line(Axis::Horizontal, std::array::from_fn(|i| (row, col + i)));
                    if found.is_some() {
                        return found;
                    }
                }
            }
        }

        if self.rows >= CONNECT {
            for col in 0..self.cols {
                for row in 0..self.rows - span {
                    let found = line(Axis::Vertical, std::array::from_fn(|i| (row + i, col)));
                    if found.is_some() {
                        return found;
                    }
                }
            }
        }

        if self.rows >= CONNECT && self.cols >= CONNECT {
            for row in 0..self.rows - span {
                for col in 0..self.cols - span {
                    let found =
                        line(Axis::DiagonalUp, std::array::from_fn(|i| (row + i, col + i)));
                    if found.is_some() {
                        return found;
                    }
                }
            }

            for row in span..self.rows {
                for col in 0..self.cols - span {
                    let found =
                        line(Axis::DiagonalDown, std::array::from_fn(|i| (row - i, col + i)));
                    if found.is_some() {
                        return found;
                    }
                }
            }
        }

        None
    }

    /// Whether either mark has four in a row or the board is full
    pub fn is_terminal(&self) -> bool {
        self.find_win(Mark::Red).is_some()
            || self.find_win(Mark::Yellow).is_some()
            || self.is_full()
    }

    /// Build a board from a picture, top row first: `R`, `Y`, `.`
    #[cfg(test)]
    pub(crate) fn from_diagram(lines: &[&str]) -> Board {
        let rows = lines.len();
        let cols = lines[0].len();
        let mut board = Board::with_size(rows, cols);
        for (i, line) in lines.iter().enumerate() {
            let row = rows - 1 - i;
            for (col, ch) in line.chars().enumerate() {
                board.cells[row * cols + col] = match ch {
                    'R' => Cell::Red,
                    'Y' => Cell::Yellow,
                    _ => Cell::Empty,
                };
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn column_is_contiguous(board: &Board, col: usize) -> bool {
        let mut seen_empty = false;
        for row in 0..board.rows() {
            match board.get(row, col) {
                Cell::Empty => seen_empty = true,
                _ if seen_empty => return false,
                _ => {}
            }
        }
        true
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.rows(), ROWS);
        assert_eq!(board.cols(), COLS);
        assert!(board.cells().iter().all(|&c| c == Cell::Empty));
        assert_eq!(board.valid_columns(), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_place_stacks_from_bottom() {
        let mut board = Board::new();

        let row = board.place(3, Mark::Red).unwrap();
        assert_eq!(row, 0);
        assert_eq!(board.get(0, 3), Cell::Red);

        let row = board.place(3, Mark::Yellow).unwrap();
        assert_eq!(row, 1);
        assert_eq!(board.get(1, 3), Cell::Yellow);
        assert_eq!(board.lowest_empty_row(3), Some(2));
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board.place(0, Mark::Red).unwrap();
        }

        assert!(!board.is_valid_move(0));
        assert_eq!(board.lowest_empty_row(0), None);
        assert_eq!(board.place(0, Mark::Yellow), Err(MoveError::ColumnFull(0)));
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new();
        assert!(!board.is_valid_move(7));
        assert_eq!(
            board.place(7, Mark::Red),
            Err(MoveError::InvalidColumn { col: 7, cols: 7 })
        );
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        for col in 0..COLS {
            for _ in 0..ROWS {
                board.place(col, Mark::Red).unwrap();
            }
        }
        assert!(board.is_full());
        assert!(board.valid_columns().is_empty());
    }

    #[test]
    fn test_custom_size() {
        let mut board = Board::with_size(4, 5);
        assert_eq!(board.center_column(), 2);
        for _ in 0..4 {
            board.place(4, Mark::Yellow).unwrap();
        }
        assert!(!board.is_valid_move(4));
        assert!(!board.is_full());
    }

    #[test]
    fn test_random_placements_keep_gravity() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let mut board = Board::new();
            let mut mark = Mark::Red;
            while !board.is_full() {
                let valid = board.valid_columns();
                let col = valid[rng.random_range(0..valid.len())];
                let expected = board.lowest_empty_row(col).unwrap();
                assert_eq!(board.place(col, mark).unwrap(), expected);
                assert!(column_is_contiguous(&board, col));
                mark = mark.other();
            }
        }
    }

    #[test]
    fn test_with_move_leaves_original_untouched() {
        let board = Board::new();
        let next = board.with_move(2, Mark::Red).unwrap();
        assert_eq!(board.get(0, 2), Cell::Empty);
        assert_eq!(next.get(0, 2), Cell::Red);
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::new();
        for col in 1..5 {
            board.place(col, Mark::Red).unwrap();
        }
        let win = board.find_win(Mark::Red).unwrap();
        assert_eq!(win.axis, Axis::Horizontal);
        assert_eq!(win.cells, [(0, 1), (0, 2), (0, 3), (0, 4)]);
        assert!(board.find_win(Mark::Yellow).is_none());
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::new();
        for _ in 0..4 {
            board.place(2, Mark::Yellow).unwrap();
        }
        let win = board.find_win(Mark::Yellow).unwrap();
        assert_eq!(win.axis, Axis::Vertical);
        assert_eq!(win.cells, [(0, 2), (1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_diagonal_up_win() {
        let board = Board::from_diagram(&[
            ".......",
            ".......",
            "...R...",
            "..RY...",
            ".RYY...",
            "RYYY...",
        ]);
        let win = board.find_win(Mark::Red).unwrap();
        assert_eq!(win.axis, Axis::DiagonalUp);
        assert_eq!(win.cells, [(0, 0), (1, 1), (2, 2), (3, 3)]);
        assert!(board.find_win(Mark::Yellow).is_none());
    }

    #[test]
    fn test_diagonal_down_win() {
        let board = Board::from_diagram(&[
            ".......",
            ".......",
            "R......",
            "YR.....",
            "YYR....",
            "YYYR...",
        ]);
        let win = board.find_win(Mark::Red).unwrap();
        assert_eq!(win.axis, Axis::DiagonalDown);
        assert_eq!(win.cells, [(3, 0), (2, 1), (1, 2), (0, 3)]);
        assert!(board.find_win(Mark::Yellow).is_none());
    }

    #[test]
    fn test_first_window_is_reported() {
        let mut board = Board::new();
        for col in 0..5 {
            board.place(col, Mark::Red).unwrap();
        }
        let win = board.find_win(Mark::Red).unwrap();
        assert_eq!(win.cells, [(0, 0), (0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn test_horizontal_reported_before_vertical() {
        let board = Board::from_diagram(&[
            ".......",
            ".......",
            "......R",
            "......R",
            "......R",
            "...RRRR",
        ]);
        let win = board.find_win(Mark::Red).unwrap();
        assert_eq!(win.axis, Axis::Horizontal);
        assert_eq!(win.cells, [(0, 3), (0, 4), (0, 5), (0, 6)]);
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::new();
        for col in 0..3 {
            board.place(col, Mark::Red).unwrap();
        }
        assert!(board.find_win(Mark::Red).is_none());
        assert!(!board.is_terminal());
    }

    #[test]
    fn test_small_board_only_checks_fitting_axes() {
        let mut board = Board::with_size(4, 3);
        for _ in 0..4 {
            board.place(1, Mark::Red).unwrap();
        }
        let win = board.find_win(Mark::Red).unwrap();
        assert_eq!(win.axis, Axis::Vertical);
    }
}
