use crate::error::MoveError;

use super::{Board, Mark, WinLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Mark),
    Draw,
}

/// Terminal result from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reward {
    Win,
    Loss,
    Draw,
}

impl Reward {
    /// Numeric reward: +1 win, -1 loss, 0 draw
    pub fn value(self) -> f64 {
        match self {
            Reward::Win => 1.0,
            Reward::Loss => -1.0,
            Reward::Draw => 0.0,
        }
    }

    pub fn from_outcome(outcome: GameOutcome, mark: Mark) -> Self {
        match outcome {
            GameOutcome::Winner(winner) if winner == mark => Reward::Win,
            GameOutcome::Winner(_) => Reward::Loss,
            GameOutcome::Draw => Reward::Draw,
        }
    }

    /// Reward for `mark` read off a final board; no four-in-a-row counts as a draw.
    pub fn for_mark(board: &Board, mark: Mark) -> Self {
        if board.find_win(mark).is_some() {
            Reward::Win
        } else if board.find_win(mark.other()).is_some() {
            Reward::Loss
        } else {
            Reward::Draw
        }
    }
}

/// A board plus whose turn it is. Turns alternate after every successful
/// move; the outcome is fixed as soon as a move wins or fills the board.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    current_mark: Mark,
    outcome: Option<GameOutcome>,
    win_line: Option<WinLine>,
}

impl GameState {
    /// Create initial game state on an empty standard board
    pub fn initial() -> Self {
        Self::from_position(Board::new(), Mark::Red)
    }

    /// Start from an arbitrary position with `to_move` on turn.
    pub fn from_position(board: Board, to_move: Mark) -> Self {
        let (outcome, win_line) = Self::classify(&board);
        GameState {
            board,
            current_mark: to_move,
            outcome,
            win_line,
        }
    }

    fn classify(board: &Board) -> (Option<GameOutcome>, Option<WinLine>) {
        for mark in [Mark::Red, Mark::Yellow] {
            if let Some(line) = board.find_win(mark) {
                return (Some(GameOutcome::Winner(mark)), Some(line));
            }
        }
        if board.is_full() {
            (Some(GameOutcome::Draw), None)
        } else {
            (None, None)
        }
    }

    /// Get current mark
    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// The four cells that decided the game, if it was won
    pub fn win_line(&self) -> Option<WinLine> {
        self.win_line
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.valid_columns()
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        let mut next = self.clone();
        next.apply_move_mut(column)?;
        Ok(next)
    }

    /// Apply move in place; returns the row the piece landed in
    pub fn apply_move_mut(&mut self, column: usize) -> Result<usize, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let mover = self.current_mark;
        let row = self.board.place(column, mover)?;

        if let Some(line) = self.board.find_win(mover) {
            self.outcome = Some(GameOutcome::Winner(mover));
            self.win_line = Some(line);
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
        }

        self.current_mark = mover.other();

        Ok(row)
    }
}
