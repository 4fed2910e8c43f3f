mod agent;
pub mod heuristic;
pub mod minimax;
mod random;
pub mod state_encoding;
pub mod td;

pub use agent::Agent;
pub use heuristic::{score_position, score_window, Heuristic, WindowHeuristic};
pub use minimax::{MinimaxAgent, SearchConfig, SearchEngine, SearchResult, WIN_SCORE};
pub use random::RandomAgent;
pub use state_encoding::{encode_state, StateKey};
pub use td::{DecisionKind, MoveChoice, TdConfig, TdLearner};
