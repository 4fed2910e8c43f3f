//! Training orchestration: plays the learner against scripted opponents,
//! feeds finished games back into its value table, and tracks results.
pub mod episode;
pub mod metrics;
pub mod mode;
pub mod trainer;

pub use episode::{play_eval_game, play_self_play_game, play_training_game, play_vs_external};
pub use metrics::{EpisodeResult, TrainingMetrics};
pub use mode::TrainingMode;
pub use trainer::{EvalSummary, Trainer, TrainerConfig, TrainingSummary, LEARNER_MARK};
