use log::{debug, warn};

use crate::ai::{Agent, DecisionKind, TdLearner};
use crate::error::TrainingError;
use crate::game::{Board, GameState, Mark, Reward};
use crate::training::metrics::EpisodeResult;

/// Play one learning game against `opponent`.
///
/// The learner moves for `learner_mark` with its own exploration rate and
/// records the position left after each of its moves. When the game ends
/// the recorded positions are updated once with the learner's reward. A
/// failed value-table save is logged and does not end training; the updates
/// stay in memory for the next save.
pub fn play_training_game(
    learner: &mut TdLearner,
    opponent: &mut dyn Agent,
    learner_mark: Mark,
    start: GameState,
) -> Result<EpisodeResult, TrainingError> {
    run_learning_game(learner, learner_mark, start, |_, board, mark| {
        Ok(opponent.select_move(board, mark)?)
    })
}

/// Play one learning game where the learner also answers for the other
/// side. Only `learner_mark`'s positions are learned from.
pub fn play_self_play_game(
    learner: &mut TdLearner,
    learner_mark: Mark,
    start: GameState,
) -> Result<EpisodeResult, TrainingError> {
    run_learning_game(learner, learner_mark, start, |learner, board, mark| {
        let epsilon = learner.epsilon();
        Ok(learner.select_move(board, mark, epsilon)?.column)
    })
}

fn run_learning_game<F>(
    learner: &mut TdLearner,
    learner_mark: Mark,
    start: GameState,
    mut other_side: F,
) -> Result<EpisodeResult, TrainingError>
where
    F: FnMut(&mut TdLearner, &Board, Mark) -> Result<usize, TrainingError>,
{
    learner.start_episode();
    let mut state = start;
    let mut game_length = 0;
    let mut learner_moves = 0;
    let mut explorations = 0;

    while !state.is_terminal() {
        let mark = state.current_mark();
        let column = if mark == learner_mark {
            let epsilon = learner.epsilon();
            let choice = learner.select_move(state.board(), mark, epsilon)?;
            learner_moves += 1;
            if choice.kind == DecisionKind::Exploration {
                explorations += 1;
            }
            choice.column
        } else {
            other_side(&mut *learner, state.board(), mark)?
        };

        apply(&mut state, column)?;
        game_length += 1;

        if mark == learner_mark {
            learner.record_state(state.board(), learner_mark);
        }
    }

    let outcome = state.outcome().ok_or(TrainingError::MissingOutcome)?;
    let reward = Reward::from_outcome(outcome, learner_mark);
    debug!("game over after {game_length} moves: {outcome:?}");

    if let Err(e) = learner.finish_episode(reward) {
        warn!("value table not saved, keeping updates in memory: {e}");
    }

    Ok(EpisodeResult {
        reward,
        game_length,
        learner_moves,
        explorations,
    })
}

/// Play one learning game against a player driven from outside the engine,
/// such as a person entering columns. The learner explores at its
/// `epsilon_human` rate for this game and learns from the result as usual.
pub fn play_vs_external(
    learner: &mut TdLearner,
    external: &mut dyn Agent,
    learner_mark: Mark,
    start: GameState,
) -> Result<EpisodeResult, TrainingError> {
    let previous = learner.epsilon();
    learner.set_epsilon(learner.config().epsilon_human);
    let result = play_training_game(learner, external, learner_mark, start);
    learner.set_epsilon(previous);
    result
}

/// Play a single evaluation game: the learner is greedy and learns nothing.
/// Returns the learner's reward.
pub fn play_eval_game(
    learner: &mut TdLearner,
    opponent: &mut dyn Agent,
    learner_mark: Mark,
    start: GameState,
) -> Result<Reward, TrainingError> {
    let mut state = start;

    while !state.is_terminal() {
        let mark = state.current_mark();
        let column = if mark == learner_mark {
            learner.select_move(state.board(), mark, 0.0)?.column
        } else {
            opponent.select_move(state.board(), mark)?
        };
        apply(&mut state, column)?;
    }

    let outcome = state.outcome().ok_or(TrainingError::MissingOutcome)?;
    Ok(Reward::from_outcome(outcome, learner_mark))
}

fn apply(state: &mut GameState, column: usize) -> Result<(), TrainingError> {
    match state.apply_move_mut(column) {
        Ok(_) => Ok(()),
        Err(_) => Err(TrainingError::IllegalAction {
            col: column,
            legal: state.legal_actions(),
        }),
    }
}

/// Derive a deterministic seed for a given episode index.
pub fn episode_seed(base_seed: u64, episode_index: usize) -> u64 {
    // FNV-1a style mixing
    let mut hash = base_seed ^ 0x517cc1b727220a95;
    let index = episode_index as u64;
    hash = hash.wrapping_mul(0x100000001b3);
    hash ^= index;
    hash = hash.wrapping_mul(0x100000001b3);
    hash ^= index >> 32;
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{encode_state, RandomAgent, TdConfig};
    use crate::error::AgentError;

    /// Always plays the same column, legal or not.
    struct Stubborn(usize);

    impl Agent for Stubborn {
        fn select_move(&mut self, _board: &Board, _mark: Mark) -> Result<usize, AgentError> {
            Ok(self.0)
        }

        fn name(&self) -> &str {
            "Stubborn"
        }
    }

    fn learner() -> TdLearner {
        TdLearner::with_seed(TdConfig::default(), 7)
    }

    #[test]
    fn test_learner_win_updates_its_position() {
        let mut learner = learner();
        let start = GameState::from_position(Board::from_diagram(&["RRR."]), Mark::Red);
        let mut opponent = RandomAgent::with_seed(1);

        let result = play_training_game(&mut learner, &mut opponent, Mark::Red, start).unwrap();

        assert_eq!(result.reward, Reward::Win);
        assert_eq!(result.game_length, 1);
        assert_eq!(result.learner_moves, 1);
        let key = encode_state(&Board::from_diagram(&["RRRR"]), Mark::Red);
        assert!((learner.value(&key) - 0.1).abs() < 1e-12);
        assert!(learner.episode().is_empty());
    }

    #[test]
    fn test_opponent_win_without_learner_moves() {
        let mut learner = learner();
        let start = GameState::from_position(Board::from_diagram(&["YYY."]), Mark::Yellow);
        let mut opponent = RandomAgent::with_seed(1);

        let result = play_training_game(&mut learner, &mut opponent, Mark::Red, start).unwrap();

        assert_eq!(result.reward, Reward::Loss);
        assert_eq!(result.learner_moves, 0);
        assert!(learner.values().is_empty());
    }

    #[test]
    fn test_illegal_opponent_move_is_reported() {
        let mut learner = learner();
        let start = GameState::from_position(Board::from_diagram(&["R..."]), Mark::Yellow);
        let mut opponent = Stubborn(0);

        let err = play_training_game(&mut learner, &mut opponent, Mark::Red, start).unwrap_err();
        match err {
            TrainingError::IllegalAction { col, legal } => {
                assert_eq!(col, 0);
                assert_eq!(legal, vec![1, 2, 3]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_full_game_against_random_learns() {
        let mut learner = learner();
        let mut opponent = RandomAgent::with_seed(3);

        let result =
            play_training_game(&mut learner, &mut opponent, Mark::Red, GameState::initial())
                .unwrap();

        assert!(result.game_length >= 7);
        assert!(result.learner_moves >= 4);
        assert!(result.explorations <= result.learner_moves);
        assert_eq!(learner.values().len(), result.learner_moves);
    }

    #[test]
    fn test_self_play_records_one_side() {
        let mut learner = learner();
        let result = play_self_play_game(&mut learner, Mark::Yellow, GameState::initial()).unwrap();

        assert!(result.learner_moves > 0);
        assert_eq!(learner.values().len(), result.learner_moves);
        assert!(learner.values().iter().all(|(key, _)| key.as_str().ends_with("_2")));
    }

    #[test]
    fn test_training_saves_to_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.json");
        let mut learner = learner().with_store(&path);
        let start = GameState::from_position(Board::from_diagram(&["RRR."]), Mark::Red);

        play_training_game(&mut learner, &mut RandomAgent::with_seed(1), Mark::Red, start)
            .unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_external_game_uses_human_epsilon() {
        let config = TdConfig {
            epsilon_train: 0.0,
            epsilon_human: 1.0,
            ..TdConfig::default()
        };

        let mut learner = TdLearner::with_seed(config.clone(), 8);
        let mut human = RandomAgent::with_seed(2);
        let result =
            play_vs_external(&mut learner, &mut human, Mark::Yellow, GameState::initial())
                .unwrap();

        assert!(result.learner_moves > 0);
        assert_eq!(result.explorations, result.learner_moves);
        assert_eq!(learner.epsilon(), 0.0);
        assert_eq!(learner.values().len(), result.learner_moves);

        // The same setup through the training entry point never explores
        let mut learner = TdLearner::with_seed(config, 8);
        let result = play_training_game(
            &mut learner,
            &mut RandomAgent::with_seed(2),
            Mark::Yellow,
            GameState::initial(),
        )
        .unwrap();
        assert_eq!(result.explorations, 0);
    }

    #[test]
    fn test_eval_game_is_greedy_and_does_not_learn() {
        let mut learner = learner();
        learner.set_epsilon(1.0);
        let mut opponent = RandomAgent::with_seed(5);

        let reward =
            play_eval_game(&mut learner, &mut opponent, Mark::Yellow, GameState::initial())
                .unwrap();

        assert!(matches!(reward, Reward::Win | Reward::Loss | Reward::Draw));
        assert!(learner.values().is_empty());
        assert_eq!(learner.epsilon(), 1.0);
        assert_eq!(
            learner.last_choice().map(|c| c.kind),
            Some(DecisionKind::Exploitation)
        );
    }

    #[test]
    fn test_episode_seed_deterministic() {
        assert_eq!(episode_seed(42, 100), episode_seed(42, 100));
    }

    #[test]
    fn test_episode_seed_varies() {
        let s1 = episode_seed(42, 0);
        let s2 = episode_seed(42, 1);
        let s3 = episode_seed(42, 2);
        assert_ne!(s1, s2);
        assert_ne!(s2, s3);
        assert_ne!(s1, s3);
        assert_ne!(episode_seed(1, 0), episode_seed(2, 0));
    }
}
