use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ai::{Agent, MinimaxAgent, RandomAgent, SearchConfig};

/// Who the learner trains against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingMode {
    /// Minimax that never blunders on purpose
    Perfect,
    /// Minimax with the semi-perfect mistake rate
    Semi,
    /// Minimax with the weak mistake rate
    Weak,
    /// Uniformly random moves
    Random,
    /// The learner plays both sides
    SelfPlay,
}

impl TrainingMode {
    pub const ALL: [TrainingMode; 5] = [
        TrainingMode::Perfect,
        TrainingMode::Semi,
        TrainingMode::Weak,
        TrainingMode::Random,
        TrainingMode::SelfPlay,
    ];

    /// Key used in config files, on the command line and in statistics
    pub fn as_str(self) -> &'static str {
        match self {
            TrainingMode::Perfect => "perfect",
            TrainingMode::Semi => "semi",
            TrainingMode::Weak => "weak",
            TrainingMode::Random => "random",
            TrainingMode::SelfPlay => "selfplay",
        }
    }

    /// Mistake probability of the scripted opponent, if this mode has one
    pub fn error_prob(self, search: &SearchConfig) -> Option<f64> {
        match self {
            TrainingMode::Perfect => Some(0.0),
            TrainingMode::Semi => Some(search.semi_error_prob),
            TrainingMode::Weak => Some(search.weak_error_prob),
            TrainingMode::Random | TrainingMode::SelfPlay => None,
        }
    }

    /// Build the opponent agent. Self-play has none: the learner answers itself.
    pub fn opponent(self, search: &SearchConfig, seed: Option<u64>) -> Option<Box<dyn Agent>> {
        if let Some(error_prob) = self.error_prob(search) {
            let agent = match seed {
                Some(seed) => MinimaxAgent::with_seed(search.depth, error_prob, seed),
                None => MinimaxAgent::new(search.depth, error_prob),
            };
            return Some(Box::new(agent));
        }
        match self {
            TrainingMode::Random => Some(Box::new(match seed {
                Some(seed) => RandomAgent::with_seed(seed),
                None => RandomAgent::new(),
            })),
            _ => None,
        }
    }
}

impl fmt::Display for TrainingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrainingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrainingMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown mode '{s}' (expected one of: {})",
                    TrainingMode::ALL.map(TrainingMode::as_str).join(", ")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrips() {
        for mode in TrainingMode::ALL {
            assert_eq!(mode.as_str().parse::<TrainingMode>(), Ok(mode));
        }
        assert_eq!("SEMI".parse::<TrainingMode>(), Ok(TrainingMode::Semi));
        let err = "expert".parse::<TrainingMode>().unwrap_err();
        assert!(err.contains("unknown mode 'expert'"), "{err}");
    }

    #[test]
    fn opponents_match_strength() {
        let search = SearchConfig::default();
        assert_eq!(TrainingMode::Perfect.error_prob(&search), Some(0.0));
        assert_eq!(TrainingMode::Semi.error_prob(&search), Some(0.25));
        assert_eq!(TrainingMode::Weak.error_prob(&search), Some(0.60));

        let semi = TrainingMode::Semi.opponent(&search, Some(1)).unwrap();
        assert_eq!(semi.name(), "Minimax (25% error)");
        let random = TrainingMode::Random.opponent(&search, Some(1)).unwrap();
        assert_eq!(random.name(), "Random");
        assert!(TrainingMode::SelfPlay.opponent(&search, Some(1)).is_none());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: TrainingMode,
        }
        let w: Wrapper = toml::from_str("mode = \"selfplay\"").unwrap();
        assert_eq!(w.mode, TrainingMode::SelfPlay);
    }
}
