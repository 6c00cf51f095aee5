use std::str::FromStr;
use std::time::Duration;

/// AI strength, a closed set of strategies. Each level fixes a search depth,
/// a wall-clock budget for one move decision, and an artificial "thinking"
/// pause used purely for pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// No search: immediate win, coin-flip block, otherwise random.
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    /// Minimax depth limit in plies. Zero for [`Difficulty::Easy`], which
    /// does not search.
    pub const fn search_depth(self) -> u32 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 4,
            Difficulty::Hard => 8,
            Difficulty::Extreme => 12,
        }
    }

    /// Wall-clock budget for one move decision. The search degrades to the
    /// static heuristic once this is exceeded rather than stalling the
    /// caller.
    pub const fn time_budget(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::ZERO,
            Difficulty::Medium => Duration::from_millis(150),
            Difficulty::Hard => Duration::from_millis(600),
            Difficulty::Extreme => Duration::from_millis(2000),
        }
    }

    /// Artificial pause before the AI "answers". Pacing only; no effect on
    /// the chosen move.
    pub const fn thinking_delay(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(500),
            Difficulty::Medium => Duration::from_millis(800),
            Difficulty::Hard => Duration::from_millis(1200),
            Difficulty::Extreme => Duration::from_millis(1500),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "extreme" => Ok(Difficulty::Extreme),
            other => Err(format!(
                "unknown difficulty '{other}' (expected easy, medium, hard or extreme)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_increases_with_difficulty() {
        assert!(Difficulty::Easy.search_depth() < Difficulty::Medium.search_depth());
        assert!(Difficulty::Medium.search_depth() < Difficulty::Hard.search_depth());
        assert!(Difficulty::Hard.search_depth() < Difficulty::Extreme.search_depth());
    }

    #[test]
    fn test_search_levels_have_budgets() {
        for level in [Difficulty::Medium, Difficulty::Hard, Difficulty::Extreme] {
            assert!(level.time_budget() > Duration::ZERO);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("Medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!("EXTREME".parse::<Difficulty>().unwrap(), Difficulty::Extreme);
        assert!("impossible".parse::<Difficulty>().is_err());
    }
}
