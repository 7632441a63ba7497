//! Score and difficulty tracking

use serde::{Deserialize, Serialize};

use crate::tuning::GameConfig;

/// Ball physics scalars escalated over a game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub angular_damping: f32,
    pub restitution: f32,
}

/// Running score, impact counter and current difficulty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u64,
    /// Ball contacts since the last escalation (0..impacts_per_escalation)
    pub impacts: u32,
    /// Escalations applied this game
    pub escalations: u32,
    pub difficulty: Difficulty,
    defaults: Difficulty,
    impacts_per_escalation: u32,
    damping_step: f32,
    restitution_step: f32,
    max_angular_damping: Option<f32>,
    max_restitution: Option<f32>,
}

impl Scoreboard {
    pub fn new(config: &GameConfig) -> Self {
        let defaults = Difficulty {
            angular_damping: config.ball_angular_damping,
            restitution: config.ball_restitution,
        };
        Self {
            score: 0,
            impacts: 0,
            escalations: 0,
            difficulty: defaults,
            defaults,
            impacts_per_escalation: config.impacts_per_escalation.max(1),
            damping_step: config.angular_damping_step,
            restitution_step: config.restitution_step,
            max_angular_damping: config.max_angular_damping,
            max_restitution: config.max_restitution,
        }
    }

    /// Add points for a destroyed brick
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(u64::from(points));
    }

    /// Count one ball contact. Returns true when the counter completes a cycle.
    pub fn record_impact(&mut self) -> bool {
        self.impacts += 1;
        self.impacts >= self.impacts_per_escalation
    }

    /// Reset the impact counter to the start of a cycle
    pub fn reset_impacts(&mut self) {
        self.impacts = 0;
    }

    /// Raise damping and restitution by one step.
    ///
    /// Growth is unbounded unless the config sets a cap.
    pub fn escalate(&mut self) -> Difficulty {
        let d = &mut self.difficulty;
        d.angular_damping += self.damping_step;
        d.restitution += self.restitution_step;
        if let Some(max) = self.max_angular_damping {
            d.angular_damping = d.angular_damping.min(max.max(self.defaults.angular_damping));
        }
        if let Some(max) = self.max_restitution {
            d.restitution = d.restitution.min(max.max(self.defaults.restitution));
        }
        self.escalations += 1;
        *d
    }

    /// Back to a fresh game: zero score and counter, default difficulty
    pub fn reset(&mut self) {
        self.score = 0;
        self.impacts = 0;
        self.escalations = 0;
        self.difficulty = self.defaults;
    }

    pub fn defaults(&self) -> Difficulty {
        self.defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escalate_steps() {
        let config = GameConfig::default();
        let mut board = Scoreboard::new(&config);
        let before = board.difficulty;
        let after = board.escalate();
        assert!((after.angular_damping - before.angular_damping - 0.001).abs() < 1e-6);
        assert!((after.restitution - before.restitution - 0.0005).abs() < 1e-6);
        assert_eq!(board.escalations, 1);
    }

    #[test]
    fn test_escalate_respects_cap() {
        let config = GameConfig {
            max_restitution: Some(1.0008),
            ..Default::default()
        };
        let mut board = Scoreboard::new(&config);
        for _ in 0..5 {
            board.escalate();
        }
        assert!((board.difficulty.restitution - 1.0008).abs() < 1e-6);
        // Damping has no cap
        assert!((board.difficulty.angular_damping - (0.1 + 0.005)).abs() < 1e-5);
    }

    #[test]
    fn test_record_impact_cycle() {
        let mut board = Scoreboard::new(&GameConfig::default());
        for _ in 0..9 {
            assert!(!board.record_impact());
        }
        assert!(board.record_impact());
        board.reset_impacts();
        assert_eq!(board.impacts, 0);
    }

    #[test]
    fn test_reset() {
        let mut board = Scoreboard::new(&GameConfig::default());
        board.add_score(15);
        board.record_impact();
        board.escalate();
        board.reset();
        assert_eq!(board.score, 0);
        assert_eq!(board.impacts, 0);
        assert_eq!(board.escalations, 0);
        assert_eq!(board.difficulty, board.defaults());
    }

    proptest! {
        #[test]
        fn prop_score_never_decreases(points in proptest::collection::vec(1u32..100, 0..50)) {
            let mut board = Scoreboard::new(&GameConfig::default());
            let mut last = 0;
            for p in points {
                board.add_score(p);
                prop_assert!(board.score >= last);
                last = board.score;
            }
        }

        #[test]
        fn prop_difficulty_never_decreases(steps in 0usize..200) {
            let mut board = Scoreboard::new(&GameConfig::default());
            let mut last = board.difficulty;
            for _ in 0..steps {
                let next = board.escalate();
                prop_assert!(next.angular_damping >= last.angular_damping);
                prop_assert!(next.restitution >= last.restitution);
                last = next;
            }
        }
    }
}
