/// Counters for the current session.
///
/// `high_score` survives [`Stats::reset`] and lives as long as the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub score: u64,
    pub high_score: u64,
    pub level: u32,
    /// Ships remaining, including the one in play
    pub lives_left: u32,
    pub game_active: bool,
}

impl Stats {
    /// Fresh statistics; the game starts inactive until the player hits Play.
    pub fn new(ship_limit: u32) -> Self {
        Self {
            score: 0,
            high_score: 0,
            level: 1,
            lives_left: ship_limit,
            game_active: false,
        }
    }

    /// Resets everything that changes during a single game.
    pub fn reset(&mut self, ship_limit: u32) {
        self.score = 0;
        self.level = 1;
        self.lives_left = ship_limit;
    }

    /// Raises the high score to the current score if it was beaten.
    /// Returns true when a new high score was set.
    pub fn check_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = Stats::new(3);
        assert_eq!(stats.score, 0);
        assert_eq!(stats.high_score, 0);
        assert_eq!(stats.level, 1);
        assert_eq!(stats.lives_left, 3);
        assert!(!stats.game_active);
    }

    #[test]
    fn test_reset_keeps_high_score() {
        let mut stats = Stats::new(3);
        stats.score = 500;
        stats.level = 4;
        stats.lives_left = 1;
        stats.check_high_score();

        stats.reset(3);
        assert_eq!(stats.score, 0);
        assert_eq!(stats.level, 1);
        assert_eq!(stats.lives_left, 3);
        assert_eq!(stats.high_score, 500);
    }

    #[test]
    fn test_check_high_score() {
        let mut stats = Stats::new(3);
        stats.high_score = 100;
        stats.score = 100;
        assert!(!stats.check_high_score());
        assert_eq!(stats.high_score, 100);

        stats.score = 150;
        assert!(stats.check_high_score());
        assert_eq!(stats.high_score, 150);
    }
}
